pub mod rule_filter;

pub use rule_filter::{rule_accepted, PolicyRuleFilter};
