use crate::hub::domain::{HubView, PolicyRuleView};
use std::collections::HashSet;
use uuid::Uuid;

/// PolicyRuleFilter policy for narrowing policy notifications to chosen rules
///
/// Each configured entry is interpreted once, when the filter is built:
/// 1. an `http://` or `https://` entry is a rule URL
/// 2. an entry that parses as a UUID is a rule id (the last segment of the rule URL)
/// 3. anything else is a rule name, matched exactly
///
/// An empty filter accepts every rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyRuleFilter {
    names: HashSet<String>,
    ids: HashSet<Uuid>,
    urls: HashSet<String>,
}

impl PolicyRuleFilter {
    /// Builds a filter from rule names, ids or URLs; blank entries are ignored
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = Self::default();
        for entry in entries {
            let entry = entry.as_ref().trim();
            if entry.is_empty() {
                continue;
            }
            if entry.starts_with("http://") || entry.starts_with("https://") {
                filter.urls.insert(entry.trim_end_matches('/').to_string());
            } else if let Ok(id) = Uuid::parse_str(entry) {
                filter.ids.insert(id);
            } else {
                filter.names.insert(entry.to_string());
            }
        }
        filter
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.ids.is_empty() && self.urls.is_empty()
    }

    pub fn accepts(&self, rule: &PolicyRuleView) -> bool {
        if self.is_empty() || self.names.contains(&rule.name) {
            return true;
        }
        let Some(href) = rule.meta().href.as_deref() else {
            return false;
        };
        let href = href.trim_end_matches('/');
        if self.urls.contains(href) {
            return true;
        }
        href.rsplit('/')
            .next()
            .and_then(|segment| Uuid::parse_str(segment).ok())
            .is_some_and(|id| self.ids.contains(&id))
    }
}

/// `None` stands for "no filter configured"
pub fn rule_accepted(filter: Option<&PolicyRuleFilter>, rule: &PolicyRuleView) -> bool {
    filter.map_or(true, |filter| filter.accepts(rule))
}
