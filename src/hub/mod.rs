/// Hub integration core
///
/// - `domain`: resource views, statuses, notifications and content items
/// - `policies`: policy rule filtering
/// - `services`: hub lookups and the notification pipeline
pub mod domain;
pub mod policies;
pub mod services;
