use chrono::{DateTime, Utc};

/// NotificationRequest - the notification window to process and the rules of interest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Rule names, ids or URLs; empty means every rule
    pub policy_rules: Vec<String>,
}

impl NotificationRequest {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, policy_rules: Vec<String>) -> Self {
        Self {
            start,
            end,
            policy_rules,
        }
    }
}
