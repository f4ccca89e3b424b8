use crate::hub::domain::{Notification, NotificationContent, NotificationKind, RawNotification};
use crate::shared::HubError;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// Immutable mapping from the hub's notification `type` to a notification kind.
///
/// Built once and shared by reference; unknown types classify as
/// [`NotificationContent::Untyped`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationTypeTable {
    kinds: HashMap<String, NotificationKind>,
}

impl Default for NotificationTypeTable {
    fn default() -> Self {
        let kinds = NotificationKind::ALL
            .into_iter()
            .map(|kind| (kind.type_tag().to_string(), kind))
            .collect();
        Self { kinds }
    }
}

impl NotificationTypeTable {
    /// Maps an additional type tag onto an existing kind
    pub fn with_kind(mut self, type_tag: impl Into<String>, kind: NotificationKind) -> Self {
        self.kinds.insert(type_tag.into(), kind);
        self
    }

    pub fn kind_of(&self, type_tag: &str) -> Option<NotificationKind> {
        self.kinds.get(type_tag).copied()
    }

    /// Interprets the content of `raw` according to its type.
    ///
    /// # Errors
    /// Returns [`HubError::Transform`] when the type is known but the content
    /// does not have the expected shape.
    pub fn classify(&self, raw: RawNotification) -> Result<Notification, HubError> {
        let content = match self.kind_of(&raw.type_tag) {
            None => NotificationContent::Untyped,
            Some(NotificationKind::PolicyViolation) => {
                NotificationContent::PolicyViolation(parse_content(&raw)?)
            }
            Some(NotificationKind::PolicyViolationCleared) => {
                NotificationContent::PolicyViolationCleared(parse_content(&raw)?)
            }
            Some(NotificationKind::PolicyOverride) => {
                NotificationContent::PolicyOverride(parse_content(&raw)?)
            }
            Some(NotificationKind::Vulnerability) => {
                NotificationContent::Vulnerability(parse_content(&raw)?)
            }
        };
        Ok(Notification { raw, content })
    }
}

fn parse_content<T: DeserializeOwned>(raw: &RawNotification) -> Result<T, HubError> {
    T::deserialize(&raw.content).map_err(|e| {
        HubError::transform(
            raw,
            raw.meta.href.as_deref(),
            HubError::Validation {
                message: format!("malformed {} content: {}", raw.type_tag, e),
            },
        )
    })
}
