/// Hub services - lookups, classification, transformation and ordering
///
/// These functions hold the behaviour of the notification pipeline and the
/// resource lookups the scan tracker performs. They talk to the hub only
/// through [`crate::ports::outbound::ResourceFetcher`].
pub mod content_ordering;
pub mod hub_requests;
pub mod notification_classifier;
pub mod notification_transformer;

pub use content_ordering::merge_content_items;
pub use notification_classifier::NotificationTypeTable;
pub use notification_transformer::{transform_notification, RuleSource};
