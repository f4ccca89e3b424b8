use crate::hub::domain::NotificationContentItem;
use crate::shared::HubError;

/// NotificationResults - outcome of one notification batch
///
/// `items` is sorted and free of duplicates. Every notification that could
/// not be transformed has one entry in `failures`; those never stop the rest
/// of the batch.
#[derive(Debug, Default)]
pub struct NotificationResults {
    pub items: Vec<NotificationContentItem>,
    pub failures: Vec<HubError>,
}

impl NotificationResults {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}
