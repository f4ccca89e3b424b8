use crate::hub::domain::NotificationContentItem;

/// Merges per-notification outputs into one time-ordered list.
///
/// The sort is stable and equal neighbours collapse to the first one, so a
/// notification seen twice contributes its items once.
pub fn merge_content_items<I>(batches: I) -> Vec<NotificationContentItem>
where
    I: IntoIterator<Item = Vec<NotificationContentItem>>,
{
    let mut items: Vec<NotificationContentItem> = batches.into_iter().flatten().collect();
    items.sort();
    items.dedup();
    items
}
