use crate::application::dto::{NotificationRequest, NotificationResults};
use crate::hub::domain::{NotificationContentItem, RawNotification};
use crate::hub::policies::PolicyRuleFilter;
use crate::hub::services::hub_requests::{self, NOTIFICATIONS_PATH};
use crate::hub::services::{merge_content_items, transform_notification, NotificationTypeTable};
use crate::ports::outbound::{ProgressReporter, ResourceFetcher};
use crate::shared::error::describe_chain;
use crate::shared::HubError;
use futures::stream::{self, StreamExt};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Notifications transformed at the same time when nothing else is configured
pub const DEFAULT_MAX_CONCURRENT: usize = 8;

/// TransformNotificationsUseCase - turns raw hub notifications into a
/// time-ordered, duplicate-free list of content items
///
/// Each notification is classified and transformed on its own, with bounded
/// concurrency. A notification that fails is reported and returned in
/// [`NotificationResults::failures`]; the others carry on.
///
/// # Type Parameters
/// * `F` - ResourceFetcher implementation (a caching one pays off here)
/// * `PR` - ProgressReporter implementation
pub struct TransformNotificationsUseCase<F, PR> {
    fetcher: F,
    type_table: NotificationTypeTable,
    progress_reporter: PR,
    max_concurrent: usize,
}

impl<F, PR> TransformNotificationsUseCase<F, PR>
where
    F: ResourceFetcher,
    PR: ProgressReporter,
{
    pub fn new(fetcher: F, progress_reporter: PR) -> Self {
        Self {
            fetcher,
            type_table: NotificationTypeTable::default(),
            progress_reporter,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }

    pub fn with_type_table(mut self, type_table: NotificationTypeTable) -> Self {
        self.type_table = type_table;
        self
    }

    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    /// Fetches every notification in the request's window and transforms it
    ///
    /// # Errors
    /// Only the notification listing itself can fail; per-notification
    /// failures end up in the returned results.
    pub async fn execute(
        &self,
        request: &NotificationRequest,
    ) -> Result<NotificationResults, HubError> {
        self.progress_reporter.report(&format!(
            "📥 Fetching notifications from {} to {}",
            request.start.to_rfc3339(),
            request.end.to_rfc3339()
        ));
        let notifications =
            hub_requests::notifications_between(&self.fetcher, &request.start, &request.end)
                .await
                .map_err(|e| {
                    let url = format!(
                        "{}{}",
                        self.fetcher.base_url().trim_end_matches('/'),
                        NOTIFICATIONS_PATH
                    );
                    HubError::from_fetch(&url, e)
                })?;
        self.progress_reporter.report(&format!(
            "✅ Received {} notification(s)",
            notifications.len()
        ));

        let filter = PolicyRuleFilter::from_entries(&request.policy_rules);
        let filter = (!filter.is_empty()).then_some(filter);
        Ok(self
            .transform_notifications(notifications, filter.as_ref())
            .await)
    }

    /// Classifies and transforms `notifications`, keeping only policy rules
    /// accepted by `rule_filter` (all of them when `None`)
    pub async fn transform_notifications(
        &self,
        notifications: Vec<RawNotification>,
        rule_filter: Option<&PolicyRuleFilter>,
    ) -> NotificationResults {
        let total = notifications.len();
        let processed = AtomicUsize::new(0);

        let outcomes: Vec<Result<Vec<NotificationContentItem>, HubError>> =
            stream::iter(notifications)
                .map(|raw| {
                    let processed = &processed;
                    async move {
                        let outcome = self.transform_one(raw, rule_filter).await;
                        let current = processed.fetch_add(1, Ordering::SeqCst) + 1;
                        self.progress_reporter.report_progress(
                            current,
                            total,
                            Some("Transforming notifications"),
                        );
                        outcome
                    }
                })
                .buffer_unordered(self.max_concurrent)
                .collect()
                .await;

        let mut batches = Vec::with_capacity(outcomes.len());
        let mut failures = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(items) => batches.push(items),
                Err(e) => {
                    self.progress_reporter
                        .report_error(&format!("⚠️  {}", describe_chain(&e)));
                    failures.push(e);
                }
            }
        }

        let items = merge_content_items(batches);
        self.progress_reporter.report_completion(&format!(
            "✅ {} content item(s) from {} notification(s), {} failed",
            items.len(),
            total,
            failures.len()
        ));
        NotificationResults { items, failures }
    }

    async fn transform_one(
        &self,
        raw: RawNotification,
        rule_filter: Option<&PolicyRuleFilter>,
    ) -> Result<Vec<NotificationContentItem>, HubError> {
        let notification = self.type_table.classify(raw)?;
        transform_notification(&self.fetcher, &notification, rule_filter).await
    }
}
