/// Use cases module containing application business logic orchestration
mod await_scan_completion;
mod describe_policy_status;
mod transform_notifications;

pub use await_scan_completion::{
    ScanCompletionTracker, DEFAULT_SCAN_TIMEOUT_MS, POLL_INTERVAL,
};
pub use describe_policy_status::DescribePolicyStatusUseCase;
pub use transform_notifications::{TransformNotificationsUseCase, DEFAULT_MAX_CONCURRENT};
