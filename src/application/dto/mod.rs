/// Data Transfer Objects for application layer
///
/// Requests built by the CLI (or a library caller) and the results the use
/// cases hand back.
mod notification_request;
mod notification_results;
mod scan_wait_request;

pub use notification_request::NotificationRequest;
pub use notification_results::NotificationResults;
pub use scan_wait_request::ScanWaitRequest;
