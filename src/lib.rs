//! hub-integration - client-side integration with a software composition analysis hub
//!
//! This library waits for the hub's asynchronous BOM import scans to finish and
//! turns the hub's notifications into a normalized, time-ordered stream of
//! policy and vulnerability content items.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`hub`): resource views, statuses, the notification pipeline
//! - **Application Layer** (`application`): the scan tracker and the notification use cases
//! - **Ports** (`ports`): the fetcher, clock and reporter interfaces
//! - **Adapters** (`adapters`): REST client, system clock, stderr reporter
//! - **Shared** (`shared`): error types and the result alias
//!
//! # Example
//!
//! ```no_run
//! use hub_integration::prelude::*;
//!
//! # async fn wait() -> Result<()> {
//! let client = HubRestClient::new(HubConnection {
//!     server_url: "https://hub.example.com".to_string(),
//!     api_token: "api-token".to_string(),
//!     request_timeout: DEFAULT_REQUEST_TIMEOUT,
//! })?;
//!
//! let tracker = ScanCompletionTracker::new(
//!     client,
//!     SystemClock::new(),
//!     StderrProgressReporter::new(),
//!     300_000,
//! );
//! tracker.await_scan_completion("my-project", "1.0.0").await?;
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod hub;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::clock::{CancelHandle, SystemClock};
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::network::{
        CachingResourceFetcher, HubConnection, HubRestClient, DEFAULT_REQUEST_TIMEOUT,
    };
    pub use crate::application::dto::{NotificationRequest, NotificationResults, ScanWaitRequest};
    pub use crate::application::use_cases::{
        DescribePolicyStatusUseCase, ScanCompletionTracker, TransformNotificationsUseCase,
        DEFAULT_MAX_CONCURRENT, DEFAULT_SCAN_TIMEOUT_MS, POLL_INTERVAL,
    };
    pub use crate::hub::domain::{
        ContentPayload, FullProjectVersionView, HubView, Notification, NotificationContentItem,
        NotificationKind, PolicyRuleView, PolicyStatusDescription, PollPhase, RawNotification,
        ScanPollState, ScanSummaryStatus, ScanSummaryView, ScanTrackerState,
    };
    pub use crate::hub::policies::PolicyRuleFilter;
    pub use crate::hub::services::{merge_content_items, NotificationTypeTable};
    pub use crate::ports::outbound::{
        Clock, Interrupted, PagedQuery, ProgressReporter, ResourceFetcher,
    };
    pub use crate::shared::{ExitCode, HubError, Result};
}
