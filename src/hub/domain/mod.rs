/// Hub resource views and the values the tracker and the notification
/// pipeline produce. No I/O happens here.
pub mod component;
pub mod content_item;
pub mod notification;
pub mod policy_status;
pub mod project;
pub mod resource;
pub mod scan_poll_state;
pub mod scan_status;

pub use component::{
    BomComponentPolicyStatusView, ComponentVersionView, PolicyRuleView,
    VulnerabilitySourceQualifiedId,
};
pub use content_item::{ContentPayload, NotificationContentItem};
pub use notification::{
    AffectedProjectVersion, ComponentVersionStatus, Notification, NotificationContent,
    NotificationKind, PolicyOverrideContent, PolicyViolationContent, RawNotification,
    VulnerabilityContent,
};
pub use policy_status::{
    ComponentVersionStatusCount, PolicyStatusDescription, PolicyStatusName,
    VersionBomPolicyStatusView,
};
pub use project::{
    CodeLocationType, CodeLocationView, ComplexLicenseView, FullProjectVersionView,
    ProjectVersionView, ProjectView,
};
pub use resource::{link, HubView, NamedView, ResourceLink, ResourceMetadata};
pub use scan_poll_state::{PollPhase, ScanPollState, ScanTrackerState};
pub use scan_status::{ScanSummaryStatus, ScanSummaryView};
