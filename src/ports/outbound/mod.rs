/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define what the tracker and the notification pipeline need
/// from the outside world: hub resources, time, and a place to log.
pub mod clock;
pub mod progress_reporter;
pub mod resource_fetcher;

pub use clock::{Clock, Interrupted};
pub use progress_reporter::ProgressReporter;
pub use resource_fetcher::{PagedQuery, ResourceFetcher, DEFAULT_PAGE_SIZE};
