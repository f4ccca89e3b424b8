/// Mock implementations for testing
mod fake_clock;
mod mock_progress_reporter;
mod mock_resource_fetcher;

// Only the scan tracker tests drive time
#[allow(unused_imports)]
pub use fake_clock::FakeClock;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_resource_fetcher::{MockResourceFetcher, BASE_URL};
