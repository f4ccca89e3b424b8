use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// A sleep was cancelled before it elapsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("sleep interrupted")]
pub struct Interrupted;

/// Clock port for the scan tracker
///
/// Polling reads the time and waits only through this port, so a fake clock
/// can drive the tracker through hours of polling instantly.
#[async_trait]
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch
    fn now_millis(&self) -> i64;

    /// Waits for `duration`, or returns [`Interrupted`] if cancelled first
    async fn sleep(&self, duration: Duration) -> Result<(), Interrupted>;
}
