use async_trait::async_trait;
use hub_integration::prelude::*;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Clock whose sleeps return at once and move time forward
#[derive(Default, Clone)]
pub struct FakeClock {
    now_ms: Arc<AtomicI64>,
    sleeps: Arc<AtomicUsize>,
    interrupt_after: Option<usize>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// The sleep following `completed_sleeps` successful ones is interrupted
    pub fn interrupting_after(completed_sleeps: usize) -> Self {
        Self {
            interrupt_after: Some(completed_sleeps),
            ..Self::default()
        }
    }

    pub fn sleep_count(&self) -> usize {
        self.sleeps.load(Ordering::SeqCst)
    }

    pub fn elapsed_ms(&self) -> i64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Clock for FakeClock {
    fn now_millis(&self) -> i64 {
        self.now_ms.load(Ordering::SeqCst)
    }

    async fn sleep(&self, duration: Duration) -> std::result::Result<(), Interrupted> {
        if self.interrupt_after == Some(self.sleeps.load(Ordering::SeqCst)) {
            return Err(Interrupted);
        }
        self.sleeps.fetch_add(1, Ordering::SeqCst);
        self.now_ms
            .fetch_add(duration.as_millis() as i64, Ordering::SeqCst);
        Ok(())
    }
}
