use crate::ports::outbound::{Clock, Interrupted};
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::watch;

/// SystemClock adapter backed by the wall clock and tokio timers
///
/// A clock built with [`SystemClock::cancellable`] ends any ongoing or future
/// sleep with [`Interrupted`] once its [`CancelHandle`] fires.
#[derive(Debug, Clone, Default)]
pub struct SystemClock {
    cancel: Option<watch::Receiver<bool>>,
}

/// Cancels the sleeps of the clock it was created with
#[derive(Debug)]
pub struct CancelHandle {
    sender: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancellable() -> (Self, CancelHandle) {
        let (sender, receiver) = watch::channel(false);
        (
            Self {
                cancel: Some(receiver),
            },
            CancelHandle { sender },
        )
    }
}

#[async_trait]
impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }

    async fn sleep(&self, duration: Duration) -> Result<(), Interrupted> {
        let Some(cancel) = &self.cancel else {
            tokio::time::sleep(duration).await;
            return Ok(());
        };
        let mut cancel = cancel.clone();

        let cancelled = async move {
            let fired = cancel.wait_for(|cancelled| *cancelled).await.is_ok();
            if !fired {
                // Handle dropped without cancelling: never interrupt
                std::future::pending::<()>().await;
            }
        };

        tokio::select! {
            _ = tokio::time::sleep(duration) => Ok(()),
            _ = cancelled => Err(Interrupted),
        }
    }
}
