/// ProgressReporter port, the crate's logging seam
///
/// The scan tracker reports each poll through it and the notification
/// pipeline reports transform failures. Implementations must be
/// `Send + Sync` because trackers may run inside spawned tasks.
pub trait ProgressReporter: Send + Sync {
    /// Reports an informational message
    fn report(&self, message: &str);

    /// Reports progress of a counted operation
    ///
    /// # Arguments
    /// * `current` - Items handled so far
    /// * `total` - Items expected; `0` when unknown (e.g. polling)
    /// * `message` - Optional detail shown next to the counter
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports a warning or a recoverable failure
    fn report_error(&self, message: &str);

    /// Reports the end of an operation
    fn report_completion(&self, message: &str);
}
