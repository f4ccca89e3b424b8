use crate::application::dto::ScanWaitRequest;
use crate::hub::domain::{
    CodeLocationType, HubView, PollPhase, ScanPollState, ScanSummaryView, ScanTrackerState,
};
use crate::hub::services::hub_requests;
use crate::ports::outbound::{Clock, ProgressReporter, ResourceFetcher};
use crate::shared::error::describe_chain;
use crate::shared::{HubError, Result};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Pause between two polls of the hub
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Wait used when the requested one is not positive
pub const DEFAULT_SCAN_TIMEOUT_MS: u64 = 300_000;

/// ScanCompletionTracker - waits until the BOM import scans of a project
/// version have finished
///
/// The wait has two phases, each with its own timer:
/// 1. awaiting start: look the scans up until at least one is pending.
///    Lookup failures count as "nothing pending yet", since the project or
///    version may not exist when the wait begins.
/// 2. awaiting completion: refresh each pending scan, once right away and then
///    after every pause, until none is left. A scan in an error status, or a
///    failed refresh, ends the wait at once.
///
/// # Type Parameters
/// * `F` - ResourceFetcher implementation (must not cache)
/// * `C` - Clock implementation
/// * `PR` - ProgressReporter implementation
pub struct ScanCompletionTracker<F, C, PR> {
    fetcher: F,
    clock: C,
    progress_reporter: PR,
    timeout_ms: u64,
    last_poll_state: Mutex<ScanPollState>,
}

impl<F, C, PR> ScanCompletionTracker<F, C, PR>
where
    F: ResourceFetcher,
    C: Clock,
    PR: ProgressReporter,
{
    /// Creates a tracker; a `timeout_ms <= 0` is replaced by
    /// [`DEFAULT_SCAN_TIMEOUT_MS`] with a warning.
    pub fn new(fetcher: F, clock: C, progress_reporter: PR, timeout_ms: i64) -> Self {
        let timeout_ms = effective_timeout(timeout_ms, &progress_reporter);
        Self {
            fetcher,
            clock,
            progress_reporter,
            timeout_ms,
            last_poll_state: Mutex::new(ScanPollState::default()),
        }
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// State of the most recent wait, for inspection after it returned
    pub fn last_poll_state(&self) -> ScanPollState {
        self.last_poll_state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Runs the wait described by `request`
    pub async fn execute(&self, request: &ScanWaitRequest) -> std::result::Result<(), HubError> {
        let timeout_ms = match request.timeout_ms {
            Some(timeout_ms) => effective_timeout(timeout_ms, &self.progress_reporter),
            None => self.timeout_ms,
        };
        self.track(
            &request.project_name,
            &request.project_version_name,
            timeout_ms,
        )
        .await
    }

    /// Waits for the scans of `project_name`/`version_name` to start and then
    /// to complete, each within the tracker's timeout
    ///
    /// # Errors
    /// - [`HubError::Timeout`] when a phase outlives the timeout
    /// - [`HubError::RemoteJob`] when a pending scan reports an error status
    /// - [`HubError::Interrupted`] when the clock's sleep is cancelled
    /// - any fetch error raised while refreshing pending scans
    pub async fn await_scan_completion(
        &self,
        project_name: &str,
        version_name: &str,
    ) -> std::result::Result<(), HubError> {
        self.track(project_name, version_name, self.timeout_ms).await
    }

    /// Same as [`Self::await_scan_completion`] with a one-off timeout
    pub async fn await_scan_completion_with_timeout(
        &self,
        project_name: &str,
        version_name: &str,
        timeout_ms: i64,
    ) -> std::result::Result<(), HubError> {
        let timeout_ms = effective_timeout(timeout_ms, &self.progress_reporter);
        self.track(project_name, version_name, timeout_ms).await
    }

    /// Waits for already known pending scans to finish (completion phase only)
    pub async fn await_scans_finished(
        &self,
        pending: Vec<ScanSummaryView>,
    ) -> std::result::Result<(), HubError> {
        let mut state = ScanPollState::default();
        let result = self
            .await_completion(&mut state, pending, self.timeout_ms)
            .await;
        self.finish(state, &result, "the pending scans");
        result
    }

    async fn track(
        &self,
        project_name: &str,
        version_name: &str,
        timeout_ms: u64,
    ) -> std::result::Result<(), HubError> {
        let target = format!("{}/{}", project_name, version_name);
        let mut state = ScanPollState::default();
        let result = match self
            .await_start(&mut state, project_name, version_name, timeout_ms)
            .await
        {
            Ok(pending) => {
                self.progress_reporter.report(&format!(
                    "🔍 {} scan(s) of {} in progress",
                    pending.len(),
                    target
                ));
                self.await_completion(&mut state, pending, timeout_ms).await
            }
            Err(e) => Err(e),
        };
        self.finish(state, &result, &target);
        result
    }

    async fn await_start(
        &self,
        state: &mut ScanPollState,
        project_name: &str,
        version_name: &str,
        timeout_ms: u64,
    ) -> std::result::Result<Vec<ScanSummaryView>, HubError> {
        let phase = PollPhase::AwaitingStart;
        let mut pending = self.find_pending_scans(project_name, version_name).await;
        state.begin_phase(phase, self.clock.now_millis());
        state.record_poll(pending.clone());

        while pending.is_empty() {
            self.check_timeout(state, phase, timeout_ms)?;
            self.progress_reporter.report_progress(
                state.polls as usize,
                0,
                Some(&format!(
                    "Waiting for a scan of {}/{} to start",
                    project_name, version_name
                )),
            );
            self.pause(state, phase).await?;
            pending = self.find_pending_scans(project_name, version_name).await;
            state.record_poll(pending.clone());
        }
        Ok(pending)
    }

    async fn await_completion(
        &self,
        state: &mut ScanPollState,
        pending: Vec<ScanSummaryView>,
        timeout_ms: u64,
    ) -> std::result::Result<(), HubError> {
        let phase = PollPhase::AwaitingCompletion;
        // The timer starts after the first refresh
        let mut pending = self.refresh_or_fail(state, &pending).await?;
        state.begin_phase(phase, self.clock.now_millis());
        state.record_poll(pending.clone());

        while !pending.is_empty() {
            self.check_timeout(state, phase, timeout_ms)?;
            self.progress_reporter.report_progress(
                state.polls as usize,
                0,
                Some(&format!("{} scan(s) still pending", pending.len())),
            );
            self.pause(state, phase).await?;
            pending = self.refresh_or_fail(state, &pending).await?;
            state.record_poll(pending.clone());
        }

        state.finish(ScanTrackerState::Done);
        Ok(())
    }

    async fn refresh_or_fail(
        &self,
        state: &mut ScanPollState,
        pending: &[ScanSummaryView],
    ) -> std::result::Result<Vec<ScanSummaryView>, HubError> {
        self.refresh_pending_scans(pending).await.map_err(|e| {
            state.finish(ScanTrackerState::Failed);
            e
        })
    }

    fn check_timeout(
        &self,
        state: &mut ScanPollState,
        phase: PollPhase,
        timeout_ms: u64,
    ) -> std::result::Result<(), HubError> {
        let now = self.clock.now_millis();
        if state.has_timed_out(now, timeout_ms) {
            state.finish(ScanTrackerState::TimedOut);
            return Err(HubError::Timeout {
                phase,
                timeout_ms,
                elapsed_ms: state.elapsed_ms(now),
            });
        }
        Ok(())
    }

    async fn pause(
        &self,
        state: &mut ScanPollState,
        phase: PollPhase,
    ) -> std::result::Result<(), HubError> {
        if self.clock.sleep(POLL_INTERVAL).await.is_err() {
            state.finish(ScanTrackerState::Interrupted);
            return Err(HubError::Interrupted { phase });
        }
        Ok(())
    }

    /// Pending BOM import scans of the version; any failure reads as "none yet"
    async fn find_pending_scans(
        &self,
        project_name: &str,
        version_name: &str,
    ) -> Vec<ScanSummaryView> {
        self.lookup_pending_scans(project_name, version_name)
            .await
            .unwrap_or_default()
    }

    async fn lookup_pending_scans(
        &self,
        project_name: &str,
        version_name: &str,
    ) -> Result<Vec<ScanSummaryView>> {
        let project = hub_requests::project_by_name(&self.fetcher, project_name).await?;
        let version =
            hub_requests::project_version_by_name(&self.fetcher, &project, version_name).await?;
        let version_url = version.href()?;

        let code_locations =
            hub_requests::code_locations_of_type(&self.fetcher, CodeLocationType::BomImport)
                .await?;

        let mut pending = Vec::new();
        for code_location in code_locations
            .iter()
            .filter(|location| location.mapped_project_version.as_deref() == Some(version_url))
        {
            let scans = hub_requests::scan_summaries_of(&self.fetcher, code_location).await?;
            pending.extend(scans.into_iter().filter(|scan| scan.status.is_pending()));
        }
        Ok(pending)
    }

    /// Re-reads each scan by its own href and keeps the ones still pending
    async fn refresh_pending_scans(
        &self,
        pending: &[ScanSummaryView],
    ) -> std::result::Result<Vec<ScanSummaryView>, HubError> {
        let mut still_pending = Vec::new();
        for scan in pending {
            let href = scan.href()?;
            let refreshed: ScanSummaryView = self
                .fetcher
                .get_item(href)
                .await
                .map_err(|e| HubError::from_fetch(href, e))?;
            if refreshed.status.is_error() {
                return Err(HubError::RemoteJob {
                    status: refreshed.status,
                    message: refreshed.status_message,
                });
            }
            if refreshed.status.is_pending() {
                still_pending.push(refreshed);
            }
        }
        Ok(still_pending)
    }

    fn finish(
        &self,
        state: ScanPollState,
        result: &std::result::Result<(), HubError>,
        target: &str,
    ) {
        match result {
            Ok(()) => self
                .progress_reporter
                .report_completion(&format!("✅ All scans of {} completed", target)),
            Err(e) => self.progress_reporter.report_error(&format!(
                "❌ Stopped waiting for {}: {}",
                target,
                describe_chain(e)
            )),
        }
        *self
            .last_poll_state
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = state;
    }
}

fn effective_timeout<PR: ProgressReporter>(timeout_ms: i64, progress_reporter: &PR) -> u64 {
    if timeout_ms <= 0 {
        progress_reporter.report_error(&format!(
            "⚠️  {}ms is not a valid BOM wait time, using : {}ms instead",
            timeout_ms, DEFAULT_SCAN_TIMEOUT_MS
        ));
        return DEFAULT_SCAN_TIMEOUT_MS;
    }
    timeout_ms.unsigned_abs()
}
