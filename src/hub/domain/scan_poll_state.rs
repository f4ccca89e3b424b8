use super::scan_status::ScanSummaryView;
use serde::Serialize;
use std::fmt;

/// The two waits of a scan completion check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PollPhase {
    /// No pending scan has been seen yet
    AwaitingStart,
    /// At least one scan is pending; waiting for all of them to finish
    AwaitingCompletion,
}

impl PollPhase {
    pub fn timeout_message(self) -> &'static str {
        match self {
            PollPhase::AwaitingStart => "No scan has started within the specified wait time",
            PollPhase::AwaitingCompletion => {
                "The pending scans have not completed within the specified wait time"
            }
        }
    }

    pub fn interrupted_message(self) -> &'static str {
        match self {
            PollPhase::AwaitingStart => "The wait for the scan to start was interrupted",
            PollPhase::AwaitingCompletion => "The wait for the scan to complete was interrupted",
        }
    }
}

impl fmt::Display for PollPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PollPhase::AwaitingStart => write!(f, "awaiting start"),
            PollPhase::AwaitingCompletion => write!(f, "awaiting completion"),
        }
    }
}

/// Where a tracker is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScanTrackerState {
    NotStarted,
    AwaitingStart,
    AwaitingCompletion,
    Done,
    TimedOut,
    Failed,
    Interrupted,
}

impl ScanTrackerState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Done | Self::TimedOut | Self::Failed | Self::Interrupted
        )
    }
}

impl From<PollPhase> for ScanTrackerState {
    fn from(phase: PollPhase) -> Self {
        match phase {
            PollPhase::AwaitingStart => ScanTrackerState::AwaitingStart,
            PollPhase::AwaitingCompletion => ScanTrackerState::AwaitingCompletion,
        }
    }
}

/// Progress of one polling attempt.
///
/// The pending set is replaced wholesale on every poll, never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanPollState {
    pub state: ScanTrackerState,
    pub phase_started_at_ms: i64,
    pub polls: u32,
    pub pending: Vec<ScanSummaryView>,
}

impl Default for ScanPollState {
    fn default() -> Self {
        Self {
            state: ScanTrackerState::NotStarted,
            phase_started_at_ms: 0,
            polls: 0,
            pending: Vec::new(),
        }
    }
}

impl ScanPollState {
    /// Enters `phase`, restarting its timer at `now_ms`
    pub fn begin_phase(&mut self, phase: PollPhase, now_ms: i64) {
        self.state = phase.into();
        self.phase_started_at_ms = now_ms;
    }

    pub fn record_poll(&mut self, pending: Vec<ScanSummaryView>) {
        self.polls += 1;
        self.pending = pending;
    }

    pub fn finish(&mut self, state: ScanTrackerState) {
        self.state = state;
    }

    pub fn elapsed_ms(&self, now_ms: i64) -> u64 {
        u64::try_from(now_ms - self.phase_started_at_ms).unwrap_or(0)
    }

    /// Strictly greater: a check landing exactly on the deadline still counts.
    pub fn has_timed_out(&self, now_ms: i64, timeout_ms: u64) -> bool {
        self.elapsed_ms(now_ms) > timeout_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_phase_resets_timer() {
        let mut state = ScanPollState::default();
        assert_eq!(state.state, ScanTrackerState::NotStarted);

        state.begin_phase(PollPhase::AwaitingStart, 1_000);
        assert_eq!(state.state, ScanTrackerState::AwaitingStart);
        assert_eq!(state.elapsed_ms(6_000), 5_000);

        state.begin_phase(PollPhase::AwaitingCompletion, 20_000);
        assert_eq!(state.state, ScanTrackerState::AwaitingCompletion);
        assert_eq!(state.elapsed_ms(21_000), 1_000);
    }

    #[test]
    fn test_timeout_is_strictly_greater() {
        let mut state = ScanPollState::default();
        state.begin_phase(PollPhase::AwaitingStart, 0);
        assert!(!state.has_timed_out(10_000, 10_000));
        assert!(state.has_timed_out(10_001, 10_000));
    }

    #[test]
    fn test_clock_going_backwards_counts_as_zero_elapsed() {
        let mut state = ScanPollState::default();
        state.begin_phase(PollPhase::AwaitingStart, 5_000);
        assert_eq!(state.elapsed_ms(4_000), 0);
    }

    #[test]
    fn test_record_poll_replaces_pending() {
        let mut state = ScanPollState::default();
        state.record_poll(Vec::new());
        state.record_poll(Vec::new());
        assert_eq!(state.polls, 2);
        assert!(state.pending.is_empty());
    }

    #[test]
    fn test_terminal_states() {
        assert!(ScanTrackerState::Done.is_terminal());
        assert!(ScanTrackerState::TimedOut.is_terminal());
        assert!(!ScanTrackerState::AwaitingCompletion.is_terminal());
        assert!(!ScanTrackerState::NotStarted.is_terminal());
    }
}
