//! The submit → poll → terminal state machine behind the upload view.
//!
//! The engine is pure: the view's coroutine feeds it events and performs
//! the I/O it decides on. Every scheduled side effect carries the run id
//! it was created under, and events from an abandoned run are ignored at
//! the boundary. That guard is what makes cancellation immediate even
//! with a poll still in flight: the late resolution arrives, matches a
//! stale run id, and is discarded without touching state, storage, or
//! navigation.

use crate::core::timing::InstantStamp;
use crate::net::schema::AnalysisReport;

/// Poll cadence against `GET /result/{task_id}`.
pub const POLL_INTERVAL_MS: u64 = 2_000;
/// Cadence of the elapsed counter on the analysis overlay.
pub const TICK_INTERVAL_MS: u64 = 1_000;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum AnalysisPhase {
    #[default]
    Idle,
    Submitting,
    Polling {
        task_id: String,
    },
}

/// Outcome of feeding a poll response into the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// Status still pending; schedule the next poll.
    Continue,
    /// Terminal status reached; the run is over.
    Finished {
        report: AnalysisReport,
        elapsed_seconds: u64,
    },
    /// The event belonged to a cancelled or superseded run.
    Ignored,
}

#[derive(Debug, Clone, Default)]
pub struct AnalysisEngine {
    run_id: u64,
    phase: AnalysisPhase,
    started_at: Option<InstantStamp>,
}

impl AnalysisEngine {
    pub fn phase(&self) -> &AnalysisPhase {
        &self.phase
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.phase, AnalysisPhase::Idle)
    }

    /// Whether a scheduled effect stamped with `run_id` is still current.
    pub fn is_current(&self, run_id: u64) -> bool {
        run_id == self.run_id && self.is_active()
    }

    /// Starts a new run and returns the run id its side effects must
    /// carry. `None` while another run is active — the submit control is
    /// disabled then, this is the backstop.
    pub fn begin(&mut self, now: InstantStamp) -> Option<u64> {
        if self.is_active() {
            return None;
        }
        self.run_id += 1;
        self.phase = AnalysisPhase::Submitting;
        self.started_at = Some(now);
        Some(self.run_id)
    }

    /// Marks the backend task as created; polling may start.
    pub fn task_created(&mut self, run_id: u64, task_id: String) -> bool {
        if run_id != self.run_id || !matches!(self.phase, AnalysisPhase::Submitting) {
            return false;
        }
        self.phase = AnalysisPhase::Polling { task_id };
        true
    }

    /// Feeds one poll response in. Terminal statuses finish the run and
    /// hand back the wall-clock duration measured from `begin`.
    pub fn report_received(
        &mut self,
        run_id: u64,
        report: AnalysisReport,
        now: InstantStamp,
    ) -> PollOutcome {
        if run_id != self.run_id || !matches!(self.phase, AnalysisPhase::Polling { .. }) {
            return PollOutcome::Ignored;
        }
        if report.status.is_terminal() {
            let elapsed_seconds = self.elapsed_seconds(now);
            self.finish();
            PollOutcome::Finished {
                report,
                elapsed_seconds,
            }
        } else {
            PollOutcome::Continue
        }
    }

    /// Abandons the run after a failed submission or poll. Returns false
    /// when the failure belongs to a run that is already gone.
    pub fn fail(&mut self, run_id: u64) -> bool {
        if run_id != self.run_id || !self.is_active() {
            return false;
        }
        self.finish();
        true
    }

    /// Cancels the active run. Returns the task id to notify when the
    /// backend task had already been created.
    pub fn cancel(&mut self) -> Option<String> {
        let task_id = match std::mem::take(&mut self.phase) {
            AnalysisPhase::Polling { task_id } => Some(task_id),
            AnalysisPhase::Idle | AnalysisPhase::Submitting => None,
        };
        // Stale-out every scheduled effect of the abandoned run.
        self.run_id += 1;
        self.started_at = None;
        task_id
    }

    /// Wall-clock seconds since the run began.
    pub fn elapsed_seconds(&self, now: InstantStamp) -> u64 {
        self.started_at
            .map(|start| start.seconds_until(now))
            .unwrap_or(0)
    }

    fn finish(&mut self) {
        self.phase = AnalysisPhase::Idle;
        self.started_at = None;
        // A finished run's pending timers are stale too.
        self.run_id += 1;
    }
}
