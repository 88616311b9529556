//! Run-once lifecycle for a report.
//!
//! A report is produced at most once per process. The caller owns a
//! [`ReportRun`] and routes every trigger through it; any trigger after the
//! first is a no-op.

use tracing::debug;

/// Lifecycle state of a report run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunState {
    /// Nothing has run yet
    #[default]
    NotStarted,

    /// The report is being produced
    Running,

    /// The report has been produced
    Completed,
}

/// Guard that lets a report run execute at most once.
#[derive(Debug, Default)]
pub struct ReportRun {
    state: RunState,
}

impl ReportRun {
    /// Create a guard in the [`RunState::NotStarted`] state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: RunState::NotStarted,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> RunState {
        self.state
    }

    /// Execute `run` if nothing has run yet.
    ///
    /// Returns `Some` with the closure's result on the first call and `None`
    /// on every later call, without invoking the closure.
    pub fn run<T>(&mut self, run: impl FnOnce() -> T) -> Option<T> {
        if self.state != RunState::NotStarted {
            debug!(state = ?self.state, "report already triggered, ignoring");
            return None;
        }

        self.state = RunState::Running;
        let result = run();
        self.state = RunState::Completed;

        Some(result)
    }
}
