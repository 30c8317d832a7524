//! Progress Observer Port - Side channel for per-unit completion.
//!
//! Observers see units start and finish. They never influence result
//! content or order.

use crate::domain::foundation::RunId;

/// A unit finished, successfully or degraded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitCompleted {
    pub run_id: RunId,
    pub unit_id: String,
    /// Units finished so far in this run, including this one.
    pub completed: usize,
    pub total: usize,
    pub degraded: bool,
}

impl UnitCompleted {
    /// True when every unit of the run has finished.
    pub fn is_last(&self) -> bool {
        self.completed == self.total
    }
}

/// Callback for receiving scheduler progress.
pub trait ProgressObserver: Send + Sync {
    /// Called when a unit is launched.
    fn on_unit_started(&self, run_id: &RunId, unit_id: &str);

    /// Called when a unit finishes, in completion order.
    fn on_unit_completed(&self, event: UnitCompleted);
}

/// No-op observer for when progress isn't needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpProgress;

impl ProgressObserver for NoOpProgress {
    fn on_unit_started(&self, _run_id: &RunId, _unit_id: &str) {}
    fn on_unit_completed(&self, _event: UnitCompleted) {}
}
