//! Logging progress observer.

use tracing::{info, warn};

use crate::domain::foundation::RunId;
use crate::ports::{ProgressObserver, UnitCompleted};

const BAR_WIDTH: usize = 40;

/// Reports scheduler progress through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingProgress;

impl ProgressObserver for LoggingProgress {
    fn on_unit_started(&self, run_id: &RunId, unit_id: &str) {
        info!(run_id = %run_id, unit = %unit_id, "Starting analysis unit");
    }

    fn on_unit_completed(&self, event: UnitCompleted) {
        let bar = progress_bar(event.completed, event.total, BAR_WIDTH);
        if event.degraded {
            warn!(
                run_id = %event.run_id,
                unit = %event.unit_id,
                completed = event.completed,
                total = event.total,
                "{} unit degraded",
                bar
            );
        } else {
            info!(
                run_id = %event.run_id,
                unit = %event.unit_id,
                completed = event.completed,
                total = event.total,
                "{}",
                bar
            );
        }
    }
}

/// Text progress bar: `[████░░░░] 50% (1/2)`.
pub fn progress_bar(current: usize, total: usize, width: usize) -> String {
    if total == 0 {
        return format!("[{}] 100% (0/0)", "█".repeat(width));
    }
    let current = current.min(total);
    let filled = width * current / total;
    let percentage = current as f64 / total as f64 * 100.0;

    format!(
        "[{}{}] {:.0}% ({}/{})",
        "█".repeat(filled),
        "░".repeat(width - filled),
        percentage,
        current,
        total
    )
}
