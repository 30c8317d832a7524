//! Scheduler - Runs analysis units concurrently with failure isolation.
//!
//! Every unit is spawned on its own task and bounded by the unit timeout.
//! An error, panic or timeout in one unit becomes a degraded result for
//! that unit only. The returned results always hold exactly one entry per
//! registered unit, in declaration order.
//!
//! In `DependencyAware` mode units run in topological waves: units within a
//! wave still run concurrently, and each wave sees the results of the waves
//! before it. In `Concurrent` mode every unit starts at once with an empty
//! upstream snapshot.

use futures::stream::{FuturesUnordered, StreamExt};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinError;
use tracing::{debug, info, warn};

use crate::config::SchedulingMode;
use crate::domain::analysis::{AnalysisResult, UnitResults};
use crate::domain::foundation::RunId;
use crate::domain::project::ProjectAttributes;
use crate::ports::{
    AnalysisUnit, NoOpProgress, ProgressObserver, UnitCompleted, UnitContext, UnitError,
};

/// Default upper bound for one unit.
pub const DEFAULT_UNIT_TIMEOUT: Duration = Duration::from_secs(120);

/// Errors raised when registering units.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    #[error("duplicate unit id: {0}")]
    DuplicateUnit(String),

    #[error("unit '{unit}' depends on unknown unit '{dependency}'")]
    UnknownDependency { unit: String, dependency: String },

    #[error("dependency cycle among units: {}", .units.join(", "))]
    CyclicDependency { units: Vec<String> },
}

/// Concurrent runner for a fixed set of analysis units.
pub struct Scheduler {
    units: Vec<Arc<dyn AnalysisUnit>>,
    mode: SchedulingMode,
    /// Unit indices grouped into launch waves.
    waves: Vec<Vec<usize>>,
    unit_timeout: Duration,
    progress: Arc<dyn ProgressObserver>,
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("units", &self.unit_ids())
            .field("mode", &self.mode)
            .field("waves", &self.waves)
            .field("unit_timeout", &self.unit_timeout)
            .finish()
    }
}

impl Scheduler {
    /// Registers units in declaration order.
    ///
    /// # Errors
    ///
    /// - `DuplicateUnit` if two units share an id
    /// - `UnknownDependency` / `CyclicDependency` in dependency-aware mode
    pub fn new(
        units: Vec<Arc<dyn AnalysisUnit>>,
        mode: SchedulingMode,
    ) -> Result<Self, SchedulerError> {
        let mut seen = HashSet::new();
        for unit in &units {
            let id = &unit.descriptor().id;
            if !seen.insert(id.as_str()) {
                return Err(SchedulerError::DuplicateUnit(id.clone()));
            }
        }

        let waves = match mode {
            SchedulingMode::Concurrent => vec![(0..units.len()).collect()],
            SchedulingMode::DependencyAware => dependency_waves(&units)?,
        };

        Ok(Self {
            units,
            mode,
            waves,
            unit_timeout: DEFAULT_UNIT_TIMEOUT,
            progress: Arc::new(NoOpProgress),
        })
    }

    pub fn with_unit_timeout(mut self, timeout: Duration) -> Self {
        self.unit_timeout = timeout;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressObserver>) -> Self {
        self.progress = progress;
        self
    }

    /// Registered unit ids in declaration order.
    pub fn unit_ids(&self) -> Vec<&str> {
        self.units
            .iter()
            .map(|unit| unit.descriptor().id.as_str())
            .collect()
    }

    pub fn mode(&self) -> SchedulingMode {
        self.mode
    }

    /// Runs every unit once and collects one result per unit.
    ///
    /// Never fails: unit failures are folded into degraded results.
    pub async fn run(&self, run_id: RunId, project: Arc<ProjectAttributes>) -> UnitResults {
        let total = self.units.len();
        let mut slots: Vec<Option<AnalysisResult>> = vec![None; total];
        let mut completed = 0;

        info!(
            run_id = %run_id,
            units = total,
            waves = self.waves.len(),
            mode = ?self.mode,
            "Starting analysis units"
        );

        for wave in &self.waves {
            let upstream = match self.mode {
                SchedulingMode::Concurrent => Arc::new(UnitResults::new()),
                SchedulingMode::DependencyAware => {
                    Arc::new(slots.iter().flatten().cloned().collect::<UnitResults>())
                }
            };

            let mut pending = FuturesUnordered::new();
            for &index in wave {
                let unit = Arc::clone(&self.units[index]);
                let project = Arc::clone(&project);
                let context = UnitContext::new(run_id).with_upstream(Arc::clone(&upstream));
                let timeout = self.unit_timeout;

                self.progress.on_unit_started(&run_id, &unit.descriptor().id);
                debug!(run_id = %run_id, unit = %unit.descriptor().id, "Unit launched");

                let handle = tokio::spawn(async move {
                    match tokio::time::timeout(timeout, unit.produce(&project, &context)).await {
                        Ok(outcome) => outcome,
                        Err(_) => Err(UnitError::TimedOut {
                            timeout_secs: timeout.as_secs(),
                        }),
                    }
                });
                pending.push(async move { (index, handle.await) });
            }

            while let Some((index, joined)) = pending.next().await {
                let result = self.settle(run_id, index, joined);
                completed += 1;

                self.progress.on_unit_completed(UnitCompleted {
                    run_id,
                    unit_id: result.unit_id.clone(),
                    completed,
                    total,
                    degraded: result.is_degraded(),
                });
                slots[index] = Some(result);
            }
        }

        slots.into_iter().flatten().collect()
    }

    /// Turns a joined task into the unit's result, degrading on failure.
    fn settle(
        &self,
        run_id: RunId,
        index: usize,
        joined: Result<Result<AnalysisResult, UnitError>, JoinError>,
    ) -> AnalysisResult {
        let descriptor = self.units[index].descriptor();
        let error = match joined {
            Ok(Ok(result)) if result.unit_id == descriptor.id => {
                debug!(run_id = %run_id, unit = %descriptor.id, "Unit completed");
                return result;
            }
            Ok(Ok(result)) => UnitError::MismatchedResult {
                returned: result.unit_id,
            },
            Ok(Err(err)) => err,
            Err(join_err) => UnitError::Panicked(panic_message(join_err)),
        };

        warn!(
            run_id = %run_id,
            unit = %descriptor.id,
            error = %error,
            "Unit failed, using degraded result"
        );
        AnalysisResult::degraded(descriptor, &error)
    }
}

fn panic_message(err: JoinError) -> String {
    if err.is_cancelled() {
        return "task cancelled".to_string();
    }
    let payload = err.into_panic();
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Groups units into launch waves by their dependencies.
///
/// Units within a wave keep declaration order.
fn dependency_waves(units: &[Arc<dyn AnalysisUnit>]) -> Result<Vec<Vec<usize>>, SchedulerError> {
    let index_of: HashMap<&str, usize> = units
        .iter()
        .enumerate()
        .map(|(index, unit)| (unit.descriptor().id.as_str(), index))
        .collect();

    let mut waiting_on = vec![0usize; units.len()];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); units.len()];

    for (index, unit) in units.iter().enumerate() {
        for dependency in unit.depends_on() {
            let upstream = index_of.get(dependency.as_str()).copied().ok_or_else(|| {
                SchedulerError::UnknownDependency {
                    unit: unit.descriptor().id.clone(),
                    dependency: dependency.clone(),
                }
            })?;
            waiting_on[index] += 1;
            dependents[upstream].push(index);
        }
    }

    let mut waves = Vec::new();
    let mut placed = 0;
    let mut ready: Vec<usize> = (0..units.len()).filter(|&i| waiting_on[i] == 0).collect();

    while !ready.is_empty() {
        placed += ready.len();
        let mut next = Vec::new();
        for &index in &ready {
            for &dependent in &dependents[index] {
                waiting_on[dependent] -= 1;
                if waiting_on[dependent] == 0 {
                    next.push(dependent);
                }
            }
        }
        next.sort_unstable();
        waves.push(std::mem::replace(&mut ready, next));
    }

    if placed < units.len() {
        let cyclic = (0..units.len())
            .filter(|&i| waiting_on[i] > 0)
            .map(|i| units[i].descriptor().id.clone())
            .collect();
        return Err(SchedulerError::CyclicDependency { units: cyclic });
    }

    Ok(waves)
}
