//! Analysis Unit Port - A named capability that analyzes one project.
//!
//! Units are registered with the scheduler and run concurrently. A unit
//! returns its own errors; the scheduler turns them into degraded results.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::analysis::{AnalysisResult, UnitDescriptor, UnitResults};
use crate::domain::foundation::RunId;
use crate::domain::project::ProjectAttributes;

use super::NarrativeError;

/// Port for a single analysis capability.
#[async_trait]
pub trait AnalysisUnit: Send + Sync {
    /// Identity of this unit.
    fn descriptor(&self) -> &UnitDescriptor;

    /// Ids of units whose results this unit reads from its upstream
    /// snapshot. Only honored in dependency-aware scheduling.
    fn depends_on(&self) -> &[String] {
        &[]
    }

    /// Produces this unit's result for one project.
    async fn produce(
        &self,
        project: &ProjectAttributes,
        context: &UnitContext,
    ) -> Result<AnalysisResult, UnitError>;
}

/// Per-run context handed to a unit at launch.
#[derive(Debug, Clone)]
pub struct UnitContext {
    pub run_id: RunId,
    /// Results that were available when the unit was launched.
    pub upstream: Arc<UnitResults>,
}

impl UnitContext {
    /// Creates a context with an empty upstream snapshot.
    pub fn new(run_id: RunId) -> Self {
        Self {
            run_id,
            upstream: Arc::new(UnitResults::new()),
        }
    }

    /// Replaces the upstream snapshot.
    pub fn with_upstream(mut self, upstream: Arc<UnitResults>) -> Self {
        self.upstream = upstream;
        self
    }

    /// Non-degraded upstream result for a unit, if present.
    pub fn successful_upstream(&self, unit_id: &str) -> Option<&AnalysisResult> {
        self.upstream.get(unit_id).filter(|r| !r.is_degraded())
    }
}

/// Errors raised while a unit produces its result.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UnitError {
    #[error(transparent)]
    Narrative(#[from] NarrativeError),

    /// The narrative service answered with blank content.
    #[error("narrative service returned no content")]
    EmptyNarrative,

    /// The unit task panicked.
    #[error("unit panicked: {0}")]
    Panicked(String),

    /// The unit answered with a result carrying another unit's id.
    #[error("unit returned a result for '{returned}'")]
    MismatchedResult { returned: String },

    #[error("unit timed out after {timeout_secs}s")]
    TimedOut { timeout_secs: u64 },
}
