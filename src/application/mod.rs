//! Application layer - Evaluation command and run orchestration.
//!
//! Coordinates domain logic with ports:
//! - `units` - Built-in market, financial and risk analysis units
//! - `Scheduler` - Concurrent unit execution with failure isolation
//! - `Synthesizer` - Final decision from unit results
//! - `ComparableEnricher` - Optional catalog lookup for comparables
//! - `EvaluateProjectHandler` - One complete evaluation run

mod enrichment;
mod evaluate_project;
mod scheduler;
mod synthesizer;
pub mod units;

pub use enrichment::{
    ComparableEnricher, DEFAULT_ENRICHMENT_TIMEOUT, DEFAULT_YEAR_WINDOW, ENRICHMENT_LIMIT,
};
pub use evaluate_project::{
    EvaluateProjectCommand, EvaluateProjectHandler, RunError, RunOutcome,
};
pub use scheduler::{Scheduler, SchedulerError, DEFAULT_UNIT_TIMEOUT};
pub use synthesizer::{
    SynthesisError, Synthesizer, DEFAULT_SYNTHESIS_TIMEOUT, SYNTHESIS_CALLER,
};
pub use units::{default_units, NarrativeSettings};
