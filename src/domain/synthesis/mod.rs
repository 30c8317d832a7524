//! Synthesis module - Pure reduction of unit results into a decision.
//!
//! - `SynthesisContext` - Composite prompt for the final narrative call
//! - `RecommendationClassifier` - Keyword scan with risk fallback
//! - `SummaryExtractor` - Short summary from the narrative
//! - `RunResult` - Category, aggregate confidence, narrative and summary

mod context;
mod recommendation;
mod run_result;
mod summary;

pub use context::{SynthesisContext, FINAL_DECISION_INSTRUCTION};
pub use recommendation::{RecommendationCategory, RecommendationClassifier};
pub use run_result::{aggregate_confidence, RunResult};
pub use summary::{SummaryExtractor, SUMMARY_FALLBACK};
