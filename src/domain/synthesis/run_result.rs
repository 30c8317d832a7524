//! Run result and confidence aggregation.

use serde::{Deserialize, Serialize};

use crate::domain::analysis::UnitResults;
use crate::domain::foundation::Confidence;

use super::{RecommendationCategory, RecommendationClassifier, SummaryExtractor};

/// Final decision of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub recommendation: RecommendationCategory,
    pub confidence: Confidence,
    /// Full synthesis narrative.
    pub analysis: String,
    pub summary: String,
}

impl RunResult {
    /// Derives the decision from a synthesis narrative and the unit results.
    ///
    /// Everything except the narrative itself is deterministic.
    pub fn derive(narrative: impl Into<String>, results: &UnitResults) -> Self {
        let analysis = narrative.into();
        let overall_risk = results.risk_profile().map(|p| p.overall_score());

        Self {
            recommendation: RecommendationClassifier::categorize(&analysis, overall_risk),
            confidence: aggregate_confidence(results),
            summary: SummaryExtractor::extract(&analysis),
            analysis,
        }
    }
}

/// Mean confidence over non-degraded results; neutral 0.5 when none.
pub fn aggregate_confidence(results: &UnitResults) -> Confidence {
    Confidence::mean(results.successful().map(|r| r.confidence)).unwrap_or(Confidence::NEUTRAL)
}
