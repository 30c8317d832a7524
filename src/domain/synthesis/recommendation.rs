//! Recommendation category derivation.
//!
//! Categorization is a lowercase keyword scan over the synthesis narrative
//! with fixed precedence. When no marker is found the overall risk score
//! decides, and ambiguous evidence never escalates to GO.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Final greenlight decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecommendationCategory {
    #[serde(rename = "GO")]
    Go,
    #[serde(rename = "CONDITIONAL GO")]
    ConditionalGo,
    #[serde(rename = "NO-GO")]
    NoGo,
}

impl RecommendationCategory {
    /// Returns the display label for this category.
    pub fn label(&self) -> &'static str {
        match self {
            RecommendationCategory::Go => "GO",
            RecommendationCategory::ConditionalGo => "CONDITIONAL GO",
            RecommendationCategory::NoGo => "NO-GO",
        }
    }
}

impl fmt::Display for RecommendationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

const NO_GO_MARKERS: [&str; 3] = ["no-go", "no go", "pass"];
const CONDITIONAL_MARKERS: [&str; 1] = ["conditional"];
const GO_MARKERS: [&str; 4] = ["greenlight", "go ahead", "recommend", "proceed"];

/// Overall risk above which an unmarked narrative is a NO-GO.
const NO_GO_RISK_THRESHOLD: f64 = 7.0;

/// Overall risk above which an unmarked narrative is a CONDITIONAL GO.
const CONDITIONAL_RISK_THRESHOLD: f64 = 5.0;

/// Pure classifier from narrative text to a recommendation category.
pub struct RecommendationClassifier;

impl RecommendationClassifier {
    /// Derives the category from the narrative and an optional overall risk
    /// score. The first matching marker group wins.
    pub fn categorize(narrative: &str, overall_risk: Option<f64>) -> RecommendationCategory {
        if let Some(category) = Self::from_markers(narrative) {
            return category;
        }

        match overall_risk {
            Some(score) if score > NO_GO_RISK_THRESHOLD => RecommendationCategory::NoGo,
            Some(score) if score > CONDITIONAL_RISK_THRESHOLD => {
                RecommendationCategory::ConditionalGo
            }
            _ => RecommendationCategory::ConditionalGo,
        }
    }

    /// Keyword scan only; `None` when no marker appears.
    ///
    /// Matching is substring based, so "pass" also matches words such as
    /// "compassion".
    pub fn from_markers(narrative: &str) -> Option<RecommendationCategory> {
        let text = narrative.to_lowercase();
        let contains_any = |markers: &[&str]| markers.iter().any(|m| text.contains(m));

        if contains_any(&NO_GO_MARKERS) {
            Some(RecommendationCategory::NoGo)
        } else if contains_any(&CONDITIONAL_MARKERS) {
            Some(RecommendationCategory::ConditionalGo)
        } else if contains_any(&GO_MARKERS) {
            Some(RecommendationCategory::Go)
        } else {
            None
        }
    }
}
