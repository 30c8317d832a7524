//! Confidence Rules - Additive confidence per analysis unit.
//!
//! Each rule starts from a base value and adds fixed increments for the
//! inputs that are present, capped at 1.0.

use crate::domain::foundation::Confidence;
use crate::domain::project::ProjectAttributes;

/// Rules for deterministic unit confidence.
pub struct ConfidenceRules;

impl ConfidenceRules {
    pub const MARKET_BASE: f64 = 0.7;
    pub const FINANCIAL_BASE: f64 = 0.6;
    pub const RISK_BASE: f64 = 0.6;

    /// Weight of data completeness in the risk confidence.
    pub const RISK_COMPLETENESS_WEIGHT: f64 = 0.3;

    /// Market research: comparables matter most, a budget helps.
    pub fn market(project: &ProjectAttributes) -> Confidence {
        let mut confidence = Self::MARKET_BASE;
        if project.has_comparables() {
            confidence += 0.2;
        }
        if project.has_budget() {
            confidence += 0.1;
        }
        Confidence::new(confidence.min(1.0))
    }

    /// Financial modeling: a budget and market findings each add 0.2.
    pub fn financial(project: &ProjectAttributes, has_market_findings: bool) -> Confidence {
        let mut confidence = Self::FINANCIAL_BASE;
        if project.has_budget() {
            confidence += 0.2;
        }
        if has_market_findings {
            confidence += 0.2;
        }
        Confidence::new(confidence.min(1.0))
    }

    /// Risk analysis: base plus a share proportional to data completeness.
    pub fn risk(project: &ProjectAttributes) -> Confidence {
        let confidence =
            Self::RISK_BASE + Self::data_completeness(project) * Self::RISK_COMPLETENESS_WEIGHT;
        Confidence::new(confidence.min(1.0))
    }

    /// Fraction of the five descriptive inputs that carry real data.
    pub fn data_completeness(project: &ProjectAttributes) -> f64 {
        let present = [
            !project.description.trim().is_empty(),
            project.has_budget(),
            project.has_known_genre(),
            !project.platform.as_str().is_empty(),
            !project.target_audience.trim().is_empty(),
        ]
        .iter()
        .filter(|present| **present)
        .count();

        present as f64 / 5.0
    }
}
