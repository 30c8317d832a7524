//! Analysis results produced by individual units.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{Confidence, Timestamp};
use crate::domain::project::{BudgetTier, Platform};

use super::{FinancialMetrics, RiskProfile};

/// Prefix of the findings text of every degraded result.
pub const FAILURE_PREFIX: &str = "Analysis failed: ";

/// Identity of an analysis unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitDescriptor {
    /// Stable key, unique within a run (e.g. `market_research`).
    pub id: String,
    /// Display name (e.g. "Market Research Agent").
    pub name: String,
    /// One-line description of what the unit covers.
    pub role: String,
}

impl UnitDescriptor {
    /// Creates a new descriptor.
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role: role.into(),
        }
    }
}

/// Market research metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketMetadata {
    pub genre: String,
    pub budget_category: BudgetTier,
    pub comparables_count: usize,
}

/// Financial modeling metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialMetadata {
    pub budget: u64,
    pub platform: Platform,
    pub genre: String,
    pub basic_metrics: FinancialMetrics,
}

/// Structured, unit-specific metadata attached to a result.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnitMetadata {
    /// No metadata. Degraded results always carry this.
    #[default]
    Empty,
    Market(MarketMetadata),
    Financial(FinancialMetadata),
    Risk(RiskProfile),
}

impl UnitMetadata {
    /// True when no metadata is attached.
    pub fn is_empty(&self) -> bool {
        matches!(self, UnitMetadata::Empty)
    }

    /// The risk profile, if this is risk metadata.
    pub fn risk_profile(&self) -> Option<&RiskProfile> {
        match self {
            UnitMetadata::Risk(profile) => Some(profile),
            _ => None,
        }
    }
}

/// Output of one analysis unit for one run.
///
/// Results are immutable once created. A degraded result stands in for a
/// unit that failed: zero confidence, a fixed failure message, no metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub unit_id: String,
    pub unit_name: String,
    pub role: String,
    /// Narrative findings; opaque to the engine.
    pub findings: String,
    pub confidence: Confidence,
    pub metadata: UnitMetadata,
    /// Failure description when the unit did not complete.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub created_at: Timestamp,
}

impl AnalysisResult {
    /// Creates a successful result.
    pub fn new(
        unit: &UnitDescriptor,
        findings: impl Into<String>,
        confidence: Confidence,
        metadata: UnitMetadata,
    ) -> Self {
        Self {
            unit_id: unit.id.clone(),
            unit_name: unit.name.clone(),
            role: unit.role.clone(),
            findings: findings.into(),
            confidence,
            metadata,
            error: None,
            created_at: Timestamp::now(),
        }
    }

    /// Creates the stand-in result for a failed unit.
    pub fn degraded(unit: &UnitDescriptor, error: impl fmt::Display) -> Self {
        let description = error.to_string();
        Self {
            unit_id: unit.id.clone(),
            unit_name: unit.name.clone(),
            role: unit.role.clone(),
            findings: format!("{}{}", FAILURE_PREFIX, description),
            confidence: Confidence::ZERO,
            metadata: UnitMetadata::Empty,
            error: Some(description),
            created_at: Timestamp::now(),
        }
    }

    /// True when this result stands in for a failed unit.
    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }

    /// The risk profile carried by this result, if any.
    pub fn risk_profile(&self) -> Option<&RiskProfile> {
        self.metadata.risk_profile()
    }
}
