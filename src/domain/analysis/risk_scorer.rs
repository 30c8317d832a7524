//! Risk Scorer - Deterministic risk profile from discrete project attributes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::foundation::ValidationError;
use crate::domain::project::{Platform, ProjectAttributes};

use super::financial_calculator::round_one_decimal;

/// Overall score reported for a profile with no factors.
const EMPTY_PROFILE_SCORE: f64 = 5.0;

/// Named contributor to project risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    BudgetRisk,
    GenreRisk,
    PlatformRisk,
}

impl RiskFactor {
    /// Returns the wire name of this factor.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskFactor::BudgetRisk => "budget_risk",
            RiskFactor::GenreRisk => "genre_risk",
            RiskFactor::PlatformRisk => "platform_risk",
        }
    }
}

/// A single factor score between 1 and 10 inclusive.
///
/// Deserialization rejects out-of-range scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct RiskScore(u8);

impl RiskScore {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    /// Creates a new RiskScore, clamping to the valid range.
    pub fn new(value: u8) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    /// Creates a RiskScore, returning error if out of range.
    pub fn try_new(value: u8) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::out_of_range(
                "risk_score",
                f64::from(Self::MIN),
                f64::from(Self::MAX),
                f64::from(value),
            ));
        }
        Ok(Self(value))
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for RiskScore {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<RiskScore> for u8 {
    fn from(score: RiskScore) -> Self {
        score.0
    }
}

/// Risk band derived from an overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "Low Risk")]
    Low,
    #[serde(rename = "Low-Medium Risk")]
    LowMedium,
    #[serde(rename = "Medium Risk")]
    Medium,
    #[serde(rename = "Medium-High Risk")]
    MediumHigh,
    #[serde(rename = "High Risk")]
    High,
}

impl RiskLevel {
    /// Maps an overall score onto its band. Each band includes its lower bound.
    pub fn from_score(score: f64) -> Self {
        if score < 3.0 {
            RiskLevel::Low
        } else if score < 5.0 {
            RiskLevel::LowMedium
        } else if score < 7.0 {
            RiskLevel::Medium
        } else if score < 8.0 {
            RiskLevel::MediumHigh
        } else {
            RiskLevel::High
        }
    }

    /// Returns the display label for this level.
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::LowMedium => "Low-Medium Risk",
            RiskLevel::Medium => "Medium Risk",
            RiskLevel::MediumHigh => "Medium-High Risk",
            RiskLevel::High => "High Risk",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Per-factor risk scores.
///
/// The overall score and level are always derived from the factors and are
/// never stored on their own. Serialized output includes them for
/// consumers; deserialization recomputes them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "RiskProfileRecord", from = "RiskProfileRecord")]
pub struct RiskProfile {
    factors: BTreeMap<RiskFactor, RiskScore>,
}

impl RiskProfile {
    /// Creates an empty profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a factor score, replacing any previous value.
    pub fn with_factor(mut self, factor: RiskFactor, score: RiskScore) -> Self {
        self.factors.insert(factor, score);
        self
    }

    /// Returns the score for one factor.
    pub fn factor(&self, factor: RiskFactor) -> Option<RiskScore> {
        self.factors.get(&factor).copied()
    }

    /// All factor scores, ordered by factor.
    pub fn factors(&self) -> &BTreeMap<RiskFactor, RiskScore> {
        &self.factors
    }

    /// Mean of the factor scores rounded to one decimal (5.0 when empty).
    pub fn overall_score(&self) -> f64 {
        if self.factors.is_empty() {
            return EMPTY_PROFILE_SCORE;
        }
        let sum: u32 = self.factors.values().map(|s| u32::from(s.value())).sum();
        round_one_decimal(f64::from(sum) / self.factors.len() as f64)
    }

    /// Risk band for the overall score.
    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_score(self.overall_score())
    }
}

/// Serialized shape of a risk profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RiskProfileRecord {
    risk_factors: BTreeMap<RiskFactor, RiskScore>,
    #[serde(default)]
    overall_risk_score: f64,
    #[serde(default)]
    risk_level: Option<RiskLevel>,
}

impl From<RiskProfile> for RiskProfileRecord {
    fn from(profile: RiskProfile) -> Self {
        Self {
            overall_risk_score: profile.overall_score(),
            risk_level: Some(profile.risk_level()),
            risk_factors: profile.factors,
        }
    }
}

impl From<RiskProfileRecord> for RiskProfile {
    fn from(record: RiskProfileRecord) -> Self {
        Self {
            factors: record.risk_factors,
        }
    }
}

/// Scorer for project risk.
pub struct RiskScorer;

impl RiskScorer {
    /// Scores the three fixed factors for a project.
    pub fn score(budget: u64, genre: &str, platform: &Platform) -> RiskProfile {
        RiskProfile::new()
            .with_factor(RiskFactor::BudgetRisk, Self::budget_risk(budget))
            .with_factor(RiskFactor::GenreRisk, Self::genre_risk(genre))
            .with_factor(RiskFactor::PlatformRisk, Self::platform_risk(platform))
    }

    /// Scores a project's attributes.
    pub fn score_project(project: &ProjectAttributes) -> RiskProfile {
        Self::score(project.budget, &project.genre, &project.platform)
    }

    /// Bigger budgets carry more financial exposure; small ones less.
    pub fn budget_risk(budget: u64) -> RiskScore {
        let score = if budget > 100_000_000 {
            8
        } else if budget > 50_000_000 {
            6
        } else if budget < 5_000_000 {
            4
        } else {
            5
        };
        RiskScore::new(score)
    }

    /// Genre reliability. Unlisted genres, including "Unknown", score 7.
    pub fn genre_risk(genre: &str) -> RiskScore {
        let score = match genre {
            "Horror" => 3,
            "Action" => 6,
            "Comedy" => 5,
            "Drama" => 6,
            "Science Fiction" => 7,
            "Animation" => 5,
            _ => 7,
        };
        RiskScore::new(score)
    }

    /// Theatrical release is the riskiest window, streaming the safest.
    pub fn platform_risk(platform: &Platform) -> RiskScore {
        let score = match platform {
            Platform::Theatrical => 7,
            Platform::Streaming => 4,
            Platform::Hybrid | Platform::Other(_) => 5,
        };
        RiskScore::new(score)
    }
}
