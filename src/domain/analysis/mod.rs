//! Analysis Module - Unit results and the pure scoring behind them.
//!
//! The narrative text of a unit is opaque; everything numeric about a result
//! is computed here from project attributes alone, so the same project
//! always yields the same confidence and metadata.
//!
//! # Components
//!
//! - `AnalysisResult` - One unit's output (findings, confidence, metadata)
//! - `UnitResults` - Ordered mapping of unit id to result for one run
//! - `RiskScorer` - Budget/genre/platform risk factors and overall risk level
//! - `FinancialCalculator` - Revenue and ROI benchmarks per platform
//! - `ConfidenceRules` - Additive confidence rules per unit
//!
//! # Design Philosophy
//!
//! All calculators are pure (no side effects) and stateless. No ports or
//! adapters are needed since there's no I/O here.

mod confidence_rules;
mod financial_calculator;
mod result;
mod results;
mod risk_scorer;

pub use confidence_rules::ConfidenceRules;
pub use financial_calculator::{FinancialCalculator, FinancialMetrics, VALUE_PER_SUBSCRIBER};
pub use result::{
    AnalysisResult, FinancialMetadata, MarketMetadata, UnitDescriptor, UnitMetadata,
    FAILURE_PREFIX,
};
pub use results::UnitResults;
pub use risk_scorer::{RiskFactor, RiskLevel, RiskProfile, RiskScore, RiskScorer};
