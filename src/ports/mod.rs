//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Analysis Ports
//!
//! - `AnalysisUnit` - A named capability producing one analysis result
//! - `ProgressObserver` - Side channel for per-unit completion
//!
//! ## External Service Ports
//!
//! - `NarrativeService` - Prose generation (LLM)
//! - `CatalogLookup` - Read-only movie catalog used for enrichment

mod analysis_unit;
mod catalog;
mod narrative_service;
mod progress;

pub use analysis_unit::{AnalysisUnit, UnitContext, UnitError};
pub use catalog::{
    BoxOfficeData, CatalogError, CatalogLookup, ComparableCriteria, ComparableTitle,
    DiscoverQuery, Genre, MovieDetails, MovieSummary, COMPARABLES_PER_YEAR, MAX_COMPARABLES,
};
pub use narrative_service::{
    FinishReason, NarrativeError, NarrativeRequest, NarrativeResponse, NarrativeService,
    RequestMetadata, ServiceInfo, TokenUsage,
};
pub use progress::{NoOpProgress, ProgressObserver, UnitCompleted};
