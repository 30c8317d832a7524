//! ComparableEnricher - Fills in comparable titles from a movie catalog.
//!
//! Enrichment is best effort. Catalog errors and lookups that exceed the
//! enrichment timeout are logged and the project is returned unchanged.

use chrono::{Datelike, Utc};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::domain::project::ProjectAttributes;
use crate::ports::{CatalogError, CatalogLookup, ComparableCriteria};

/// Maximum titles added to a project.
pub const ENRICHMENT_LIMIT: usize = 5;

/// Default number of release years searched, ending with the current one.
pub const DEFAULT_YEAR_WINDOW: u16 = 5;

/// Default upper bound for the whole comparable lookup.
pub const DEFAULT_ENRICHMENT_TIMEOUT: Duration = Duration::from_secs(60);

/// Adds comparable titles to projects that have none.
pub struct ComparableEnricher {
    catalog: Arc<dyn CatalogLookup>,
    year_window: u16,
    reference_year: Option<u16>,
    timeout: Duration,
}

impl ComparableEnricher {
    pub fn new(catalog: Arc<dyn CatalogLookup>) -> Self {
        Self {
            catalog,
            year_window: DEFAULT_YEAR_WINDOW,
            reference_year: None,
            timeout: DEFAULT_ENRICHMENT_TIMEOUT,
        }
    }

    /// Bounds the whole lookup, across every catalog request it makes.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_year_window(mut self, years: u16) -> Self {
        self.year_window = years.max(1);
        self
    }

    /// Fixes the last searched year instead of using the current year.
    pub fn with_reference_year(mut self, year: u16) -> Self {
        self.reference_year = Some(year);
        self
    }

    /// Search criteria for a project: same genre, 0.5x to 2x its budget.
    ///
    /// A project without a budget accepts titles of any budget.
    pub fn criteria_for(&self, project: &ProjectAttributes) -> ComparableCriteria {
        let end_year = self
            .reference_year
            .unwrap_or_else(|| u16::try_from(Utc::now().year()).unwrap_or(u16::MAX));
        let (min_budget, max_budget) = if project.has_budget() {
            (project.budget / 2, project.budget.saturating_mul(2))
        } else {
            (0, u64::MAX)
        };

        ComparableCriteria {
            genre: project.genre.clone(),
            min_budget,
            max_budget,
            start_year: end_year.saturating_sub(self.year_window - 1),
            end_year,
        }
    }

    /// Returns the project with comparables filled in when it had none.
    pub async fn enrich(&self, project: ProjectAttributes) -> ProjectAttributes {
        if project.has_comparables() || !project.has_known_genre() {
            return project;
        }

        let lookup = match tokio::time::timeout(self.timeout, self.lookup(&project)).await {
            Ok(lookup) => lookup,
            Err(_) => {
                warn!(
                    genre = %project.genre,
                    timeout_secs = self.timeout.as_secs(),
                    "Comparable lookup timed out, continuing without enrichment"
                );
                return project;
            }
        };

        match lookup {
            Ok(titles) if titles.is_empty() => {
                info!(genre = %project.genre, "No comparable titles found");
                project
            }
            Ok(titles) => {
                info!(
                    genre = %project.genre,
                    count = titles.len(),
                    "Enriched project with comparable titles"
                );
                project.with_comparables(titles)
            }
            Err(err) => {
                warn!(error = %err, "Comparable lookup failed, continuing without enrichment");
                project
            }
        }
    }

    async fn lookup(&self, project: &ProjectAttributes) -> Result<Vec<String>, CatalogError> {
        let criteria = self.criteria_for(project);
        let titles = self.catalog.find_comparable_titles(&criteria).await?;

        Ok(titles
            .into_iter()
            .take(ENRICHMENT_LIMIT)
            .map(|t| t.title)
            .collect())
    }
}
