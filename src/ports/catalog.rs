//! Catalog Lookup Port - Read-only access to a movie catalog.
//!
//! Used only for optional enrichment of project attributes. A run never
//! depends on the catalog being reachable.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::project::roi_percentage;

/// Titles inspected per discovered year when looking for comparables.
pub const COMPARABLES_PER_YEAR: usize = 5;

/// Maximum comparables returned by `find_comparable_titles`.
pub const MAX_COMPARABLES: usize = 10;

/// Port for movie catalog queries.
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    /// Searches movies by title, optionally filtered by release year.
    async fn search_movies(
        &self,
        query: &str,
        year: Option<u16>,
    ) -> Result<Vec<MovieSummary>, CatalogError>;

    /// Full details of one movie.
    async fn movie_details(&self, movie_id: u64) -> Result<MovieDetails, CatalogError>;

    /// All movie genres known to the catalog.
    async fn genres(&self) -> Result<Vec<Genre>, CatalogError>;

    /// Discovers movies matching the filters.
    async fn discover_movies(&self, query: &DiscoverQuery)
        -> Result<Vec<MovieSummary>, CatalogError>;

    /// Budget, revenue and ROI of one movie.
    async fn box_office(&self, movie_id: u64) -> Result<BoxOfficeData, CatalogError> {
        let details = self.movie_details(movie_id).await?;
        Ok(BoxOfficeData::new(details.budget, details.revenue))
    }

    /// Finds released titles in a genre within a budget and year range,
    /// highest revenue first.
    ///
    /// An unknown genre yields an empty list.
    async fn find_comparable_titles(
        &self,
        criteria: &ComparableCriteria,
    ) -> Result<Vec<ComparableTitle>, CatalogError> {
        let genres = self.genres().await?;
        let Some(genre) = genres
            .iter()
            .find(|g| g.name.eq_ignore_ascii_case(&criteria.genre))
        else {
            return Ok(Vec::new());
        };

        let mut titles = Vec::new();
        for year in criteria.start_year..=criteria.end_year {
            let query = DiscoverQuery::new()
                .with_genre(genre.id)
                .with_year(year);
            let movies = self.discover_movies(&query).await?;

            for movie in movies.iter().take(COMPARABLES_PER_YEAR) {
                let details = self.movie_details(movie.id).await?;
                if criteria.accepts_budget(details.budget) {
                    titles.push(ComparableTitle::from(details));
                }
            }
        }

        titles.sort_by(|a, b| b.revenue.cmp(&a.revenue));
        titles.truncate(MAX_COMPARABLES);
        Ok(titles)
    }
}

/// A movie as returned by search and discover queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub genre_ids: Vec<u64>,
}

/// Full movie details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub budget: u64,
    #[serde(default)]
    pub revenue: u64,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub genres: Vec<Genre>,
}

impl MovieDetails {
    /// Year parsed from the first four characters of the release date.
    pub fn release_year(&self) -> Option<u16> {
        self.release_date
            .as_deref()
            .and_then(|date| date.get(..4))
            .and_then(|year| year.parse().ok())
    }
}

/// A catalog genre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

impl Genre {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Filters for movie discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverQuery {
    pub genre_ids: Vec<u64>,
    pub year: Option<u16>,
    pub sort_by: String,
}

impl Default for DiscoverQuery {
    fn default() -> Self {
        Self {
            genre_ids: Vec::new(),
            year: None,
            sort_by: "popularity.desc".to_string(),
        }
    }
}

impl DiscoverQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_genre(mut self, genre_id: u64) -> Self {
        self.genre_ids.push(genre_id);
        self
    }

    pub fn with_year(mut self, year: u16) -> Self {
        self.year = Some(year);
        self
    }
}

/// Budget and revenue of one movie.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxOfficeData {
    pub budget: u64,
    pub revenue: u64,
    /// Return on investment in percent; 0 when the budget is unknown.
    pub roi: f64,
}

impl BoxOfficeData {
    pub fn new(budget: u64, revenue: u64) -> Self {
        Self {
            budget,
            revenue,
            roi: roi_percentage(revenue as f64, budget as f64),
        }
    }
}

/// Search criteria for comparable titles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparableCriteria {
    /// Genre name, matched case-insensitively.
    pub genre: String,
    pub min_budget: u64,
    pub max_budget: u64,
    pub start_year: u16,
    pub end_year: u16,
}

impl ComparableCriteria {
    /// True when the budget falls inside the inclusive budget range.
    pub fn accepts_budget(&self, budget: u64) -> bool {
        (self.min_budget..=self.max_budget).contains(&budget)
    }
}

/// A comparable title with its financials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparableTitle {
    pub title: String,
    pub year: Option<u16>,
    pub budget: u64,
    pub revenue: u64,
    pub rating: f64,
    pub popularity: f64,
}

impl From<MovieDetails> for ComparableTitle {
    fn from(details: MovieDetails) -> Self {
        Self {
            year: details.release_year(),
            title: details.title,
            budget: details.budget,
            revenue: details.revenue,
            rating: details.vote_average,
            popularity: details.popularity,
        }
    }
}

/// Catalog errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog authentication failed")]
    Unauthorized,

    #[error("catalog resource not found: {0}")]
    NotFound(String),

    #[error("catalog rate limited")]
    RateLimited,

    #[error("catalog request failed with status {status}: {message}")]
    Http { status: u16, message: String },

    #[error("catalog network error: {0}")]
    Network(String),

    #[error("catalog parse error: {0}")]
    Parse(String),
}
