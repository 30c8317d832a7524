//! In-memory catalog for testing and offline runs.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::ports::{CatalogError, CatalogLookup, DiscoverQuery, Genre, MovieDetails, MovieSummary};

/// Catalog backed by a fixed list of movies.
///
/// A configured failure is returned from every query, which lets tests
/// exercise enrichment error handling.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    genres: Vec<Genre>,
    movies: Vec<MovieDetails>,
    failure: Option<CatalogError>,
    latency: Duration,
    requests: Arc<AtomicUsize>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_genre(mut self, id: u64, name: impl Into<String>) -> Self {
        self.genres.push(Genre::new(id, name));
        self
    }

    pub fn with_movie(mut self, movie: MovieDetails) -> Self {
        self.movies.push(movie);
        self
    }

    /// Makes every query fail with the given error.
    pub fn with_failure(mut self, error: CatalogError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Delays every query, simulating a slow remote catalog.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Number of queries served (including failed ones).
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    async fn begin(&self) -> Result<(), CatalogError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn summary(movie: &MovieDetails) -> MovieSummary {
        MovieSummary {
            id: movie.id,
            title: movie.title.clone(),
            release_date: movie.release_date.clone(),
            popularity: movie.popularity,
            vote_average: movie.vote_average,
            genre_ids: movie.genres.iter().map(|g| g.id).collect(),
        }
    }
}

#[async_trait]
impl CatalogLookup for InMemoryCatalog {
    async fn search_movies(
        &self,
        query: &str,
        year: Option<u16>,
    ) -> Result<Vec<MovieSummary>, CatalogError> {
        self.begin().await?;
        let needle = query.to_lowercase();

        Ok(self
            .movies
            .iter()
            .filter(|m| m.title.to_lowercase().contains(&needle))
            .filter(|m| year.is_none() || m.release_year() == year)
            .map(Self::summary)
            .collect())
    }

    async fn movie_details(&self, movie_id: u64) -> Result<MovieDetails, CatalogError> {
        self.begin().await?;
        self.movies
            .iter()
            .find(|m| m.id == movie_id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(format!("/movie/{}", movie_id)))
    }

    async fn genres(&self) -> Result<Vec<Genre>, CatalogError> {
        self.begin().await?;
        Ok(self.genres.clone())
    }

    async fn discover_movies(
        &self,
        query: &DiscoverQuery,
    ) -> Result<Vec<MovieSummary>, CatalogError> {
        self.begin().await?;

        let mut found: Vec<&MovieDetails> = self
            .movies
            .iter()
            .filter(|m| {
                query
                    .genre_ids
                    .iter()
                    .all(|id| m.genres.iter().any(|g| g.id == *id))
            })
            .filter(|m| query.year.is_none() || m.release_year() == query.year)
            .collect();
        found.sort_by(|a, b| b.popularity.total_cmp(&a.popularity));

        Ok(found.into_iter().map(Self::summary).collect())
    }
}
