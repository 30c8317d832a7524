//! TMDB Catalog - CatalogLookup over The Movie Database v3 REST API.
//!
//! Every request passes through a `RequestThrottle` so the client stays
//! under the API's request-rate ceiling regardless of how many callers
//! share it.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::ports::{CatalogError, CatalogLookup, DiscoverQuery, Genre, MovieDetails, MovieSummary};

use super::RequestThrottle;

/// Default spacing between requests (4 requests per second).
pub const DEFAULT_REQUEST_INTERVAL: Duration = Duration::from_millis(250);

/// Configuration for the TMDB client.
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    api_key: Secret<String>,
    pub base_url: String,
    pub request_interval: Duration,
    pub timeout: Duration,
}

impl TmdbConfig {
    pub fn new(api_key: Secret<String>) -> Self {
        Self {
            api_key,
            base_url: "https://api.themoviedb.org/3".to_string(),
            request_interval: DEFAULT_REQUEST_INTERVAL,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_request_interval(mut self, interval: Duration) -> Self {
        self.request_interval = interval;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// TMDB catalog client.
pub struct TmdbCatalog {
    config: TmdbConfig,
    client: Client,
    throttle: RequestThrottle,
}

impl TmdbCatalog {
    pub fn new(config: TmdbConfig) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CatalogError::Network(format!("HTTP client: {}", e)))?;
        let throttle = RequestThrottle::new(config.request_interval);

        Ok(Self {
            config,
            client,
            throttle,
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), endpoint)
    }

    /// Throttled GET returning the decoded JSON body.
    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, CatalogError> {
        self.throttle.acquire().await;
        debug!(endpoint, "TMDB request");

        let response = self
            .client
            .get(self.url(endpoint))
            .query(&[("api_key", self.config.api_key.expose_secret().as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status.as_u16(), endpoint, body));
        }

        response
            .json()
            .await
            .map_err(|e| CatalogError::Parse(format!("{}: {}", endpoint, e)))
    }
}

#[async_trait]
impl CatalogLookup for TmdbCatalog {
    async fn search_movies(
        &self,
        query: &str,
        year: Option<u16>,
    ) -> Result<Vec<MovieSummary>, CatalogError> {
        let mut params = vec![("query", query.to_string())];
        if let Some(year) = year {
            params.push(("year", year.to_string()));
        }
        let page: Paged<MovieSummary> = self.get("/search/movie", &params).await?;
        Ok(page.results)
    }

    async fn movie_details(&self, movie_id: u64) -> Result<MovieDetails, CatalogError> {
        self.get(&format!("/movie/{}", movie_id), &[]).await
    }

    async fn genres(&self) -> Result<Vec<Genre>, CatalogError> {
        let list: GenreList = self.get("/genre/movie/list", &[]).await?;
        Ok(list.genres)
    }

    async fn discover_movies(
        &self,
        query: &DiscoverQuery,
    ) -> Result<Vec<MovieSummary>, CatalogError> {
        let page: Paged<MovieSummary> = self.get("/discover/movie", &discover_params(query)).await?;
        Ok(page.results)
    }
}

fn discover_params(query: &DiscoverQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![("sort_by", query.sort_by.clone())];
    if !query.genre_ids.is_empty() {
        let ids: Vec<String> = query.genre_ids.iter().map(u64::to_string).collect();
        params.push(("with_genres", ids.join(",")));
    }
    if let Some(year) = query.year {
        params.push(("year", year.to_string()));
    }
    params
}

fn status_error(status: u16, endpoint: &str, body: String) -> CatalogError {
    match status {
        401 => CatalogError::Unauthorized,
        404 => CatalogError::NotFound(endpoint.to_string()),
        429 => CatalogError::RateLimited,
        _ => CatalogError::Http {
            status,
            message: body,
        },
    }
}

#[derive(Debug, Deserialize)]
struct Paged<T> {
    #[serde(default = "Vec::new")]
    results: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct GenreList {
    #[serde(default)]
    genres: Vec<Genre>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> TmdbCatalog {
        TmdbCatalog::new(
            TmdbConfig::new(Secret::new("key".to_string())).with_base_url("https://tmdb.test/3/"),
        )
        .unwrap()
    }

    #[test]
    fn url_joins_base_and_endpoint() {
        assert_eq!(catalog().url("/movie/42"), "https://tmdb.test/3/movie/42");
    }

    #[test]
    fn config_defaults_to_four_requests_per_second() {
        let config = TmdbConfig::new(Secret::new("key".to_string()));
        assert_eq!(config.request_interval, Duration::from_millis(250));
        assert_eq!(config.base_url, "https://api.themoviedb.org/3");
    }

    #[test]
    fn discover_params_include_filters() {
        let query = DiscoverQuery::new().with_genre(27).with_genre(53).with_year(2019);
        let params = discover_params(&query);

        assert!(params.contains(&("sort_by", "popularity.desc".to_string())));
        assert!(params.contains(&("with_genres", "27,53".to_string())));
        assert!(params.contains(&("year", "2019".to_string())));
    }

    #[test]
    fn discover_params_omit_empty_filters() {
        let params = discover_params(&DiscoverQuery::new());
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn status_errors_are_classified() {
        assert!(matches!(
            status_error(401, "/genre/movie/list", String::new()),
            CatalogError::Unauthorized
        ));
        assert!(matches!(
            status_error(404, "/movie/1", String::new()),
            CatalogError::NotFound(endpoint) if endpoint == "/movie/1"
        ));
        assert!(matches!(
            status_error(429, "/discover/movie", String::new()),
            CatalogError::RateLimited
        ));
        assert!(matches!(
            status_error(503, "/discover/movie", "down".to_string()),
            CatalogError::Http { status: 503, .. }
        ));
    }

    #[test]
    fn paged_results_decode_tmdb_shape() {
        let raw = r#"{"page":1,"results":[{"id":694,"title":"The Shining","release_date":"1980-05-23","popularity":40.5,"vote_average":8.2,"genre_ids":[27,53]}],"total_pages":1}"#;
        let page: Paged<MovieSummary> = serde_json::from_str(raw).unwrap();

        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].id, 694);
        assert_eq!(page.results[0].genre_ids, vec![27, 53]);
    }
}
