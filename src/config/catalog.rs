//! Movie catalog (TMDB) configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Catalog configuration used for comparable-title enrichment
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Enable enrichment when the project has no comparables
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// TMDB API key
    pub tmdb_api_key: Option<Secret<String>>,

    /// TMDB API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Minimum spacing between requests in milliseconds
    #[serde(default = "default_request_interval_ms")]
    pub request_interval_ms: u64,

    /// Number of past years searched for comparables
    #[serde(default = "default_year_window")]
    pub year_window: u16,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl CatalogConfig {
    pub fn request_interval(&self) -> Duration {
        Duration::from_millis(self.request_interval_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if a TMDB key is present
    pub fn has_tmdb(&self) -> bool {
        self.tmdb_api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().is_empty())
    }

    /// Enrichment runs only when enabled and a key is configured
    pub fn is_active(&self) -> bool {
        self.enabled && self.has_tmdb()
    }

    /// Validate catalog configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.enabled {
            return Ok(());
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidCatalogUrl);
        }
        if self.year_window == 0 {
            return Err(ValidationError::InvalidYearWindow);
        }
        Ok(())
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            tmdb_api_key: None,
            base_url: default_base_url(),
            request_interval_ms: default_request_interval_ms(),
            year_window: default_year_window(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_request_interval_ms() -> u64 {
    250
}

fn default_year_window() -> u16 {
    5
}

fn default_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_config_defaults() {
        let config = CatalogConfig::default();
        assert!(config.enabled);
        assert_eq!(config.request_interval(), Duration::from_millis(250));
        assert_eq!(config.year_window, 5);
        assert!(!config.is_active());
    }

    #[test]
    fn test_active_requires_key() {
        let config = CatalogConfig {
            tmdb_api_key: Some(Secret::new("tmdb-key".to_string())),
            ..Default::default()
        };
        assert!(config.is_active());

        let disabled = CatalogConfig {
            enabled: false,
            ..config
        };
        assert!(!disabled.is_active());
    }

    #[test]
    fn test_validation_rejects_bad_url() {
        let config = CatalogConfig {
            base_url: "api.themoviedb.org".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidCatalogUrl)));
    }

    #[test]
    fn test_validation_skipped_when_disabled() {
        let config = CatalogConfig {
            enabled: false,
            year_window: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
