//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `GREENLIGHT` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use greenlight::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Unit timeout: {:?}", config.run.unit_timeout());
//! ```

mod ai;
mod catalog;
mod error;
mod run;

pub use ai::{AiConfig, TemperatureConfig};
pub use catalog::CatalogConfig;
pub use error::{ConfigError, ValidationError};
pub use run::{RunConfig, SchedulingMode};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults; only the Anthropic API key must be supplied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Narrative service configuration (Anthropic)
    #[serde(default)]
    pub ai: AiConfig,

    /// Movie catalog configuration (TMDB)
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Run limits and scheduling
    #[serde(default)]
    pub run: RunConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `GREENLIGHT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `GREENLIGHT__AI__ANTHROPIC_API_KEY=...` -> `ai.anthropic_api_key`
    /// - `GREENLIGHT__AI__TEMPERATURES__RISK=0.6` -> `ai.temperatures.risk`
    /// - `GREENLIGHT__RUN__SCHEDULING=dependency_aware` -> `run.scheduling`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("GREENLIGHT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.catalog.validate()?;
        self.run.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::sync::Mutex;
    use std::time::Duration;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Helper to set environment variables for testing
    fn set_minimal_env() {
        env::set_var("GREENLIGHT__AI__ANTHROPIC_API_KEY", "sk-ant-xxx");
    }

    /// Helper to clear environment variables after testing
    fn clear_env() {
        env::remove_var("GREENLIGHT__AI__ANTHROPIC_API_KEY");
        env::remove_var("GREENLIGHT__AI__TEMPERATURES__RISK");
        env::remove_var("GREENLIGHT__CATALOG__TMDB_API_KEY");
        env::remove_var("GREENLIGHT__CATALOG__YEAR_WINDOW");
        env::remove_var("GREENLIGHT__RUN__UNIT_TIMEOUT_SECS");
        env::remove_var("GREENLIGHT__RUN__SCHEDULING");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        let key = config.ai.anthropic_api_key.as_ref().unwrap();
        assert_eq!(key.expose_secret(), "sk-ant-xxx");
    }

    #[test]
    fn test_validate_full_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_without_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.run.unit_timeout(), Duration::from_secs(120));
        assert_eq!(config.run.scheduling, SchedulingMode::Concurrent);
        assert_eq!(config.ai.temperatures.financial, 0.5);
        assert!(!config.catalog.is_active());
    }

    #[test]
    fn test_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("GREENLIGHT__AI__TEMPERATURES__RISK", "0.3");
        env::set_var("GREENLIGHT__CATALOG__TMDB_API_KEY", "tmdb-xxx");
        env::set_var("GREENLIGHT__CATALOG__YEAR_WINDOW", "3");
        env::set_var("GREENLIGHT__RUN__UNIT_TIMEOUT_SECS", "30");
        env::set_var("GREENLIGHT__RUN__SCHEDULING", "dependency_aware");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.ai.temperatures.risk, 0.3);
        assert!(config.catalog.is_active());
        assert_eq!(config.catalog.year_window, 3);
        assert_eq!(config.run.unit_timeout_secs, 30);
        assert_eq!(config.run.scheduling, SchedulingMode::DependencyAware);
    }

    #[test]
    fn test_validation_requires_api_key() {
        let config = AppConfig::default();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired(_))
        ));
    }
}
