//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid timeout")]
    InvalidTimeout,

    #[error("Invalid max tokens")]
    InvalidMaxTokens,

    #[error("Temperature for {0} must be between 0.0 and 1.0")]
    InvalidTemperature(&'static str),

    #[error("Invalid catalog URL format")]
    InvalidCatalogUrl,

    #[error("Catalog year window must be at least one year")]
    InvalidYearWindow,
}
