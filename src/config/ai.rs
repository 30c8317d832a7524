//! Narrative service configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Narrative service (Anthropic) configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Anthropic API key
    pub anthropic_api_key: Option<Secret<String>>,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Maximum tokens per narrative
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries on transient failure
    #[serde(default = "default_retries")]
    pub max_retries: u32,

    /// Sampling temperatures per caller
    #[serde(default)]
    pub temperatures: TemperatureConfig,
}

/// Sampling temperature per analysis unit and for synthesis
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TemperatureConfig {
    #[serde(default = "default_market_temperature")]
    pub market: f32,

    #[serde(default = "default_financial_temperature")]
    pub financial: f32,

    #[serde(default = "default_risk_temperature")]
    pub risk: f32,

    #[serde(default = "default_synthesis_temperature")]
    pub synthesis: f32,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if Anthropic is configured
    pub fn has_anthropic(&self) -> bool {
        self.anthropic_api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().is_empty())
    }

    /// Validate narrative service configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_anthropic() {
            return Err(ValidationError::MissingRequired("ANTHROPIC_API_KEY"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.max_tokens == 0 {
            return Err(ValidationError::InvalidMaxTokens);
        }
        self.temperatures.validate()
    }
}

impl TemperatureConfig {
    /// Every temperature must lie in 0.0..=1.0
    pub fn validate(&self) -> Result<(), ValidationError> {
        let all = [
            ("market", self.market),
            ("financial", self.financial),
            ("risk", self.risk),
            ("synthesis", self.synthesis),
        ];
        match all.iter().find(|(_, t)| !(0.0..=1.0).contains(t)) {
            Some((name, _)) => Err(ValidationError::InvalidTemperature(*name)),
            None => Ok(()),
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            anthropic_api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
            temperatures: TemperatureConfig::default(),
        }
    }
}

impl Default for TemperatureConfig {
    fn default() -> Self {
        Self {
            market: default_market_temperature(),
            financial: default_financial_temperature(),
            risk: default_risk_temperature(),
            synthesis: default_synthesis_temperature(),
        }
    }
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

fn default_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_timeout() -> u64 {
    60
}

fn default_retries() -> u32 {
    3
}

fn default_market_temperature() -> f32 {
    0.7
}

fn default_financial_temperature() -> f32 {
    0.5
}

fn default_risk_temperature() -> f32 {
    0.6
}

fn default_synthesis_temperature() -> f32 {
    0.7
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_key() -> AiConfig {
        AiConfig {
            anthropic_api_key: Some(Secret::new("sk-ant-xxx".to_string())),
            ..Default::default()
        }
    }

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.max_tokens, 4096);
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.temperatures.market, 0.7);
        assert_eq!(config.temperatures.financial, 0.5);
        assert_eq!(config.temperatures.risk, 0.6);
        assert_eq!(config.temperatures.synthesis, 0.7);
    }

    #[test]
    fn test_timeout_duration() {
        let config = AiConfig {
            timeout_secs: 30,
            ..Default::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_validation_missing_key() {
        assert!(matches!(
            AiConfig::default().validate(),
            Err(ValidationError::MissingRequired("ANTHROPIC_API_KEY"))
        ));

        let empty = AiConfig {
            anthropic_api_key: Some(Secret::new(String::new())),
            ..Default::default()
        };
        assert!(!empty.has_anthropic());
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(with_key().validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_out_of_range_temperature() {
        let config = AiConfig {
            temperatures: TemperatureConfig {
                risk: 1.5,
                ..Default::default()
            },
            ..with_key()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidTemperature("risk"))
        ));
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let config = AiConfig {
            timeout_secs: 0,
            ..with_key()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidTimeout)));
    }

    #[test]
    fn test_temperatures_deserialize_partially() {
        let json = r#"{"financial": 0.2}"#;
        let temps: TemperatureConfig = serde_json::from_str(json).unwrap();
        assert_eq!(temps.financial, 0.2);
        assert_eq!(temps.market, 0.7);
    }
}
