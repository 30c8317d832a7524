//! Evaluation run configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// How the scheduler orders analysis units
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SchedulingMode {
    /// Every unit starts at once with an empty upstream snapshot
    #[default]
    Concurrent,
    /// Units start in dependency waves and see completed upstream results
    DependencyAware,
}

/// Per-run limits and scheduling
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    /// Upper bound for one analysis unit in seconds
    #[serde(default = "default_unit_timeout")]
    pub unit_timeout_secs: u64,

    /// Upper bound for the synthesis call in seconds
    #[serde(default = "default_synthesis_timeout")]
    pub synthesis_timeout_secs: u64,

    /// Upper bound for comparable-title enrichment in seconds
    #[serde(default = "default_enrichment_timeout")]
    pub enrichment_timeout_secs: u64,

    #[serde(default)]
    pub scheduling: SchedulingMode,
}

impl RunConfig {
    pub fn unit_timeout(&self) -> Duration {
        Duration::from_secs(self.unit_timeout_secs)
    }

    pub fn synthesis_timeout(&self) -> Duration {
        Duration::from_secs(self.synthesis_timeout_secs)
    }

    pub fn enrichment_timeout(&self) -> Duration {
        Duration::from_secs(self.enrichment_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.unit_timeout_secs == 0
            || self.synthesis_timeout_secs == 0
            || self.enrichment_timeout_secs == 0
        {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            unit_timeout_secs: default_unit_timeout(),
            synthesis_timeout_secs: default_synthesis_timeout(),
            enrichment_timeout_secs: default_enrichment_timeout(),
            scheduling: SchedulingMode::default(),
        }
    }
}

fn default_unit_timeout() -> u64 {
    120
}

fn default_synthesis_timeout() -> u64 {
    180
}

fn default_enrichment_timeout() -> u64 {
    60
}
