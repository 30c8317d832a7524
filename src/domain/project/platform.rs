//! Distribution platform.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Where the finished project is released.
///
/// Parsing never fails and matches wire names exactly. Anything else,
/// including an empty or differently cased value, is kept verbatim as
/// `Other`. Only an absent platform falls back to `Theatrical`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Platform {
    #[default]
    Theatrical,
    Streaming,
    Hybrid,
    Other(String),
}

impl Platform {
    /// Returns the wire name of this platform.
    pub fn as_str(&self) -> &str {
        match self {
            Platform::Theatrical => "theatrical",
            Platform::Streaming => "streaming",
            Platform::Hybrid => "hybrid",
            Platform::Other(name) => name,
        }
    }

    /// True for a cinema-first release.
    pub fn is_theatrical(&self) -> bool {
        matches!(self, Platform::Theatrical)
    }
}

impl FromStr for Platform {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "theatrical" => Platform::Theatrical,
            "streaming" => Platform::Streaming,
            "hybrid" => Platform::Hybrid,
            other => Platform::Other(other.to_string()),
        })
    }
}

impl From<String> for Platform {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(platform) => platform,
            Err(never) => match never {},
        }
    }
}

impl From<Platform> for String {
    fn from(value: Platform) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
