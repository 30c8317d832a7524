//! Narrative Service Adapters.
//!
//! ## Available Adapters
//!
//! - `AnthropicNarrativeService` - Anthropic Messages API with retry
//! - `MockNarrativeService` - Configurable mock for testing

mod anthropic_narrative;
mod mock_narrative;

pub use anthropic_narrative::{
    AnthropicConfig, AnthropicNarrativeService, DEFAULT_MAX_TOKENS, DEFAULT_MODEL,
};
pub use mock_narrative::{MockError, MockNarrativeService, MockResponse, DEFAULT_MOCK_CONTENT};
