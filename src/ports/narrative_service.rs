//! Narrative Service Port - Interface for prose generation.
//!
//! Analysis units and the synthesizer obtain their narrative text through
//! this port. The engine treats the returned content as opaque prose.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct CannedService;
//!
//! #[async_trait]
//! impl NarrativeService for CannedService {
//!     async fn generate(&self, request: NarrativeRequest) -> Result<NarrativeResponse, NarrativeError> {
//!         Ok(NarrativeResponse::new("Greenlight it.", "canned"))
//!     }
//!
//!     fn service_info(&self) -> ServiceInfo {
//!         ServiceInfo::new("canned", "canned")
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::conversation::Conversation;
use crate::domain::foundation::RunId;

/// Port for narrative generation.
#[async_trait]
pub trait NarrativeService: Send + Sync {
    /// Generates one narrative for the given conversation.
    async fn generate(&self, request: NarrativeRequest) -> Result<NarrativeResponse, NarrativeError>;

    /// Service name and model, for logging.
    fn service_info(&self) -> ServiceInfo;
}

/// Request for one narrative.
#[derive(Debug, Clone)]
pub struct NarrativeRequest {
    /// System context guiding the model.
    pub system_prompt: Option<String>,
    /// Caller-owned conversation, sent as-is.
    pub conversation: Conversation,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub metadata: RequestMetadata,
}

impl NarrativeRequest {
    /// Creates an empty request with the given metadata.
    pub fn new(metadata: RequestMetadata) -> Self {
        Self {
            system_prompt: None,
            conversation: Conversation::new(),
            temperature: None,
            max_tokens: None,
            metadata,
        }
    }

    /// Sets the system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Sets the conversation.
    pub fn with_conversation(mut self, conversation: Conversation) -> Self {
        self.conversation = conversation;
        self
    }

    /// Sets the temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the maximum tokens to generate.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }
}

/// Request metadata for tracing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestMetadata {
    pub run_id: RunId,
    /// Id of the unit (or "synthesis") issuing the call.
    pub caller: String,
}

impl RequestMetadata {
    pub fn new(run_id: RunId, caller: impl Into<String>) -> Self {
        Self {
            run_id,
            caller: caller.into(),
        }
    }
}

/// Response from the narrative service.
#[derive(Debug, Clone)]
pub struct NarrativeResponse {
    pub content: String,
    pub usage: TokenUsage,
    /// Model that generated the response.
    pub model: String,
    pub finish_reason: FinishReason,
}

impl NarrativeResponse {
    /// Creates a response that stopped naturally with no usage recorded.
    pub fn new(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            usage: TokenUsage::zero(),
            model: model.into(),
            finish_reason: FinishReason::Stop,
        }
    }
}

/// Token usage reported by the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }
}

/// Reason the model stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural stop (end of response).
    Stop,
    /// Hit max_tokens limit.
    Length,
    /// Content was filtered for safety.
    ContentFilter,
    Error,
}

/// Service information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub name: String,
    pub model: String,
}

impl ServiceInfo {
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// Narrative service errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum NarrativeError {
    /// Rate limited by provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// Content was filtered for safety.
    #[error("content filtered: {reason}")]
    ContentFiltered { reason: String },

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable { message: String },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },
}

impl NarrativeError {
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    pub fn content_filtered(reason: impl Into<String>) -> Self {
        Self::ContentFiltered {
            reason: reason.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            NarrativeError::RateLimited { .. }
                | NarrativeError::Unavailable { .. }
                | NarrativeError::Network(_)
                | NarrativeError::Timeout { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> RequestMetadata {
        RequestMetadata::new(RunId::new(), "market_research")
    }

    #[test]
    fn request_builder_works() {
        let request = NarrativeRequest::new(metadata())
            .with_system_prompt("Be precise")
            .with_conversation(Conversation::from_user("Analyze"))
            .with_temperature(0.5)
            .with_max_tokens(4096);

        assert_eq!(request.system_prompt.as_deref(), Some("Be precise"));
        assert_eq!(request.conversation.len(), 1);
        assert_eq!(request.temperature, Some(0.5));
        assert_eq!(request.max_tokens, Some(4096));
        assert_eq!(request.metadata.caller, "market_research");
    }

    #[test]
    fn token_usage_calculates_total() {
        let usage = TokenUsage::new(100, 50);
        assert_eq!(usage.total_tokens, 150);
        assert_eq!(TokenUsage::zero().total_tokens, 0);
    }

    #[test]
    fn retryable_classification() {
        assert!(NarrativeError::rate_limited(30).is_retryable());
        assert!(NarrativeError::unavailable("down").is_retryable());
        assert!(NarrativeError::network("reset").is_retryable());
        assert!(NarrativeError::Timeout { timeout_secs: 30 }.is_retryable());

        assert!(!NarrativeError::AuthenticationFailed.is_retryable());
        assert!(!NarrativeError::content_filtered("bad").is_retryable());
        assert!(!NarrativeError::parse("junk").is_retryable());
    }

    #[test]
    fn errors_display_correctly() {
        assert_eq!(
            NarrativeError::rate_limited(30).to_string(),
            "rate limited: retry after 30s"
        );
        assert_eq!(
            NarrativeError::unavailable("down").to_string(),
            "provider unavailable: down"
        );
    }

    #[test]
    fn finish_reason_serializes_snake_case() {
        let json = serde_json::to_string(&FinishReason::ContentFilter).unwrap();
        assert_eq!(json, "\"content_filter\"");
    }
}
