//! Anthropic Narrative Service - NarrativeService over the Messages API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = AnthropicConfig::new(api_key)
//!     .with_model("claude-sonnet-4-20250514")
//!     .with_max_retries(3);
//!
//! let service = AnthropicNarrativeService::new(config)?;
//! ```
//!
//! Transient failures (rate limits, 5xx, network errors, timeouts) are
//! retried with exponential backoff: 1s, 2s, 4s, ...

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

use crate::domain::conversation::MessageRole;
use crate::ports::{
    FinishReason, NarrativeError, NarrativeRequest, NarrativeResponse, NarrativeService,
    ServiceInfo, TokenUsage,
};

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Default maximum tokens when a request does not set one.
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Configuration for the Anthropic service.
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    api_key: Secret<String>,
    pub model: String,
    /// Base URL for the API (default: https://api.anthropic.com).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
}

impl AnthropicConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_secret(Secret::new(api_key.into()))
    }

    /// Creates a new configuration from an already wrapped key.
    pub fn from_secret(api_key: Secret<String>) -> Self {
        Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: "https://api.anthropic.com".to_string(),
            timeout: Duration::from_secs(60),
            max_retries: 3,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Anthropic API version header value.
const ANTHROPIC_API_VERSION: &str = "2023-06-01";

/// Narrative service backed by Anthropic's Messages API.
pub struct AnthropicNarrativeService {
    config: AnthropicConfig,
    client: Client,
}

impl AnthropicNarrativeService {
    /// Creates a new service with the given configuration.
    pub fn new(config: AnthropicConfig) -> Result<Self, NarrativeError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| NarrativeError::InvalidRequest(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.config.base_url.trim_end_matches('/'))
    }

    /// Converts our request to Anthropic's format.
    fn to_anthropic_request(&self, request: &NarrativeRequest) -> AnthropicRequest {
        let messages = request
            .conversation
            .messages()
            .iter()
            .filter_map(|msg| {
                // System context travels in its own field
                let role = match msg.role {
                    MessageRole::System => return None,
                    MessageRole::User => "user",
                    MessageRole::Assistant => "assistant",
                };
                Some(AnthropicMessage {
                    role: role.to_string(),
                    content: msg.content.clone(),
                })
            })
            .collect();

        AnthropicRequest {
            model: self.config.model.clone(),
            messages,
            system: request.system_prompt.clone(),
            max_tokens: request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            temperature: request.temperature,
        }
    }

    async fn send_request(&self, request: &NarrativeRequest) -> Result<Response, NarrativeError> {
        let anthropic_request = self.to_anthropic_request(request);

        self.client
            .post(self.messages_url())
            .header("x-api-key", self.config.api_key())
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .header("Content-Type", "application/json")
            .json(&anthropic_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    NarrativeError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    NarrativeError::network(format!("Connection failed: {}", e))
                } else {
                    NarrativeError::network(e.to_string())
                }
            })
    }

    async fn handle_response_status(&self, response: Response) -> Result<Response, NarrativeError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 | 403 => Err(NarrativeError::AuthenticationFailed),
            429 => Err(NarrativeError::rate_limited(Self::parse_retry_after(
                &error_body,
            ))),
            400 => Err(NarrativeError::InvalidRequest(error_body)),
            500..=599 => Err(NarrativeError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(NarrativeError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    /// Parses "try again in Ns" from an error body; 60s otherwise.
    fn parse_retry_after(error_body: &str) -> u32 {
        serde_json::from_str::<serde_json::Value>(error_body)
            .ok()
            .and_then(|parsed| {
                let message = parsed.get("error")?.get("message")?.as_str()?.to_string();
                let idx = message.find("try again in ")?;
                let digits: String = message[idx + 13..]
                    .chars()
                    .take_while(|c| c.is_ascii_digit())
                    .collect();
                digits.parse::<u32>().ok()
            })
            .unwrap_or(60)
    }

    async fn parse_response(&self, response: Response) -> Result<NarrativeResponse, NarrativeError> {
        let response = self.handle_response_status(response).await?;

        let anthropic_response: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| NarrativeError::parse(format!("Failed to parse response: {}", e)))?;

        Ok(anthropic_response.into_narrative())
    }

    async fn attempt(&self, request: &NarrativeRequest) -> Result<NarrativeResponse, NarrativeError> {
        let response = self.send_request(request).await?;
        self.parse_response(response).await
    }
}

#[async_trait]
impl NarrativeService for AnthropicNarrativeService {
    async fn generate(&self, request: NarrativeRequest) -> Result<NarrativeResponse, NarrativeError> {
        let mut retry_count = 0;

        loop {
            match self.attempt(&request).await {
                Ok(response) => return Ok(response),
                Err(err) if err.is_retryable() && retry_count < self.config.max_retries => {
                    let delay = Duration::from_secs(1 << retry_count);
                    warn!(
                        caller = %request.metadata.caller,
                        attempt = retry_count + 1,
                        error = %err,
                        "Narrative request failed, retrying in {:?}",
                        delay
                    );
                    sleep(delay).await;
                    retry_count += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn service_info(&self) -> ServiceInfo {
        ServiceInfo::new("anthropic", &self.config.model)
    }
}

// ----- Anthropic API Types -----

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    messages: Vec<AnthropicMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    model: String,
    content: Vec<ContentBlock>,
    stop_reason: Option<String>,
    usage: AnthropicUsage,
}

impl AnthropicResponse {
    fn into_narrative(self) -> NarrativeResponse {
        let content = self
            .content
            .into_iter()
            .filter(|block| block.block_type == "text")
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("");

        let finish_reason = match self.stop_reason.as_deref() {
            Some("max_tokens") => FinishReason::Length,
            _ => FinishReason::Stop,
        };

        NarrativeResponse {
            content,
            usage: TokenUsage::new(self.usage.input_tokens, self.usage.output_tokens),
            model: self.model,
            finish_reason,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::{Conversation, Message};
    use crate::domain::foundation::RunId;
    use crate::ports::RequestMetadata;

    fn service() -> AnthropicNarrativeService {
        AnthropicNarrativeService::new(AnthropicConfig::new("test-key")).unwrap()
    }

    #[test]
    fn config_builder_works() {
        let config = AnthropicConfig::new("test-key")
            .with_model("claude-3-haiku-20240307")
            .with_base_url("https://custom.api.com")
            .with_timeout(Duration::from_secs(30))
            .with_max_retries(5);

        assert_eq!(config.model, "claude-3-haiku-20240307");
        assert_eq!(config.base_url, "https://custom.api.com");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn request_moves_system_messages_out_of_conversation() {
        let mut conversation = Conversation::new();
        conversation.push(Message::system("ignored here"));
        conversation.push_user("Analyze this");

        let request = NarrativeRequest::new(RequestMetadata::new(RunId::new(), "risk_analysis"))
            .with_system_prompt("You are a risk analyst")
            .with_conversation(conversation)
            .with_temperature(0.6);

        let body = service().to_anthropic_request(&request);

        assert_eq!(body.messages.len(), 1);
        assert_eq!(body.messages[0].role, "user");
        assert_eq!(body.system.as_deref(), Some("You are a risk analyst"));
        assert_eq!(body.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(body.temperature, Some(0.6));
    }

    #[test]
    fn response_joins_text_blocks() {
        let raw = r#"{
            "model": "claude-sonnet-4-20250514",
            "content": [
                {"type": "text", "text": "Greenlight "},
                {"type": "tool_use"},
                {"type": "text", "text": "with conditions."}
            ],
            "stop_reason": "max_tokens",
            "usage": {"input_tokens": 100, "output_tokens": 20}
        }"#;
        let parsed: AnthropicResponse = serde_json::from_str(raw).unwrap();
        let response = parsed.into_narrative();

        assert_eq!(response.content, "Greenlight with conditions.");
        assert_eq!(response.finish_reason, FinishReason::Length);
        assert_eq!(response.usage.total_tokens, 120);
    }

    #[test]
    fn parse_retry_after_reads_message() {
        let body = r#"{"error":{"message":"Rate limited, try again in 12s"}}"#;
        assert_eq!(AnthropicNarrativeService::parse_retry_after(body), 12);
    }

    #[test]
    fn parse_retry_after_default() {
        let body = r#"{"error":{"message":"Rate limit exceeded"}}"#;
        assert_eq!(AnthropicNarrativeService::parse_retry_after(body), 60);
    }

    #[test]
    fn service_info_reports_model() {
        let info = service().service_info();
        assert_eq!(info.name, "anthropic");
        assert_eq!(info.model, DEFAULT_MODEL);
    }
}
