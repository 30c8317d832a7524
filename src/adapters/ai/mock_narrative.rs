//! Mock Narrative Service for testing.
//!
//! Units run concurrently against one shared service, so responses can be
//! scripted per caller (the unit id or "synthesis") in addition to a shared
//! fallback queue.
//!
//! # Example
//!
//! ```ignore
//! let service = MockNarrativeService::new()
//!     .with_response_for("market_research", "Strong market.")
//!     .with_error_for("risk_analysis", MockError::Unavailable { message: "down".into() })
//!     .with_delay_for("financial_model", Duration::from_millis(50));
//! ```

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    FinishReason, NarrativeError, NarrativeRequest, NarrativeResponse, NarrativeService,
    ServiceInfo, TokenUsage,
};

/// Content returned once every scripted response is used up.
pub const DEFAULT_MOCK_CONTENT: &str = "Mock response";

/// Mock narrative service for testing.
#[derive(Debug, Clone)]
pub struct MockNarrativeService {
    /// Responses for any caller (consumed in order).
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Responses scripted for one caller (consumed in order).
    caller_responses: Arc<Mutex<HashMap<String, VecDeque<MockResponse>>>>,
    caller_delays: HashMap<String, Duration>,
    delay: Duration,
    info: ServiceInfo,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<NarrativeRequest>>>,
}

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success { content: String, usage: TokenUsage },
    Error(MockError),
}

/// Mock error types for testing error handling.
#[derive(Debug, Clone)]
pub enum MockError {
    RateLimited { retry_after_secs: u32 },
    ContentFiltered { reason: String },
    Unavailable { message: String },
    AuthenticationFailed,
    Network { message: String },
    Timeout { timeout_secs: u32 },
}

impl From<MockError> for NarrativeError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => {
                NarrativeError::rate_limited(retry_after_secs)
            }
            MockError::ContentFiltered { reason } => NarrativeError::content_filtered(reason),
            MockError::Unavailable { message } => NarrativeError::unavailable(message),
            MockError::AuthenticationFailed => NarrativeError::AuthenticationFailed,
            MockError::Network { message } => NarrativeError::network(message),
            MockError::Timeout { timeout_secs } => NarrativeError::Timeout { timeout_secs },
        }
    }
}

impl Default for MockNarrativeService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockNarrativeService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            caller_responses: Arc::new(Mutex::new(HashMap::new())),
            caller_delays: HashMap::new(),
            delay: Duration::ZERO,
            info: ServiceInfo::new("mock", "mock-model-1"),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a successful response to the shared queue.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push_back(Self::success(content));
        self
    }

    /// Adds an error to the shared queue.
    pub fn with_error(self, error: MockError) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Error(error));
        self
    }

    /// Adds a successful response for one caller.
    pub fn with_response_for(self, caller: impl Into<String>, content: impl Into<String>) -> Self {
        self.push_for(caller.into(), Self::success(content));
        self
    }

    /// Adds an error for one caller.
    pub fn with_error_for(self, caller: impl Into<String>, error: MockError) -> Self {
        self.push_for(caller.into(), MockResponse::Error(error));
        self
    }

    /// Sets simulated latency for every request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Sets simulated latency for one caller, overriding the shared delay.
    pub fn with_delay_for(mut self, caller: impl Into<String>, delay: Duration) -> Self {
        self.caller_delays.insert(caller.into(), delay);
        self
    }

    /// Returns the number of calls made to this service.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns the recorded calls of one caller.
    pub fn calls_for(&self, caller: &str) -> Vec<NarrativeRequest> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.metadata.caller == caller)
            .cloned()
            .collect()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn success(content: impl Into<String>) -> MockResponse {
        MockResponse::Success {
            content: content.into(),
            usage: TokenUsage::new(10, 20),
        }
    }

    fn push_for(&self, caller: String, response: MockResponse) {
        self.caller_responses
            .lock()
            .unwrap()
            .entry(caller)
            .or_default()
            .push_back(response);
    }

    /// Caller script first, then the shared queue, then a default.
    fn next_response(&self, caller: &str) -> MockResponse {
        let scripted = self
            .caller_responses
            .lock()
            .unwrap()
            .get_mut(caller)
            .and_then(|queue| queue.pop_front());

        scripted
            .or_else(|| self.responses.lock().unwrap().pop_front())
            .unwrap_or_else(|| MockResponse::Success {
                content: DEFAULT_MOCK_CONTENT.to_string(),
                usage: TokenUsage::new(5, 10),
            })
    }
}

#[async_trait]
impl NarrativeService for MockNarrativeService {
    async fn generate(&self, request: NarrativeRequest) -> Result<NarrativeResponse, NarrativeError> {
        let caller = request.metadata.caller.clone();
        self.calls.lock().unwrap().push(request);

        let delay = self.caller_delays.get(&caller).copied().unwrap_or(self.delay);
        if !delay.is_zero() {
            sleep(delay).await;
        }

        match self.next_response(&caller) {
            MockResponse::Success { content, usage } => Ok(NarrativeResponse {
                content,
                usage,
                model: self.info.model.clone(),
                finish_reason: FinishReason::Stop,
            }),
            MockResponse::Error(err) => Err(err.into()),
        }
    }

    fn service_info(&self) -> ServiceInfo {
        self.info.clone()
    }
}
