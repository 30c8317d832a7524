//! Synthesizer - Turns unit results into the final greenlight decision.
//!
//! Builds the synthesis context from the project and every non-degraded
//! result, makes one narrative call, then derives recommendation,
//! confidence and summary deterministically. Unlike unit failures, a
//! failed or timed out synthesis call fails the run.

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::analysis::UnitResults;
use crate::domain::conversation::Conversation;
use crate::domain::foundation::RunId;
use crate::domain::project::ProjectAttributes;
use crate::domain::synthesis::{RunResult, SynthesisContext};
use crate::ports::{NarrativeError, NarrativeRequest, NarrativeService, RequestMetadata};

use super::units::prompts::SYNTHESIS_PROMPT;
use super::units::NarrativeSettings;

/// Caller name used for the synthesis narrative request.
pub const SYNTHESIS_CALLER: &str = "synthesis";

/// Default upper bound for the synthesis call.
pub const DEFAULT_SYNTHESIS_TIMEOUT: Duration = Duration::from_secs(180);

/// Errors that abort synthesis.
#[derive(Debug, Clone, Error)]
pub enum SynthesisError {
    #[error("synthesis narrative failed: {0}")]
    Narrative(#[from] NarrativeError),

    #[error("synthesis timed out after {timeout_secs}s")]
    TimedOut { timeout_secs: u64 },
}

/// Produces the final decision for a run.
pub struct Synthesizer {
    narrative: Arc<dyn NarrativeService>,
    settings: NarrativeSettings,
    timeout: Duration,
}

impl Synthesizer {
    pub fn new(narrative: Arc<dyn NarrativeService>, settings: NarrativeSettings) -> Self {
        Self {
            narrative,
            settings,
            timeout: DEFAULT_SYNTHESIS_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Synthesizes the decision for one run.
    ///
    /// # Errors
    ///
    /// Returns `SynthesisError` when the narrative call fails or exceeds
    /// the synthesis timeout.
    pub async fn synthesize(
        &self,
        run_id: RunId,
        project: &ProjectAttributes,
        results: &UnitResults,
    ) -> Result<RunResult, SynthesisError> {
        let context = SynthesisContext::build(project, results);

        debug!(
            run_id = %run_id,
            included = results.successful().count(),
            excluded = results.degraded().count(),
            "Synthesis context built"
        );

        let request = NarrativeRequest::new(RequestMetadata::new(run_id, SYNTHESIS_CALLER))
            .with_system_prompt(SYNTHESIS_PROMPT)
            .with_conversation(Conversation::from_user(context))
            .with_temperature(self.settings.temperature)
            .with_max_tokens(self.settings.max_tokens);

        let response = tokio::time::timeout(self.timeout, self.narrative.generate(request))
            .await
            .map_err(|_| SynthesisError::TimedOut {
                timeout_secs: self.timeout.as_secs(),
            })??;

        let result = RunResult::derive(response.content, results);

        info!(
            run_id = %run_id,
            recommendation = %result.recommendation,
            confidence = %result.confidence,
            confidence_level = result.confidence.label(),
            "Synthesis complete"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockError, MockNarrativeService};
    use crate::domain::analysis::{AnalysisResult, UnitDescriptor, UnitMetadata};
    use crate::domain::foundation::Confidence;
    use crate::domain::synthesis::{RecommendationCategory, FINAL_DECISION_INSTRUCTION};

    fn results() -> UnitResults {
        let market = UnitDescriptor::new("market_research", "Market Research Agent", "role");
        let risk = UnitDescriptor::new("risk_analysis", "Risk Analysis Agent", "role");
        vec![
            AnalysisResult::new(&market, "Crowded genre.", Confidence::new(0.8), UnitMetadata::Empty),
            AnalysisResult::degraded(&risk, "provider down"),
        ]
        .into_iter()
        .collect()
    }

    fn synthesizer(service: MockNarrativeService) -> Synthesizer {
        Synthesizer::new(Arc::new(service), NarrativeSettings::new(0.7, 4096))
    }

    #[tokio::test]
    async fn derives_decision_from_narrative() {
        let service = MockNarrativeService::new().with_response_for(
            SYNTHESIS_CALLER,
            "## Executive Summary\nStrong concept with a clear audience.\n\nWe recommend you proceed.",
        );

        let result = synthesizer(service.clone())
            .synthesize(RunId::new(), &ProjectAttributes::new("Pitch"), &results())
            .await
            .unwrap();

        assert_eq!(result.recommendation, RecommendationCategory::Go);
        assert!((result.confidence.value() - 0.8).abs() < 1e-9);
        assert_eq!(result.summary, "Strong concept with a clear audience. We recommend you proceed.");

        let calls = service.calls_for(SYNTHESIS_CALLER);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].temperature, Some(0.7));
        let context = calls[0].conversation.last_user_message().unwrap();
        assert!(context.contains("## Market Research Agent"));
        assert!(!context.contains("Risk Analysis Agent"));
        assert!(context.ends_with(FINAL_DECISION_INSTRUCTION));
    }

    #[tokio::test]
    async fn narrative_failure_is_fatal() {
        let service = MockNarrativeService::new()
            .with_error_for(SYNTHESIS_CALLER, MockError::AuthenticationFailed);

        let err = synthesizer(service)
            .synthesize(RunId::new(), &ProjectAttributes::default(), &results())
            .await
            .unwrap_err();

        assert!(matches!(err, SynthesisError::Narrative(_)));
    }

    #[tokio::test]
    async fn slow_narrative_times_out() {
        let service = MockNarrativeService::new()
            .with_delay_for(SYNTHESIS_CALLER, Duration::from_secs(30));

        let err = synthesizer(service)
            .with_timeout(Duration::from_millis(50))
            .synthesize(RunId::new(), &ProjectAttributes::default(), &results())
            .await
            .unwrap_err();

        assert!(matches!(err, SynthesisError::TimedOut { .. }));
    }
}
