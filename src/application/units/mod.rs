//! Analysis units - the built-in market, financial and risk capabilities.
//!
//! Each unit makes exactly one narrative call with a fresh conversation and
//! computes confidence and metadata from the project attributes alone.

mod financial_model;
mod market_research;
pub mod prompts;
mod risk_analysis;

pub use financial_model::{FinancialModelUnit, FINANCIAL_MODEL_ID};
pub use market_research::{MarketResearchUnit, MARKET_RESEARCH_ID};
pub use risk_analysis::{RiskAnalysisUnit, RISK_ANALYSIS_ID};

use std::sync::Arc;
use tracing::debug;

use crate::config::AiConfig;
use crate::domain::conversation::Conversation;
use crate::ports::{
    AnalysisUnit, NarrativeRequest, NarrativeService, RequestMetadata, UnitContext, UnitError,
};

/// Sampling parameters for one unit's narrative call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NarrativeSettings {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl NarrativeSettings {
    pub fn new(temperature: f32, max_tokens: u32) -> Self {
        Self {
            temperature,
            max_tokens,
        }
    }
}

/// The three built-in units in declaration order: market, financial, risk.
pub fn default_units(
    narrative: Arc<dyn NarrativeService>,
    config: &AiConfig,
) -> Vec<Arc<dyn AnalysisUnit>> {
    let temps = config.temperatures;
    let settings = |temperature| NarrativeSettings::new(temperature, config.max_tokens);

    vec![
        Arc::new(MarketResearchUnit::new(
            narrative.clone(),
            settings(temps.market),
        )),
        Arc::new(FinancialModelUnit::new(
            narrative.clone(),
            settings(temps.financial),
        )),
        Arc::new(RiskAnalysisUnit::new(narrative, settings(temps.risk))),
    ]
}

/// Sends one system prompt and user message and returns the findings text.
async fn request_findings(
    narrative: &dyn NarrativeService,
    context: &UnitContext,
    caller: &str,
    system_prompt: &str,
    message: String,
    settings: NarrativeSettings,
) -> Result<String, UnitError> {
    let request = NarrativeRequest::new(RequestMetadata::new(context.run_id, caller))
        .with_system_prompt(system_prompt)
        .with_conversation(Conversation::from_user(message))
        .with_temperature(settings.temperature)
        .with_max_tokens(settings.max_tokens);

    let response = narrative.generate(request).await?;

    debug!(
        run_id = %context.run_id,
        unit = caller,
        prompt_tokens = response.usage.prompt_tokens,
        completion_tokens = response.usage.completion_tokens,
        "Narrative received"
    );

    if response.content.trim().is_empty() {
        return Err(UnitError::EmptyNarrative);
    }
    Ok(response.content)
}
