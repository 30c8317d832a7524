//! FinancialModelUnit - Revenue scenarios, break-even and ROI.
//!
//! Reads market findings from its upstream snapshot when present. In
//! concurrent scheduling the snapshot is empty and the unit works without
//! them.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::analysis::{
    AnalysisResult, ConfidenceRules, FinancialCalculator, FinancialMetadata, UnitDescriptor,
    UnitMetadata,
};
use crate::domain::project::ProjectAttributes;
use crate::ports::{AnalysisUnit, NarrativeService, UnitContext, UnitError};

use super::market_research::MARKET_RESEARCH_ID;
use super::prompts::{financial_model_message, FINANCIAL_MODELING_PROMPT};
use super::{request_findings, NarrativeSettings};

pub const FINANCIAL_MODEL_ID: &str = "financial_model";

/// Financial projections for a project.
pub struct FinancialModelUnit {
    descriptor: UnitDescriptor,
    dependencies: Vec<String>,
    narrative: Arc<dyn NarrativeService>,
    settings: NarrativeSettings,
}

impl FinancialModelUnit {
    pub fn new(narrative: Arc<dyn NarrativeService>, settings: NarrativeSettings) -> Self {
        Self {
            descriptor: UnitDescriptor::new(
                FINANCIAL_MODEL_ID,
                "Financial Modeling Agent",
                "Creates ROI projections, budget analysis, and revenue forecasts",
            ),
            dependencies: vec![MARKET_RESEARCH_ID.to_string()],
            narrative,
            settings,
        }
    }

    fn metadata(project: &ProjectAttributes) -> UnitMetadata {
        UnitMetadata::Financial(FinancialMetadata {
            budget: project.budget,
            platform: project.platform.clone(),
            genre: project.genre.clone(),
            basic_metrics: FinancialCalculator::basic_metrics(
                project.budget,
                &project.genre,
                &project.platform,
            ),
        })
    }
}

#[async_trait]
impl AnalysisUnit for FinancialModelUnit {
    fn descriptor(&self) -> &UnitDescriptor {
        &self.descriptor
    }

    fn depends_on(&self) -> &[String] {
        &self.dependencies
    }

    async fn produce(
        &self,
        project: &ProjectAttributes,
        context: &UnitContext,
    ) -> Result<AnalysisResult, UnitError> {
        let market_findings = context
            .successful_upstream(MARKET_RESEARCH_ID)
            .map(|market| market.findings.as_str());

        let findings = request_findings(
            self.narrative.as_ref(),
            context,
            &self.descriptor.id,
            FINANCIAL_MODELING_PROMPT,
            financial_model_message(project, market_findings),
            self.settings,
        )
        .await?;

        Ok(AnalysisResult::new(
            &self.descriptor,
            findings,
            ConfidenceRules::financial(project, market_findings.is_some()),
            Self::metadata(project),
        ))
    }
}
