//! MarketResearchUnit - Comparable titles, genre trends and audience demand.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::analysis::{
    AnalysisResult, ConfidenceRules, MarketMetadata, UnitDescriptor, UnitMetadata,
};
use crate::domain::project::{BudgetTier, ProjectAttributes};
use crate::ports::{AnalysisUnit, NarrativeService, UnitContext, UnitError};

use super::prompts::{market_research_message, MARKET_RESEARCH_PROMPT};
use super::{request_findings, NarrativeSettings};

pub const MARKET_RESEARCH_ID: &str = "market_research";

/// Market viability analysis.
pub struct MarketResearchUnit {
    descriptor: UnitDescriptor,
    narrative: Arc<dyn NarrativeService>,
    settings: NarrativeSettings,
}

impl MarketResearchUnit {
    pub fn new(narrative: Arc<dyn NarrativeService>, settings: NarrativeSettings) -> Self {
        Self {
            descriptor: UnitDescriptor::new(
                MARKET_RESEARCH_ID,
                "Market Research Agent",
                "Analyzes comparable titles, box office performance, and market trends",
            ),
            narrative,
            settings,
        }
    }

    fn metadata(project: &ProjectAttributes) -> UnitMetadata {
        UnitMetadata::Market(MarketMetadata {
            genre: project.genre.clone(),
            budget_category: BudgetTier::for_budget(project.budget),
            comparables_count: project.comparables.len(),
        })
    }
}

#[async_trait]
impl AnalysisUnit for MarketResearchUnit {
    fn descriptor(&self) -> &UnitDescriptor {
        &self.descriptor
    }

    async fn produce(
        &self,
        project: &ProjectAttributes,
        context: &UnitContext,
    ) -> Result<AnalysisResult, UnitError> {
        let findings = request_findings(
            self.narrative.as_ref(),
            context,
            &self.descriptor.id,
            MARKET_RESEARCH_PROMPT,
            market_research_message(project),
            self.settings,
        )
        .await?;

        Ok(AnalysisResult::new(
            &self.descriptor,
            findings,
            ConfidenceRules::market(project),
            Self::metadata(project),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockError, MockNarrativeService};
    use crate::domain::foundation::RunId;

    fn unit(service: MockNarrativeService) -> MarketResearchUnit {
        MarketResearchUnit::new(Arc::new(service), NarrativeSettings::new(0.7, 1024))
    }

    #[tokio::test]
    async fn produces_findings_with_market_metadata() {
        let service = MockNarrativeService::new()
            .with_response_for(MARKET_RESEARCH_ID, "Horror is having a moment.");
        let project = ProjectAttributes::new("Cabin story")
            .with_budget(3_000_000)
            .with_genre("Horror")
            .with_comparables(["Evil Dead"]);

        let result = unit(service.clone())
            .produce(&project, &UnitContext::new(RunId::new()))
            .await
            .unwrap();

        assert_eq!(result.unit_id, MARKET_RESEARCH_ID);
        assert_eq!(result.findings, "Horror is having a moment.");
        assert!((result.confidence.value() - 1.0).abs() < 1e-9);
        assert_eq!(
            result.metadata,
            UnitMetadata::Market(MarketMetadata {
                genre: "Horror".to_string(),
                budget_category: BudgetTier::Low,
                comparables_count: 1,
            })
        );

        let calls = service.calls_for(MARKET_RESEARCH_ID);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].temperature, Some(0.7));
        assert_eq!(calls[0].max_tokens, Some(1024));
        assert_eq!(calls[0].system_prompt.as_deref(), Some(MARKET_RESEARCH_PROMPT));
    }

    #[tokio::test]
    async fn sparse_project_gets_base_confidence() {
        let result = unit(MockNarrativeService::new())
            .produce(&ProjectAttributes::default(), &UnitContext::new(RunId::new()))
            .await
            .unwrap();

        assert!((result.confidence.value() - 0.7).abs() < 1e-9);
    }

    #[tokio::test]
    async fn narrative_failure_is_returned_as_unit_error() {
        let service = MockNarrativeService::new().with_error_for(
            MARKET_RESEARCH_ID,
            MockError::Unavailable {
                message: "overloaded".to_string(),
            },
        );

        let err = unit(service)
            .produce(&ProjectAttributes::default(), &UnitContext::new(RunId::new()))
            .await
            .unwrap_err();

        assert!(matches!(err, UnitError::Narrative(_)));
    }
}
