//! RiskAnalysisUnit - Production, creative, market and financial risk.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::analysis::{
    AnalysisResult, ConfidenceRules, RiskScorer, UnitDescriptor, UnitMetadata,
};
use crate::domain::project::ProjectAttributes;
use crate::ports::{AnalysisUnit, NarrativeService, UnitContext, UnitError};

use super::prompts::{risk_analysis_message, RISK_ANALYSIS_PROMPT};
use super::{request_findings, NarrativeSettings};

pub const RISK_ANALYSIS_ID: &str = "risk_analysis";

/// Risk assessment for a project.
///
/// The attached risk profile is scored from budget, genre and platform
/// alone; the narrative never influences it.
pub struct RiskAnalysisUnit {
    descriptor: UnitDescriptor,
    narrative: Arc<dyn NarrativeService>,
    settings: NarrativeSettings,
}

impl RiskAnalysisUnit {
    pub fn new(narrative: Arc<dyn NarrativeService>, settings: NarrativeSettings) -> Self {
        Self {
            descriptor: UnitDescriptor::new(
                RISK_ANALYSIS_ID,
                "Risk Analysis Agent",
                "Identifies risks, controversies, and execution challenges",
            ),
            narrative,
            settings,
        }
    }
}

#[async_trait]
impl AnalysisUnit for RiskAnalysisUnit {
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
            RISK_ANALYSIS_PROMPT,
            risk_analysis_message(project),
            self.settings,
        )
        .await?;

        Ok(AnalysisResult::new(
            &self.descriptor,
            findings,
            ConfidenceRules::risk(project),
            UnitMetadata::Risk(RiskScorer::score_project(project)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockNarrativeService;
    use crate::domain::analysis::RiskLevel;
    use crate::domain::foundation::RunId;
    use crate::domain::project::Platform;

    fn unit(service: MockNarrativeService) -> RiskAnalysisUnit {
        RiskAnalysisUnit::new(Arc::new(service), NarrativeSettings::new(0.6, 4096))
    }

    #[tokio::test]
    async fn attaches_scored_risk_profile() {
        let project = ProjectAttributes::new("Generation ship drama")
            .with_budget(150_000_000)
            .with_genre("Science Fiction")
            .with_platform(Platform::Theatrical);

        let result = unit(MockNarrativeService::new().with_response_for(RISK_ANALYSIS_ID, "Risky."))
            .produce(&project, &UnitContext::new(RunId::new()))
            .await
            .unwrap();

        let profile = result.risk_profile().unwrap();
        assert_eq!(profile.overall_score(), 7.3);
        assert_eq!(profile.risk_level(), RiskLevel::MediumHigh);
        assert!((result.confidence.value() - 0.9).abs() < 1e-9);
    }

    #[tokio::test]
    async fn missing_fields_lower_confidence() {
        // Only platform and target audience defaults count as present.
        let result = unit(MockNarrativeService::new())
            .produce(&ProjectAttributes::default(), &UnitContext::new(RunId::new()))
            .await
            .unwrap();

        assert!((result.confidence.value() - (0.6 + 0.3 * 0.4)).abs() < 1e-9);
    }

    #[tokio::test]
    async fn blank_narrative_is_an_error() {
        let service = MockNarrativeService::new().with_response_for(RISK_ANALYSIS_ID, "   ");

        let err = unit(service)
            .produce(&ProjectAttributes::default(), &UnitContext::new(RunId::new()))
            .await
            .unwrap_err();

        assert!(matches!(err, UnitError::EmptyNarrative));
    }
}
