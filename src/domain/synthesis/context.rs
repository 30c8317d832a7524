//! Synthesis context - Composite prompt built from unit results.

use crate::domain::analysis::UnitResults;
use crate::domain::foundation::Confidence;
use crate::domain::project::{group_thousands, ProjectAttributes};

/// Instruction appended after all findings.
pub const FINAL_DECISION_INSTRUCTION: &str =
    "Based on all the above analyses, provide your final greenlight recommendation.";

const SECTION_RULE: &str = "---";

/// Builds the aggregated text the synthesis call works from.
pub struct SynthesisContext;

impl SynthesisContext {
    /// Project header, then each non-degraded result in order, then the
    /// final decision instruction.
    pub fn build(project: &ProjectAttributes, results: &UnitResults) -> String {
        let mut sections = vec![Self::header(project)];

        for result in results.successful() {
            sections.push(Self::section(
                &result.unit_name,
                result.confidence,
                &result.findings,
            ));
        }

        let mut context = sections.join("\n");
        context.push_str("\n\n");
        context.push_str(FINAL_DECISION_INSTRUCTION);
        context
    }

    fn header(project: &ProjectAttributes) -> String {
        let description = if project.description.trim().is_empty() {
            "Untitled"
        } else {
            project.description.as_str()
        };

        format!(
            "# COMPREHENSIVE PROJECT ANALYSIS\n\n**Project:** {}\n**Budget:** ${}\n**Genre:** {}\n\n{}\n",
            description,
            group_thousands(project.budget),
            project.genre,
            SECTION_RULE,
        )
    }

    fn section(name: &str, confidence: Confidence, findings: &str) -> String {
        format!(
            "## {}\n**Confidence:** {}\n\n{}\n\n{}\n",
            name, confidence, findings, SECTION_RULE
        )
    }
}
