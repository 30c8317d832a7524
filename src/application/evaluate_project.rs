//! EvaluateProjectHandler - One complete greenlight evaluation.
//!
//! 1. Optionally enrich the project with comparable titles
//! 2. Run every analysis unit through the scheduler
//! 3. Synthesize the final decision
//!
//! Unit failures are absorbed into degraded results. Only a synthesis
//! failure fails the run.

use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::analysis::UnitResults;
use crate::domain::foundation::{RunId, Timestamp};
use crate::domain::project::{format_currency, ProjectAttributes};
use crate::domain::synthesis::RunResult;
use crate::ports::{CatalogLookup, NarrativeService, ProgressObserver};

use super::enrichment::ComparableEnricher;
use super::scheduler::{Scheduler, SchedulerError};
use super::synthesizer::{SynthesisError, Synthesizer};
use super::units::{default_units, NarrativeSettings};

/// Command to evaluate one project.
#[derive(Debug, Clone)]
pub struct EvaluateProjectCommand {
    pub project: ProjectAttributes,
}

impl EvaluateProjectCommand {
    pub fn new(project: ProjectAttributes) -> Self {
        Self { project }
    }
}

/// Everything produced by a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub run_id: RunId,
    /// The project as analyzed, after enrichment.
    pub project: ProjectAttributes,
    pub unit_results: UnitResults,
    pub run_result: RunResult,
    pub started_at: Timestamp,
    pub finished_at: Timestamp,
}

/// Fatal run errors.
#[derive(Debug, Clone, Error)]
pub enum RunError {
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
}

/// Handler for project evaluations.
pub struct EvaluateProjectHandler {
    scheduler: Scheduler,
    synthesizer: Synthesizer,
    enricher: Option<ComparableEnricher>,
}

impl EvaluateProjectHandler {
    pub fn new(scheduler: Scheduler, synthesizer: Synthesizer) -> Self {
        Self {
            scheduler,
            synthesizer,
            enricher: None,
        }
    }

    pub fn with_enricher(mut self, enricher: ComparableEnricher) -> Self {
        self.enricher = Some(enricher);
        self
    }

    /// Wires the built-in units, synthesis and optional enrichment from
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError` if the units cannot be registered.
    pub fn from_config(
        config: &AppConfig,
        narrative: Arc<dyn NarrativeService>,
        catalog: Option<Arc<dyn CatalogLookup>>,
        progress: Arc<dyn ProgressObserver>,
    ) -> Result<Self, SchedulerError> {
        let scheduler = Scheduler::new(
            default_units(narrative.clone(), &config.ai),
            config.run.scheduling,
        )?
        .with_unit_timeout(config.run.unit_timeout())
        .with_progress(progress);

        let synthesizer = Synthesizer::new(
            narrative,
            NarrativeSettings::new(config.ai.temperatures.synthesis, config.ai.max_tokens),
        )
        .with_timeout(config.run.synthesis_timeout());

        let handler = Self::new(scheduler, synthesizer);
        Ok(match catalog {
            Some(catalog) if config.catalog.enabled => handler.with_enricher(
                ComparableEnricher::new(catalog)
                    .with_year_window(config.catalog.year_window)
                    .with_timeout(config.run.enrichment_timeout()),
            ),
            _ => handler,
        })
    }

    /// Runs one evaluation.
    ///
    /// # Errors
    ///
    /// Returns `RunError::Synthesis` when the final synthesis call fails.
    pub async fn handle(&self, cmd: EvaluateProjectCommand) -> Result<RunOutcome, RunError> {
        let run_id = RunId::new();
        let started_at = Timestamp::now();

        info!(
            run_id = %run_id,
            project = %cmd.project.working_title(),
            budget = %format_currency(cmd.project.budget),
            "Evaluation started"
        );

        let project = match &self.enricher {
            Some(enricher) => enricher.enrich(cmd.project).await,
            None => cmd.project,
        };
        let project = Arc::new(project);

        let unit_results = self.scheduler.run(run_id, Arc::clone(&project)).await;
        let run_result = self
            .synthesizer
            .synthesize(run_id, &project, &unit_results)
            .await?;

        let finished_at = Timestamp::now();
        info!(
            run_id = %run_id,
            recommendation = %run_result.recommendation,
            degraded = unit_results.degraded().count(),
            elapsed_ms = finished_at.duration_since(&started_at).num_milliseconds(),
            "Evaluation finished"
        );

        Ok(RunOutcome {
            run_id,
            project: Arc::try_unwrap(project).unwrap_or_else(|shared| (*shared).clone()),
            unit_results,
            run_result,
            started_at,
            finished_at,
        })
    }
}
