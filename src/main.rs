//! greenlight - Evaluate a film or TV project from the command line.
//!
//! Configuration comes from `GREENLIGHT__*` environment variables (or a
//! `.env` file). The run outcome is printed to stdout as JSON.

use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

use greenlight::adapters::ai::{AnthropicConfig, AnthropicNarrativeService};
use greenlight::adapters::catalog::{TmdbCatalog, TmdbConfig};
use greenlight::adapters::LoggingProgress;
use greenlight::application::{
    EvaluateProjectCommand, EvaluateProjectHandler, RunError, RunOutcome, SchedulerError,
};
use greenlight::config::{AppConfig, ConfigError, SchedulingMode, ValidationError};
use greenlight::domain::project::{Platform, ProjectAttributes};
use greenlight::ports::{CatalogError, CatalogLookup, NarrativeError, NarrativeService};

#[derive(Debug, Parser)]
#[command(name = "greenlight", version, about = "Greenlight evaluation for film and TV projects")]
struct Args {
    /// Logline or synopsis of the project
    description: String,

    /// Production budget in dollars
    #[arg(long, default_value_t = 0)]
    budget: u64,

    #[arg(long)]
    genre: Option<String>,

    /// theatrical, streaming, hybrid or any other platform name
    #[arg(long)]
    platform: Option<String>,

    #[arg(long)]
    audience: Option<String>,

    /// Comparable title; repeat for several
    #[arg(long = "comparable")]
    comparables: Vec<String>,

    /// Run units in dependency waves so financial modeling sees market findings
    #[arg(long)]
    dependency_aware: bool,

    /// Pretty-print the JSON outcome
    #[arg(long)]
    pretty: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    log_json: bool,
}

impl Args {
    fn project(&self) -> ProjectAttributes {
        let mut project = ProjectAttributes::new(self.description.clone())
            .with_budget(self.budget)
            .with_comparables(self.comparables.iter().cloned());
        if let Some(genre) = &self.genre {
            project = project.with_genre(genre.clone());
        }
        if let Some(platform) = &self.platform {
            project = project.with_platform(Platform::from(platform.clone()));
        }
        if let Some(audience) = &self.audience {
            project = project.with_target_audience(audience.clone());
        }
        project
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("narrative service setup failed: {0}")]
    Narrative(#[from] NarrativeError),

    #[error("catalog setup failed: {0}")]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error(transparent)]
    Run(#[from] RunError),

    #[error("failed to write outcome: {0}")]
    Output(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.log_json);

    match run(&args).await {
        Ok(outcome) => {
            let rendered = if args.pretty {
                serde_json::to_string_pretty(&outcome)
            } else {
                serde_json::to_string(&outcome)
            };
            match rendered {
                Ok(json) => {
                    println!("{}", json);
                    ExitCode::SUCCESS
                }
                Err(err) => {
                    error!("{}", CliError::from(err));
                    ExitCode::FAILURE
                }
            }
        }
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(args: &Args) -> Result<RunOutcome, CliError> {
    let mut config = AppConfig::load()?;
    if args.dependency_aware {
        config.run.scheduling = SchedulingMode::DependencyAware;
    }
    config.validate()?;

    let api_key = config
        .ai
        .anthropic_api_key
        .clone()
        .ok_or(ValidationError::MissingRequired("ANTHROPIC_API_KEY"))?;
    let narrative = AnthropicNarrativeService::new(
        AnthropicConfig::from_secret(api_key)
            .with_model(config.ai.model.clone())
            .with_base_url(config.ai.base_url.clone())
            .with_timeout(config.ai.timeout())
            .with_max_retries(config.ai.max_retries),
    )?;

    let catalog: Option<Arc<dyn CatalogLookup>> = match &config.catalog.tmdb_api_key {
        Some(key) if config.catalog.is_active() => {
            let tmdb = TmdbCatalog::new(
                TmdbConfig::new(key.clone())
                    .with_base_url(config.catalog.base_url.clone())
                    .with_request_interval(config.catalog.request_interval())
                    .with_timeout(config.catalog.timeout()),
            )?;
            Some(Arc::new(tmdb))
        }
        _ => None,
    };

    let service = narrative.service_info();
    info!(
        provider = %service.name,
        model = %service.model,
        scheduling = ?config.run.scheduling,
        enrichment = catalog.is_some(),
        "Greenlight configured"
    );

    let handler = EvaluateProjectHandler::from_config(
        &config,
        Arc::new(narrative),
        catalog,
        Arc::new(LoggingProgress),
    )?;

    Ok(handler.handle(EvaluateProjectCommand::new(args.project())).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_log_json_flag() {
        let args = Args::try_parse_from(["greenlight", "A heist", "--log-json"]).unwrap();
        assert!(args.log_json);

        let args = Args::try_parse_from(["greenlight", "A heist"]).unwrap();
        assert!(!args.log_json);
    }

    #[test]
    fn absent_platform_defaults_but_supplied_value_is_kept() {
        let args = Args::try_parse_from(["greenlight", "A heist"]).unwrap();
        assert_eq!(args.project().platform, Platform::Theatrical);

        let args = Args::try_parse_from(["greenlight", "A heist", "--platform", ""]).unwrap();
        assert_eq!(args.project().platform, Platform::Other(String::new()));
    }
}
