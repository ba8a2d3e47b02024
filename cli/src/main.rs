//! CLI entrypoint for costwise
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use costwise_application::{
    AnalysisRequest, CostOrchestrator, ModelClient, NoProgress, ProgressNotifier,
    SpecialistRegistry,
};
use costwise_domain::QueryContext;
use costwise_infrastructure::{
    ConfigLoader, FileConfig, FileModelConfig, JsonContextLoader, JsonlExecutionLogger,
};
use costwise_presentation::{
    Cli, ConsoleFormatter, OutputConfig, OutputFormatter, ProgressReporter, SimpleProgress,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = init_tracing(cli.verbose, cli.log_dir.as_deref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let config = load_config(&cli)?;
    config.validate().context("invalid configuration")?;

    info!("Starting costwise");

    let query = match cli.query.as_deref().map(str::trim) {
        Some(q) if !q.is_empty() => q.to_string(),
        _ => bail!("A query is required. Example: costwise \"Why did my bill go up?\""),
    };

    let context = match &cli.context {
        Some(path) => JsonContextLoader::new().load(path)?,
        None => QueryContext::new(),
    };

    let output = OutputConfig::resolve(
        &cli,
        config.output.format,
        config.output.color,
        config.output.progress,
    );
    if let Some(color) = output.color {
        colored::control::set_override(color);
    }

    // === Dependency Injection ===
    let router = config.routing.to_router()?;
    let registry = SpecialistRegistry::standard_with_temperature(
        build_model_client(&config.model)?,
        config.model.temperature,
    );

    let mut orchestrator_config = config.orchestration.to_orchestrator_config();
    if let Some(mode) = cli.mode {
        orchestrator_config = orchestrator_config.with_default_mode(mode);
    }
    let mode = orchestrator_config.default_mode;

    let mut orchestrator = CostOrchestrator::new(router, registry, orchestrator_config)?;
    if let Some(dir) = &cli.log_dir {
        match JsonlExecutionLogger::in_dir(dir) {
            Some(logger) => {
                info!("Execution log: {}", logger.path().display());
                orchestrator = orchestrator.with_logger(Arc::new(logger));
            }
            None => warn!("Could not open execution log in {}", dir.display()),
        }
    }

    // Print header
    if output.show_progress {
        println!();
        println!("+============================================================+");
        println!("|           costwise - Cost Optimization Analysis            |");
        println!("+============================================================+");
        println!();
        println!("Query: {}", query);
        println!(
            "Routed to: {}",
            orchestrator
                .router()
                .route(&query)
                .iter()
                .map(|id| id.display_name())
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!();
    }

    let request = AnalysisRequest::new(query)
        .with_mode(mode)
        .with_context(context);

    // Progress bars and log lines interleave badly, so verbose runs get plain text
    let progress: Box<dyn ProgressNotifier> = if !output.show_progress {
        Box::new(NoProgress)
    } else if cli.verbose > 0 {
        Box::new(SimpleProgress)
    } else {
        Box::new(ProgressReporter::new())
    };

    let response = orchestrator
        .analyze_request(request, progress.as_ref())
        .await;

    println!("{}", ConsoleFormatter.render(&response, output.format));

    Ok(())
}

/// Initialize logging based on verbosity level, optionally mirroring to a file
fn init_tracing(verbose: u8, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("cannot create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::never(dir, "costwise.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    if cli.no_config {
        return Ok(ConfigLoader::load_defaults());
    }
    ConfigLoader::load(cli.config.as_ref()).context("failed to load configuration")
}

#[cfg(feature = "http-model")]
fn build_model_client(model: &FileModelConfig) -> Result<Option<Arc<dyn ModelClient>>> {
    use costwise_infrastructure::OpenAiCompatibleClient;

    if !model.enabled {
        info!("Model backend disabled; specialists use rule-based analysis");
        return Ok(None);
    }
    let client = OpenAiCompatibleClient::from_config(model)?;
    info!("Using model {} at {}", model.model, model.base_url);
    Ok(Some(Arc::new(client)))
}

#[cfg(not(feature = "http-model"))]
fn build_model_client(model: &FileModelConfig) -> Result<Option<Arc<dyn ModelClient>>> {
    if model.enabled {
        warn!("Built without the http-model feature; ignoring [model] settings");
    }
    Ok(None)
}
