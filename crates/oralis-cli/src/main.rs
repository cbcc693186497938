use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use eyre::WrapErr;
use oralis_core::models::intake::Intake;
use oralis_core::models::progress::ProgressEvent;
use oralis_pipeline::{
    CancellationToken, InMemoryRepository, NoProgress, Pipeline, PipelineConfig, ProgressSink,
};
use oralis_qa::evaluator::ReadabilityEvaluator;
use oralis_rules::Catalog;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{CatalogArgs, Cli, Commands, RunArgs};

/// Exit code for a run the QA gate blocked.
const EXIT_BLOCKED: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    // Structured JSON logs on stderr; stdout carries the result.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Commands::Run(args) => run(args).await,
        Commands::Catalog(args) => catalog(args),
    };

    match outcome {
        Ok(code) => code,
        Err(err) => {
            error!(error = %err, "command failed");
            for cause in err.chain().skip(1) {
                error!(cause = %cause, "caused by");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(args: RunArgs) -> eyre::Result<ExitCode> {
    let catalog = Arc::new(load_catalog(args.catalog.as_deref())?);
    let config = match &args.config {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };
    let repository = InMemoryRepository::load(&args.content)
        .wrap_err_with(|| format!("failed to load content from {}", args.content.display()))?;
    let intake = read_intake(&args.intake)?;

    let mut pipeline = Pipeline::new(catalog, Arc::new(repository), config)?;
    if args.advisory {
        pipeline = pipeline.with_evaluator(Arc::new(ReadabilityEvaluator::default()));
    }

    // Ctrl-C cancels the run at the next stage boundary.
    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, cancelling run");
            on_signal.cancel();
        }
    });

    let log_progress = |event: &ProgressEvent| {
        info!(
            stage = %event.stage_name,
            status = ?event.status,
            duration_ms = event.duration_ms,
            "{}",
            event.message
        );
    };
    let progress: &dyn ProgressSink = if args.progress { &log_progress } else { &NoProgress };

    let result = pipeline.run(&intake, progress, &cancel).await;

    let output = if args.report_only {
        serde_json::to_value(&result.report)?
    } else {
        serde_json::to_value(&result)?
    };
    print_json(&output, args.pretty)?;

    Ok(if result.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_BLOCKED)
    })
}

fn catalog(args: CatalogArgs) -> eyre::Result<ExitCode> {
    let catalog = load_catalog(args.path.as_deref())?;
    if args.path.is_some() {
        info!(
            questions = catalog.questions().len(),
            scenarios = catalog.scenarios().len(),
            "catalog is valid"
        );
    }
    print_json(&serde_json::to_value(catalog.parts())?, args.pretty)?;
    Ok(ExitCode::SUCCESS)
}

fn load_catalog(path: Option<&Path>) -> eyre::Result<Catalog> {
    let catalog = match path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .wrap_err_with(|| format!("failed to read catalog at {}", path.display()))?;
            Catalog::from_json(&contents)?
        }
        None => Catalog::standard()?,
    };
    Ok(catalog)
}

fn read_intake(path: &Path) -> eyre::Result<Intake> {
    let contents = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read intake at {}", path.display()))?;
    serde_json::from_str(&contents)
        .wrap_err_with(|| format!("failed to parse intake at {}", path.display()))
}

fn print_json(value: &serde_json::Value, pretty: bool) -> eyre::Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}
