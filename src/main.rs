//! Daily screener ETL job.

use clap::Parser;
use std::{path::PathBuf, process::ExitCode};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use screener_pipeline::{MissingPolicy, PipelineConfig, PipelineError, RunReport, pipeline};

#[derive(Parser)]
#[command(name = "screener-pipeline")]
#[command(about = "Screen, enrich and publish the daily company table", long_about = None)]
#[command(version)]
struct Cli {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Number of companies to keep. Overrides `ROW_LIMIT`.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    row_limit: Option<u64>,

    /// CSV destination. Overrides `OUTPUT_CSV`.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Per-ticker requests in flight. Overrides `ENRICH_CONCURRENCY`.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    concurrency: Option<u64>,

    /// `fail` or `omit` a row's stage when its enrichment record is missing.
    #[arg(long)]
    missing: Option<MissingPolicy>,

    /// Write the CSV only, even when `DATABASE_URL` is set.
    #[arg(long)]
    no_upload: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("screener_pipeline={}", cli.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("app started");

    match run(cli).await {
        Ok(report) => {
            report.stats.log_summary();
            tracing::info!(path = %report.csv_path.display(), "app finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "run aborted");
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                tracing::error!(cause = %cause, "caused by");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<RunReport, PipelineError> {
    let mut config = PipelineConfig::from_env()?;

    if let Some(n) = cli.row_limit {
        config.run.row_limit = to_usize(n)?;
    }
    if let Some(n) = cli.concurrency {
        config.run.concurrency = to_usize(n)?;
    }
    if let Some(p) = cli.output {
        config.run.output_path = p;
    }
    if let Some(m) = cli.missing {
        config.run.missing_policy = m;
    }
    config.run.validate()?;

    tracing::debug!(
        row_limit = config.run.row_limit,
        sectors = ?config.run.sectors,
        concurrency = config.run.concurrency,
        missing_policy = ?config.run.missing_policy,
        "configuration loaded"
    );

    pipeline::run_job(config, !cli.no_upload).await
}

fn to_usize(n: u64) -> Result<usize, PipelineError> {
    usize::try_from(n).map_err(|_| PipelineError::Config(format!("{n} is out of range")))
}
