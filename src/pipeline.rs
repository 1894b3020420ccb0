//! The daily run: screen → employees → merge → sentiment → merge → write.

use chrono::NaiveDate;
use std::{path::PathBuf, time::Instant};

use crate::{
    assemble::{self, CompanyRow},
    config::{PipelineConfig, RunSettings},
    core::{ApiClient, Result},
    profile::EmployeesBuilder,
    screener::{self, ScreenerBuilder},
    sentiment::{LookbackWindow, SentimentBuilder},
    sink::{self, PostgresSink},
    stats::RunStats,
};

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub rows: Vec<CompanyRow>,
    pub csv_path: PathBuf,
    pub stats: RunStats,
}

/// One pipeline run over a configured client.
pub struct Pipeline<'a> {
    client: &'a ApiClient,
    settings: &'a RunSettings,
    today: Option<NaiveDate>,
}

impl<'a> Pipeline<'a> {
    pub fn new(client: &'a ApiClient, settings: &'a RunSettings) -> Self {
        Self {
            client,
            settings,
            today: None,
        }
    }

    /// Pin the end of the lookback window. Defaults to the local date at run time.
    #[must_use]
    pub fn today(mut self, date: NaiveDate) -> Self {
        self.today = Some(date);
        self
    }

    /// Fetch, rank, enrich and assemble, without writing anything.
    ///
    /// # Errors
    ///
    /// Any upstream, validation, coercion or missing-enrichment error aborts the run.
    pub async fn extract(&self) -> Result<(Vec<CompanyRow>, RunStats)> {
        let s = self.settings;
        let mut stats = RunStats::new();

        let raw = ScreenerBuilder::new(self.client, s.row_limit)
            .sectors(s.sectors.clone())
            .fetch_raw()
            .await?;
        stats.screened = raw.iter().filter_map(|v| v.as_array()).map(Vec::len).sum();

        let universe = screener::transform(&raw, s.row_limit)?;
        stats.universe = universe.len();
        tracing::info!(tickers = ?universe.tickers(), "ticker universe selected");

        let employees = EmployeesBuilder::new(self.client, universe.tickers())
            .concurrency(s.concurrency)
            .fetch()
            .await?;
        let rows = assemble::merge_employees(universe.candidates(), &employees, s.missing_policy)?;
        stats.with_employees = rows.iter().filter(|r| r.full_time_employees.is_some()).count();

        let today = self
            .today
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        let window = LookbackWindow::trailing(today, s.lookback_days)?;
        let sentiment = SentimentBuilder::new(self.client, universe.tickers(), window)
            .platform(s.platform)
            .concurrency(s.concurrency)
            .fetch()
            .await?;
        stats.with_sentiment = sentiment.covered();
        stats.empty_sentiment = sentiment.len() - sentiment.covered();

        let rows = assemble::merge_sentiment(rows, &sentiment, s.missing_policy)?;
        Ok((rows, stats))
    }

    /// [`Pipeline::extract`], then overwrite the CSV.
    ///
    /// # Errors
    ///
    /// See [`Pipeline::extract`]; also fails if the CSV cannot be written.
    pub async fn run(&self) -> Result<RunReport> {
        let started = Instant::now();
        let (rows, mut stats) = self.extract().await?;
        stats.rows_written = sink::write_csv(&rows, &self.settings.output_path)?;
        stats.elapsed = started.elapsed();
        Ok(RunReport {
            rows,
            csv_path: self.settings.output_path.clone(),
            stats,
        })
    }
}

/// Build the client from `config`, run the pipeline, then replace the database table
/// when a database URL is configured and `upload` is set.
///
/// # Errors
///
/// The first error of any stage. Nothing is retried.
pub async fn run_job(config: PipelineConfig, upload: bool) -> Result<RunReport> {
    let PipelineConfig {
        run,
        http,
        credentials,
        database_table,
        ..
    } = config;

    let mut builder = ApiClient::builder()
        .fmp_key(credentials.fmp_key)
        .finnhub_key(credentials.finnhub_key);
    if let Some(t) = http.timeout {
        builder = builder.timeout(t);
    }
    if let Some(u) = http.fmp_base {
        builder = builder.base_fmp(u);
    }
    if let Some(u) = http.finnhub_base {
        builder = builder.base_finnhub(u);
    }
    let client = builder.build()?;

    let started = Instant::now();
    let mut report = Pipeline::new(&client, &run).run().await?;

    match credentials.database_url {
        Some(url) if upload => {
            let db = PostgresSink::connect(&url, database_table).await?;
            let uploaded = db.replace(&report.rows).await;
            db.close().await;
            report.stats.rows_uploaded = Some(uploaded?);
        }
        Some(_) => tracing::info!("database upload disabled"),
        None => tracing::info!("no database configured, upload skipped"),
    }

    report.stats.elapsed = started.elapsed();
    Ok(report)
}
