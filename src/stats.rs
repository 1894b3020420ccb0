//! Per-run statistics.

use std::time::Duration;

/// Counters collected while a run progresses.
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    /// Raw screener entries across all sectors, before dedup and truncation.
    pub screened: usize,
    /// Companies kept in the universe.
    pub universe: usize,
    /// Tickers with an employee record.
    pub with_employees: usize,
    /// Tickers with a non-empty sentiment summary.
    pub with_sentiment: usize,
    /// Tickers queried for sentiment that had no mentions.
    pub empty_sentiment: usize,
    /// Data rows written to the CSV.
    pub rows_written: usize,
    /// Rows counted back after the database upload, if one ran.
    pub rows_uploaded: Option<i64>,
    pub elapsed: Duration,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share of the universe with sentiment coverage (%).
    pub fn sentiment_coverage(&self) -> f64 {
        if self.universe == 0 {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            let pct = (self.with_sentiment as f64 / self.universe as f64) * 100.0;
            pct
        }
    }

    pub fn log_summary(&self) {
        tracing::info!(
            screened = self.screened,
            universe = self.universe,
            with_employees = self.with_employees,
            with_sentiment = self.with_sentiment,
            empty_sentiment = self.empty_sentiment,
            rows_written = self.rows_written,
            rows_uploaded = ?self.rows_uploaded,
            sentiment_coverage = format!("{:.1}%", self.sentiment_coverage()),
            elapsed = format!("{:.1}s", self.elapsed.as_secs_f64()),
            "run complete"
        );
    }
}
