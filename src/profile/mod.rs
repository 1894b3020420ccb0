//! Company profile lookups, used for the full-time employee headcount.

mod api;
mod model;
mod wire;

pub use model::{EmployeeCounts, EmployeeRecord};

use crate::core::{ApiClient, Result, fanout};

/// A builder for fetching the headcount of every ticker in a universe.
pub struct EmployeesBuilder<'a> {
    client: &'a ApiClient,
    tickers: &'a [String],
    concurrency: usize,
}

impl<'a> EmployeesBuilder<'a> {
    /// Creates a new `EmployeesBuilder`. Requests are sequential by default.
    pub fn new(client: &'a ApiClient, tickers: &'a [String]) -> Self {
        Self {
            client,
            tickers,
            concurrency: 1,
        }
    }

    /// Allow up to `n` profile requests in flight.
    #[must_use]
    pub fn concurrency(mut self, n: usize) -> Self {
        self.concurrency = n;
        self
    }

    /// Fetches one profile per ticker and keys the records by symbol.
    ///
    /// # Errors
    ///
    /// The first ticker whose request fails, whose body is not a list, or whose
    /// headcount cannot be coerced to an integer aborts the whole enrichment.
    pub async fn fetch(self) -> Result<EmployeeCounts> {
        tracing::info!(tickers = self.tickers.len(), "adding full time employees started");

        let per_ticker = fanout::per_ticker(self.tickers, self.concurrency, |sym| {
            api::fetch_employee_records(self.client, sym)
        })
        .await?;

        let mut counts = EmployeeCounts::new();
        for record in per_ticker.into_iter().flatten() {
            let symbol = record.symbol.clone();
            if !counts.insert(record) {
                tracing::warn!(%symbol, "duplicate profile record dropped");
            }
        }
        Ok(counts)
    }
}
