//! Stock screener: fetch one candidate list per sector and rank them into a [`Universe`].

mod api;
mod model;
mod transform;
mod wire;

pub use model::{Candidate, Universe};
pub use transform::transform;

use serde_json::Value;
use std::str::FromStr;

use crate::core::{ApiClient, PipelineError, Result};

/// Screener sector filter, as spelled by the FMP API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sector {
    Technology,
    CommunicationServices,
    ConsumerCyclical,
    ConsumerDefensive,
    Healthcare,
    FinancialServices,
    Industrials,
    Energy,
}

impl Sector {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Sector::Technology => "Technology",
            Sector::CommunicationServices => "Communication Services",
            Sector::ConsumerCyclical => "Consumer Cyclical",
            Sector::ConsumerDefensive => "Consumer Defensive",
            Sector::Healthcare => "Healthcare",
            Sector::FinancialServices => "Financial Services",
            Sector::Industrials => "Industrials",
            Sector::Energy => "Energy",
        }
    }

    /// Technology first, then Communication Services.
    pub fn defaults() -> Vec<Sector> {
        vec![Sector::Technology, Sector::CommunicationServices]
    }
}

impl FromStr for Sector {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self> {
        let norm: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Ok(match norm.as_str() {
            "technology" => Sector::Technology,
            "communicationservices" => Sector::CommunicationServices,
            "consumercyclical" => Sector::ConsumerCyclical,
            "consumerdefensive" => Sector::ConsumerDefensive,
            "healthcare" => Sector::Healthcare,
            "financialservices" => Sector::FinancialServices,
            "industrials" => Sector::Industrials,
            "energy" => Sector::Energy,
            _ => return Err(PipelineError::Config(format!("unknown sector: {s}"))),
        })
    }
}

/// Query parameters shared by every sector request.
#[derive(Debug, Clone)]
pub struct ScreenerQuery {
    pub market_cap_more_than: u64,
    pub actively_trading: bool,
    pub country: String,
    pub exchange: String,
    /// Per-sector result cap sent upstream. Set to the row limit.
    pub limit: usize,
}

impl ScreenerQuery {
    /// US, NASDAQ, actively trading, market cap above $100M.
    pub fn new(limit: usize) -> Self {
        Self {
            market_cap_more_than: 100_000_000,
            actively_trading: true,
            country: "US".into(),
            exchange: "nasdaq".into(),
            limit,
        }
    }
}

/// A builder for screening the configured sectors and ranking the result.
pub struct ScreenerBuilder<'a> {
    client: &'a ApiClient,
    sectors: Vec<Sector>,
    query: ScreenerQuery,
    row_limit: usize,
}

impl<'a> ScreenerBuilder<'a> {
    /// Creates a new `ScreenerBuilder` for the default sectors, capped at `row_limit` rows.
    pub fn new(client: &'a ApiClient, row_limit: usize) -> Self {
        Self {
            client,
            sectors: Sector::defaults(),
            query: ScreenerQuery::new(row_limit),
            row_limit,
        }
    }

    /// Replace the sectors to screen. Order matters: it decides ties in market cap.
    #[must_use]
    pub fn sectors(mut self, sectors: Vec<Sector>) -> Self {
        self.sectors = sectors;
        self
    }

    /// Replace the shared query parameters.
    #[must_use]
    pub fn query(mut self, query: ScreenerQuery) -> Self {
        self.query = query;
        self
    }

    /// Fetch the raw response of every sector, in sector order, one request at a time.
    ///
    /// # Errors
    ///
    /// Returns an error if any request fails or a body is not JSON.
    pub async fn fetch_raw(&self) -> Result<Vec<Value>> {
        tracing::info!(sectors = self.sectors.len(), "stock screener call started");
        let mut out = Vec::with_capacity(self.sectors.len());
        for sector in &self.sectors {
            out.push(api::fetch_sector(self.client, &self.query, sector).await?);
        }
        Ok(out)
    }

    /// Fetch every sector and rank the candidates into a [`Universe`].
    ///
    /// # Errors
    ///
    /// See [`ScreenerBuilder::fetch_raw`] and [`transform`].
    pub async fn fetch(self) -> Result<Universe> {
        let raw = self.fetch_raw().await?;
        transform(&raw, self.row_limit)
    }
}
