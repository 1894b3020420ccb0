//! Symbol-keyed assembly of the final table.
//!
//! Enrichment is joined onto candidates by ticker symbol, never by list position, so a
//! profile endpoint that returns zero or several records cannot shift data onto the
//! wrong company. A symbol with no enrichment record is handled by [`MissingPolicy`],
//! the same way for both stages.

mod row;

pub use row::{Column, CompanyRow, FieldValue};

use std::str::FromStr;

use crate::{
    core::{EnrichmentStage, PipelineError, Result},
    profile::EmployeeCounts,
    screener::{Candidate, Universe},
    sentiment::SentimentIndex,
};

/// What to do when a ticker has no record in an enrichment stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingPolicy {
    /// Abort the run with [`PipelineError::MissingEnrichment`].
    #[default]
    Fail,
    /// Keep the row and leave that stage's fields absent.
    Omit,
}

impl FromStr for MissingPolicy {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail" => Ok(MissingPolicy::Fail),
            "omit" | "skip" => Ok(MissingPolicy::Omit),
            other => Err(PipelineError::Config(format!("unknown missing-enrichment policy: {other}"))),
        }
    }
}

fn missing(policy: MissingPolicy, stage: EnrichmentStage, symbol: &str) -> Result<()> {
    match policy {
        MissingPolicy::Fail => Err(PipelineError::MissingEnrichment {
            stage,
            symbol: symbol.to_owned(),
        }),
        MissingPolicy::Omit => {
            tracing::warn!(%stage, symbol, "enrichment record missing, row kept without it");
            Ok(())
        }
    }
}

/// Attach headcount to every candidate, in candidate order.
///
/// # Errors
///
/// Under [`MissingPolicy::Fail`], the first candidate without an employee record.
pub fn merge_employees(
    candidates: &[Candidate],
    employees: &EmployeeCounts,
    policy: MissingPolicy,
) -> Result<Vec<CompanyRow>> {
    candidates
        .iter()
        .map(|c| {
            let mut row = CompanyRow::from(c);
            match employees.get(&c.symbol) {
                Some(e) => row.full_time_employees = Some(e.full_time_employees),
                None => missing(policy, EnrichmentStage::Employees, &c.symbol)?,
            }
            Ok(row)
        })
        .collect()
}

/// Merge sentiment fields into the rows. Empty records leave the row untouched.
///
/// # Errors
///
/// Under [`MissingPolicy::Fail`], the first row whose symbol was never queried.
pub fn merge_sentiment(
    mut rows: Vec<CompanyRow>,
    sentiment: &SentimentIndex,
    policy: MissingPolicy,
) -> Result<Vec<CompanyRow>> {
    for row in &mut rows {
        match sentiment.get(&row.symbol) {
            Some(summary) => row.sentiment = summary.cloned(),
            None => missing(policy, EnrichmentStage::Sentiment, &row.symbol)?,
        }
    }
    Ok(rows)
}

/// Both merges in order: employees, then sentiment.
///
/// # Errors
///
/// See [`merge_employees`] and [`merge_sentiment`].
pub fn assemble(
    universe: &Universe,
    employees: &EmployeeCounts,
    sentiment: &SentimentIndex,
    policy: MissingPolicy,
) -> Result<Vec<CompanyRow>> {
    let rows = merge_employees(universe.candidates(), employees, policy)?;
    merge_sentiment(rows, sentiment, policy)
}
