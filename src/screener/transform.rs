use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;

use super::{Candidate, Universe, wire::ScreenerNode};
use crate::core::{PipelineError, Result, SourceApi, wire::expect_list};

/// Turn raw screener responses into the ticker universe.
///
/// Responses are concatenated in the order given, ranked by descending market cap
/// (stable, so ties keep that order), deduplicated by company name and by symbol keeping
/// the first occurrence, and truncated to `row_limit`. Pure function of its inputs.
///
/// # Errors
///
/// Fails with [`PipelineError::RateLimited`] when a response is the vendor's
/// "Limit Reach" error object, and with [`PipelineError::MalformedResponse`] for any
/// other non-list response or an entry missing `symbol`, `companyName` or `marketCap`.
pub fn transform(responses: &[Value], row_limit: usize) -> Result<Universe> {
    let lists = responses
        .iter()
        .map(|raw| expect_list(raw, SourceApi::Screener))
        .collect::<Result<Vec<_>>>()?;

    let mut nodes = Vec::with_capacity(lists.iter().map(|l| l.len()).sum());
    for (i, item) in lists.into_iter().flatten().enumerate() {
        let node = ScreenerNode::deserialize(item).map_err(|e| PipelineError::MalformedResponse {
            source_api: SourceApi::Screener,
            detail: format!("entry #{i}: {e}"),
        })?;
        nodes.push(node);
    }

    nodes.sort_by(|a, b| b.market_cap.total_cmp(&a.market_cap));

    // Share classes of one issuer (GOOGL/GOOG) collapse onto the larger one.
    // A ticker listed under two name spellings is kept once as well.
    let mut names = HashSet::new();
    let mut symbols = HashSet::new();
    let candidates: Vec<Candidate> = nodes
        .into_iter()
        .filter(|n| {
            if names.contains(&n.company_name) || symbols.contains(&n.symbol) {
                return false;
            }
            names.insert(n.company_name.clone());
            symbols.insert(n.symbol.clone())
        })
        .take(row_limit)
        .map(Candidate::from)
        .collect();

    Ok(Universe::from_candidates(candidates))
}
