use serde::Deserialize;

use super::Candidate;

/* --------- Minimal serde mapping of one /api/v3/stock-screener entry --------- */

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ScreenerNode {
    pub(crate) symbol: String,
    pub(crate) company_name: String,
    pub(crate) market_cap: f64,
    #[serde(default)]
    pub(crate) beta: Option<f64>,
}

impl From<ScreenerNode> for Candidate {
    fn from(n: ScreenerNode) -> Self {
        Self {
            symbol: n.symbol,
            company_name: n.company_name,
            market_cap: n.market_cap,
            beta: n.beta,
        }
    }
}
