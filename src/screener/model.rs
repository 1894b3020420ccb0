/// One company returned by the screener, reduced to the fields the pipeline keeps.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Ticker symbol, e.g. `AAPL`.
    pub symbol: String,
    /// Issuer name. Unique within a [`Universe`].
    pub company_name: String,
    /// Market capitalization in USD.
    pub market_cap: f64,
    /// 5Y monthly beta. `None` when the screener reports null.
    pub beta: Option<f64>,
}

/// The ranked, deduplicated, size-limited set of companies selected for a run.
///
/// Tickers and candidates are index-aligned by construction.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Universe {
    tickers: Vec<String>,
    candidates: Vec<Candidate>,
}

impl Universe {
    /// Build a universe from already ranked candidates; the ticker list is derived from them.
    pub fn from_candidates(candidates: Vec<Candidate>) -> Self {
        let tickers = candidates.iter().map(|c| c.symbol.clone()).collect();
        Self {
            tickers,
            candidates,
        }
    }

    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}
