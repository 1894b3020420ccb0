//! Social sentiment over a trailing window, one aggregate per ticker.

mod api;
mod model;
mod wire;

pub use model::{LookbackWindow, Mention, SentimentIndex, SentimentSummary, SocialPlatform};

use crate::core::{ApiClient, Result, fanout};

/// A builder for fetching the sentiment aggregate of every ticker in a universe.
pub struct SentimentBuilder<'a> {
    client: &'a ApiClient,
    tickers: &'a [String],
    window: LookbackWindow,
    platform: SocialPlatform,
    concurrency: usize,
}

impl<'a> SentimentBuilder<'a> {
    /// Creates a new `SentimentBuilder` over `window`, reading Reddit mentions sequentially.
    pub fn new(client: &'a ApiClient, tickers: &'a [String], window: LookbackWindow) -> Self {
        Self {
            client,
            tickers,
            window,
            platform: SocialPlatform::default(),
            concurrency: 1,
        }
    }

    /// Selects which platform's mentions are aggregated.
    #[must_use]
    pub fn platform(mut self, platform: SocialPlatform) -> Self {
        self.platform = platform;
        self
    }

    /// Allow up to `n` sentiment requests in flight.
    #[must_use]
    pub fn concurrency(mut self, n: usize) -> Self {
        self.concurrency = n;
        self
    }

    /// Fetches one aggregate per ticker. Tickers without mentions get an empty record.
    ///
    /// # Errors
    ///
    /// The first request that fails or returns a body of the wrong shape aborts the stage.
    pub async fn fetch(self) -> Result<SentimentIndex> {
        tracing::info!(
            tickers = self.tickers.len(),
            from = %self.window.from(),
            to = %self.window.to(),
            "adding lookback period's social media sentiment started"
        );

        let (window, platform) = (self.window, self.platform);
        let summaries = fanout::per_ticker(self.tickers, self.concurrency, |sym| {
            api::fetch_summary(self.client, sym, window, platform)
        })
        .await?;

        let mut index = SentimentIndex::new();
        for (sym, summary) in self.tickers.iter().zip(summaries) {
            index.insert(sym.clone(), summary);
        }
        Ok(index)
    }
}
