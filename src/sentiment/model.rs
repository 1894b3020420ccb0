use chrono::{Days, NaiveDate};
use std::collections::BTreeMap;

use crate::core::{PipelineError, Result};

/// One per-period social mention bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mention {
    pub positive_mention: u64,
    pub negative_mention: u64,
    pub score: f64,
}

/// Aggregate social sentiment for one ticker over a lookback window.
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentSummary {
    /// Sum of positive mentions.
    pub positive_mentions: u64,
    /// Sum of negative mentions.
    pub negative_mentions: u64,
    /// Arithmetic mean of the per-bucket scores. Typically in [-1, 1] but not clamped.
    pub mean_sentiment_score: f64,
}

impl SentimentSummary {
    /// Aggregate a window of mentions. `None` when there are none.
    pub fn summarize(mentions: &[Mention]) -> Option<Self> {
        if mentions.is_empty() {
            return None;
        }
        let total_score: f64 = mentions.iter().map(|m| m.score).sum();
        #[allow(clippy::cast_precision_loss)]
        let mean = total_score / mentions.len() as f64;
        Some(Self {
            positive_mentions: mentions.iter().map(|m| m.positive_mention).sum(),
            negative_mentions: mentions.iter().map(|m| m.negative_mention).sum(),
            mean_sentiment_score: mean,
        })
    }
}

/// Sentiment per ticker. A present key with `None` is an empty record: the ticker was
/// queried and had no social data in the window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SentimentIndex {
    by_symbol: BTreeMap<String, Option<SentimentSummary>>,
}

impl SentimentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, symbol: impl Into<String>, summary: Option<SentimentSummary>) {
        self.by_symbol.insert(symbol.into(), summary);
    }

    /// Outer `None`: the ticker was never queried. Inner `None`: an empty record.
    pub fn get(&self, symbol: &str) -> Option<Option<&SentimentSummary>> {
        self.by_symbol.get(symbol).map(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.by_symbol.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_symbol.is_empty()
    }

    /// Number of tickers with a non-empty summary.
    pub fn covered(&self) -> usize {
        self.by_symbol.values().filter(|s| s.is_some()).count()
    }
}

/// Which platform's mentions to aggregate from the sentiment payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SocialPlatform {
    /// Reddit. Default: twitter data is no longer served on the free tier.
    #[default]
    Reddit,
    Twitter,
}

impl SocialPlatform {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            SocialPlatform::Reddit => "reddit",
            SocialPlatform::Twitter => "twitter",
        }
    }
}

impl std::str::FromStr for SocialPlatform {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reddit" => Ok(SocialPlatform::Reddit),
            "twitter" => Ok(SocialPlatform::Twitter),
            other => Err(PipelineError::Config(format!("unknown social platform: {other}"))),
        }
    }
}

/// Inclusive date range sent as `from`/`to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookbackWindow {
    from: NaiveDate,
    to: NaiveDate,
}

impl LookbackWindow {
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`] when `from` is after `to`.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self> {
        if from > to {
            return Err(PipelineError::Config(format!(
                "lookback window starts after it ends: {from} > {to}"
            )));
        }
        Ok(Self { from, to })
    }

    /// The `days` days before `today`, through `today`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`] if the start date underflows the calendar.
    pub fn trailing(today: NaiveDate, days: u64) -> Result<Self> {
        let from = today
            .checked_sub_days(Days::new(days))
            .ok_or_else(|| PipelineError::Config(format!("lookback of {days} days is out of range")))?;
        Ok(Self { from, to: today })
    }

    pub fn from(&self) -> NaiveDate {
        self.from
    }

    pub fn to(&self) -> NaiveDate {
        self.to
    }
}
