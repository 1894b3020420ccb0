use chrono::NaiveDate;
use screener_pipeline::{LookbackWindow, Mention, PipelineError, SentimentSummary};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn trailing_window_spans_lookback_days() {
    let w = LookbackWindow::trailing(date(2024, 3, 5), 7).unwrap();
    assert_eq!(w.from(), date(2024, 2, 27));
    assert_eq!(w.to(), date(2024, 3, 5));
}

#[test]
fn zero_day_window_is_today_only() {
    let w = LookbackWindow::trailing(date(2024, 1, 1), 0).unwrap();
    assert_eq!(w.from(), w.to());
}

#[test]
fn inverted_window_is_rejected() {
    let err = LookbackWindow::new(date(2024, 1, 2), date(2024, 1, 1)).unwrap_err();
    assert!(matches!(err, PipelineError::Config(_)));
}

#[test]
fn summary_of_no_mentions_is_none() {
    assert_eq!(SentimentSummary::summarize(&[]), None);
}

#[test]
fn summary_sums_counts_and_averages_scores() {
    let mentions = [
        Mention {
            positive_mention: 3,
            negative_mention: 1,
            score: 0.5,
        },
        Mention {
            positive_mention: 0,
            negative_mention: 4,
            score: -1.0,
        },
    ];
    let s = SentimentSummary::summarize(&mentions).unwrap();
    assert_eq!(s.positive_mentions, 3);
    assert_eq!(s.negative_mentions, 5);
    assert_eq!(s.mean_sentiment_score, -0.25);
}
