use chrono::NaiveDate;
use httpmock::Method::GET;
use screener_pipeline::{
    LookbackWindow, PipelineError, SentimentBuilder, SentimentSummary, SocialPlatform, SourceApi,
};

use crate::common::{self, FINNHUB_KEY};

fn window() -> LookbackWindow {
    let today = NaiveDate::from_ymd_opt(2023, 3, 9).unwrap();
    LookbackWindow::trailing(today, 7).unwrap()
}

fn tickers(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

#[tokio::test]
async fn offline_sentiment_aggregates_reddit_buckets() {
    let server = common::setup_server();
    let aapl = common::mock_sentiment_fixture(&server, "AAPL");
    let nvda = common::mock_sentiment_fixture(&server, "NVDA");
    let client = common::client_for(&server);

    let syms = tickers(&["AAPL", "NVDA"]);
    let index = SentimentBuilder::new(&client, &syms, window())
        .fetch()
        .await
        .unwrap();

    aapl.assert();
    nvda.assert();
    assert_eq!(
        index.get("AAPL"),
        Some(Some(&SentimentSummary {
            positive_mentions: 18,
            negative_mentions: 6,
            mean_sentiment_score: 0.5,
        }))
    );
    let nvda = index.get("NVDA").flatten().unwrap();
    assert_eq!(nvda.positive_mentions, 2);
    assert_eq!(nvda.negative_mentions, 1);
    assert!((nvda.mean_sentiment_score - 0.25).abs() < 1e-12);
    assert_eq!(index.covered(), 2);
}

#[tokio::test]
async fn empty_platform_list_is_an_empty_record() {
    let server = common::setup_server();
    let _m = common::mock_sentiment_fixture(&server, "GOOGL");
    let client = common::client_for(&server);

    let syms = tickers(&["GOOGL"]);
    let index = SentimentBuilder::new(&client, &syms, window())
        .fetch()
        .await
        .unwrap();

    assert_eq!(index.len(), 1);
    assert_eq!(index.get("GOOGL"), Some(None));
    assert_eq!(index.get("AAPL"), None);
    assert_eq!(index.covered(), 0);
}

#[tokio::test]
async fn platform_selects_which_list_is_aggregated() {
    let server = common::setup_server();
    let _m = common::mock_sentiment_fixture(&server, "MSFT");
    let client = common::client_for(&server);
    let syms = tickers(&["MSFT"]);

    let reddit = SentimentBuilder::new(&client, &syms, window())
        .fetch()
        .await
        .unwrap();
    let twitter = SentimentBuilder::new(&client, &syms, window())
        .platform(SocialPlatform::Twitter)
        .fetch()
        .await
        .unwrap();

    let r = reddit.get("MSFT").flatten().unwrap();
    assert_eq!((r.positive_mentions, r.negative_mentions), (1, 3));
    assert_eq!(r.mean_sentiment_score, -0.5);

    let t = twitter.get("MSFT").flatten().unwrap();
    assert_eq!((t.positive_mentions, t.negative_mentions), (20, 10));
    assert_eq!(t.mean_sentiment_score, 0.4);
}

#[tokio::test]
async fn window_dates_are_sent_as_iso_dates() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/stock/social-sentiment")
            .query_param("symbol", "AAPL")
            .query_param("from", "2023-03-02")
            .query_param("to", "2023-03-09")
            .query_param("token", FINNHUB_KEY);
        then.status(200)
            .header("content-type", "application/json")
            .body(common::fixture("sentiment", "AAPL"));
    });
    let client = common::client_for(&server);

    let syms = tickers(&["AAPL"]);
    SentimentBuilder::new(&client, &syms, window())
        .fetch()
        .await
        .unwrap();

    mock.assert();
}

#[tokio::test]
async fn limit_error_object_is_rate_limited() {
    let server = common::setup_server();
    let _m = common::mock_sentiment(
        &server,
        "AAPL",
        common::fixture("sentiment", "limit_reached"),
    );
    let client = common::client_for(&server);

    let syms = tickers(&["AAPL"]);
    let err = SentimentBuilder::new(&client, &syms, window())
        .fetch()
        .await
        .unwrap_err();

    assert!(
        matches!(
            err,
            PipelineError::RateLimited {
                source_api: SourceApi::Sentiment,
                ..
            }
        ),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn list_body_is_malformed() {
    let server = common::setup_server();
    let _m = common::mock_sentiment(&server, "AAPL", "[]".to_string());
    let client = common::client_for(&server);

    let syms = tickers(&["AAPL"]);
    let err = SentimentBuilder::new(&client, &syms, window())
        .fetch()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::MalformedResponse {
            source_api: SourceApi::Sentiment,
            ..
        }
    ));
}

#[tokio::test]
async fn missing_platform_key_is_an_empty_record() {
    let server = common::setup_server();
    let _m = common::mock_sentiment(&server, "TINY", r#"{"symbol":"TINY"}"#.to_string());
    let client = common::client_for(&server);

    let syms = tickers(&["TINY"]);
    let index = SentimentBuilder::new(&client, &syms, window())
        .fetch()
        .await
        .unwrap();

    assert_eq!(index.get("TINY"), Some(None));
}

#[tokio::test]
async fn concurrent_fetch_keeps_each_summary_on_its_ticker() {
    let server = common::setup_server();
    let syms = tickers(&["AAPL", "MSFT", "GOOGL", "NVDA"]);
    for sym in ["AAPL", "MSFT", "GOOGL", "NVDA"] {
        common::mock_sentiment_fixture(&server, sym);
    }
    let client = common::client_for(&server);

    let sequential = SentimentBuilder::new(&client, &syms, window())
        .fetch()
        .await
        .unwrap();
    let concurrent = SentimentBuilder::new(&client, &syms, window())
        .concurrency(3)
        .fetch()
        .await
        .unwrap();

    assert_eq!(concurrent, sequential);
    assert_eq!(concurrent.len(), 4);
    let msft = concurrent.get("MSFT").flatten().unwrap();
    assert_eq!((msft.positive_mentions, msft.negative_mentions), (1, 3));
    let nvda = concurrent.get("NVDA").flatten().unwrap();
    assert_eq!((nvda.positive_mentions, nvda.negative_mentions), (2, 1));
    assert_eq!(concurrent.get("GOOGL"), Some(None));
    assert_eq!(concurrent.get("AAPL").flatten().unwrap().positive_mentions, 18);
}
