use httpmock::Method::GET;
use screener_pipeline::{EmployeesBuilder, PipelineError, SourceApi};

use crate::common::{self, FMP_KEY};

async fn fetch_one(server: &httpmock::MockServer, sym: &str) -> Result<(), PipelineError> {
    let client = common::client_for(server);
    let syms = vec![sym.to_string()];
    EmployeesBuilder::new(&client, &syms).fetch().await.map(|_| ())
}

#[tokio::test]
async fn http_429_maps_to_rate_limited() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/v3/profile/AAPL");
        then.status(429).body("Too Many Requests");
    });

    let err = fetch_one(&server, "AAPL").await.unwrap_err();

    mock.assert();
    assert!(
        matches!(
            err,
            PipelineError::RateLimited {
                source_api: SourceApi::Profile,
                ..
            }
        ),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn http_500_maps_to_status_without_key() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/v3/profile/AAPL");
        then.status(500).body("Internal Server Error");
    });

    let err = fetch_one(&server, "AAPL").await.unwrap_err();

    mock.assert();
    match err {
        PipelineError::Status { status, url } => {
            assert_eq!(status, 500);
            assert!(url.ends_with("/api/v3/profile/AAPL"), "url was {url}");
            assert!(!url.contains(FMP_KEY));
        }
        other => panic!("expected Status, got {other:?}"),
    }
}

#[tokio::test]
async fn limit_reach_object_maps_to_rate_limited() {
    let server = common::setup_server();
    let _m = common::mock_profile(
        &server,
        "AAPL",
        common::fixture("screener", "limit_reached"),
    );

    let err = fetch_one(&server, "AAPL").await.unwrap_err();
    match err {
        PipelineError::RateLimited { source_api, message } => {
            assert_eq!(source_api, SourceApi::Profile);
            assert!(message.contains("Limit Reach"));
        }
        other => panic!("expected RateLimited, got {other:?}"),
    }
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let server = common::setup_server();
    let _m = common::mock_profile(&server, "AAPL", "<html>oops</html>".to_string());

    let err = fetch_one(&server, "AAPL").await.unwrap_err();
    assert!(matches!(
        err,
        PipelineError::MalformedResponse {
            source_api: SourceApi::Profile,
            ..
        }
    ));
}

#[tokio::test]
async fn transport_error_does_not_expose_api_key() {
    // Nothing listens on port 1.
    let base = url::Url::parse("http://127.0.0.1:1/").unwrap();
    let client = screener_pipeline::ApiClient::builder()
        .base_fmp(base.clone())
        .base_finnhub(base)
        .fmp_key(secrecy::SecretString::from(FMP_KEY.to_string()))
        .finnhub_key(secrecy::SecretString::from("unused".to_string()))
        .connect_timeout(std::time::Duration::from_secs(5))
        .build()
        .unwrap();
    let syms = vec!["AAPL".to_string()];

    let err = EmployeesBuilder::new(&client, &syms)
        .fetch()
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::Http(_)), "unexpected error: {err:?}");
    let shown = err.to_string();
    assert!(!shown.contains(FMP_KEY), "api key leaked into error: {shown}");
    let debug = format!("{err:?}");
    assert!(!debug.contains(FMP_KEY), "api key leaked into error: {debug}");
}
