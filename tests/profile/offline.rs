use screener_pipeline::{EmployeesBuilder, PipelineError};

use crate::common;

fn tickers(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

#[tokio::test]
async fn offline_profiles_use_recorded_fixtures() {
    let server = common::setup_server();
    let aapl = common::mock_profile_fixture(&server, "AAPL");
    let msft = common::mock_profile_fixture(&server, "MSFT");
    let client = common::client_for(&server);

    let syms = tickers(&["AAPL", "MSFT"]);
    let counts = EmployeesBuilder::new(&client, &syms).fetch().await.unwrap();

    aapl.assert();
    msft.assert();
    assert_eq!(counts.len(), 2);
    assert_eq!(counts.get("AAPL").unwrap().full_time_employees, 164_000);
    assert_eq!(counts.get("MSFT").unwrap().full_time_employees, 221_000);
    assert_eq!(
        counts.get("AAPL").unwrap().company_name.as_deref(),
        Some("Apple Inc.")
    );
}

#[tokio::test]
async fn numeric_headcount_is_accepted() {
    let server = common::setup_server();
    let _m = common::mock_profile(
        &server,
        "ACME",
        r#"[{"symbol":"ACME","companyName":"Acme","fullTimeEmployees":1200}]"#.to_string(),
    );
    let client = common::client_for(&server);

    let syms = tickers(&["ACME"]);
    let counts = EmployeesBuilder::new(&client, &syms).fetch().await.unwrap();
    assert_eq!(counts.get("ACME").unwrap().full_time_employees, 1200);
}

#[tokio::test]
async fn non_integer_headcount_is_a_coercion_error() {
    let server = common::setup_server();
    let _m = common::mock_profile_fixture(&server, "BAD");
    let client = common::client_for(&server);

    let syms = tickers(&["BAD"]);
    let err = EmployeesBuilder::new(&client, &syms)
        .fetch()
        .await
        .unwrap_err();

    match err {
        PipelineError::Coercion { symbol, field, value } => {
            assert_eq!(symbol, "BAD");
            assert_eq!(field, "fullTimeEmployees");
            assert!(value.contains("about 40 people"));
        }
        other => panic!("expected Coercion, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_profile_list_leaves_symbol_absent() {
    let server = common::setup_server();
    let _aapl = common::mock_profile_fixture(&server, "AAPL");
    let _gone = common::mock_profile(&server, "GONE", "[]".to_string());
    let client = common::client_for(&server);

    let syms = tickers(&["AAPL", "GONE"]);
    let counts = EmployeesBuilder::new(&client, &syms).fetch().await.unwrap();

    assert_eq!(counts.len(), 1);
    assert!(counts.get("GONE").is_none());
}

#[tokio::test]
async fn records_are_keyed_by_their_own_symbol() {
    let server = common::setup_server();
    // Two records for one request: nothing may be assigned positionally.
    let _m = common::mock_profile(
        &server,
        "PAIR",
        r#"[
            {"symbol":"PAIR","fullTimeEmployees":"10"},
            {"symbol":"PAIR.B","fullTimeEmployees":"20"}
        ]"#
        .to_string(),
    );
    let _next = common::mock_profile(
        &server,
        "NEXT",
        r#"[{"symbol":"NEXT","fullTimeEmployees":"30"}]"#.to_string(),
    );
    let client = common::client_for(&server);

    let syms = tickers(&["PAIR", "NEXT"]);
    let counts = EmployeesBuilder::new(&client, &syms).fetch().await.unwrap();

    assert_eq!(counts.get("PAIR").unwrap().full_time_employees, 10);
    assert_eq!(counts.get("PAIR.B").unwrap().full_time_employees, 20);
    assert_eq!(counts.get("NEXT").unwrap().full_time_employees, 30);
}

#[tokio::test]
async fn concurrent_fetch_matches_sequential() {
    let server = common::setup_server();
    for sym in ["AAPL", "MSFT", "GOOGL", "NVDA"] {
        common::mock_profile_fixture(&server, sym);
    }
    let client = common::client_for(&server);
    let syms = tickers(&["AAPL", "MSFT", "GOOGL", "NVDA"]);

    let sequential = EmployeesBuilder::new(&client, &syms).fetch().await.unwrap();
    let concurrent = EmployeesBuilder::new(&client, &syms)
        .concurrency(4)
        .fetch()
        .await
        .unwrap();

    assert_eq!(sequential, concurrent);
    assert_eq!(concurrent.get("NVDA").unwrap().full_time_employees, 26_196);
}
