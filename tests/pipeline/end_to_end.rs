use chrono::NaiveDate;
use screener_pipeline::{
    MapSecretStore, Pipeline, PipelineConfig, RunSettings,
    config::{FINNHUB_KEY_SECRET, FMP_KEY_SECRET},
    pipeline::run_job,
};

use crate::common::{self, FINNHUB_KEY, FMP_KEY};

const UNIVERSE: [&str; 4] = ["AAPL", "MSFT", "GOOGL", "NVDA"];

fn mock_all(server: &httpmock::MockServer) {
    common::mock_default_screener(server);
    for sym in UNIVERSE {
        common::mock_profile_fixture(server, sym);
        common::mock_sentiment_fixture(server, sym);
    }
}

#[tokio::test]
async fn offline_run_writes_the_final_table() {
    let server = common::setup_server();
    mock_all(&server);
    let client = common::client_for(&server);
    let dir = tempfile::tempdir().unwrap();
    let settings = RunSettings {
        row_limit: 4,
        output_path: dir.path().join("data").join("final_data.csv"),
        ..RunSettings::default()
    };

    let report = Pipeline::new(&client, &settings)
        .today(NaiveDate::from_ymd_opt(2023, 3, 9).unwrap())
        .run()
        .await
        .unwrap();

    assert_eq!(report.rows.len(), 4);
    assert_eq!(report.stats.universe, 4);
    assert_eq!(report.stats.screened, 7);
    assert_eq!(report.stats.with_employees, 4);
    assert_eq!(report.stats.with_sentiment, 3);
    assert_eq!(report.stats.empty_sentiment, 1);
    assert_eq!(report.stats.rows_written, 4);

    let csv = std::fs::read_to_string(&report.csv_path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines,
        [
            ",symbol,companyName,marketCap,beta,fullTimeEmployees,positiveMentions,negativeMentions,meanSentimentScore",
            "0,AAPL,Apple Inc.,2400000000000,1.286802,164000,18,6,0.5",
            "1,MSFT,Microsoft Corporation,2000000000000,0.923,221000,1,3,-0.5",
            "2,GOOGL,Alphabet Inc.,1200000000000,1.062,190234,,,",
            "3,NVDA,NVIDIA Corporation,1100000000000,1.751,26196,2,1,0.25",
        ]
    );
}

#[tokio::test]
async fn rerun_overwrites_previous_output() {
    let server = common::setup_server();
    mock_all(&server);
    let client = common::client_for(&server);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("final_data.csv");
    std::fs::write(&path, "stale\nstale\nstale\nstale\nstale\nstale\nstale\n").unwrap();

    let settings = RunSettings {
        row_limit: 2,
        output_path: path.clone(),
        ..RunSettings::default()
    };
    Pipeline::new(&client, &settings).run().await.unwrap();

    let csv = std::fs::read_to_string(&path).unwrap();
    assert_eq!(csv.lines().count(), 3);
    assert!(!csv.contains("stale"));
}

#[tokio::test]
async fn run_job_without_database_writes_csv_only() {
    let server = common::setup_server();
    mock_all(&server);
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("final_data.csv");
    let base = format!("{}/", server.base_url());
    let out_str = out.to_string_lossy().into_owned();

    let vars = [
        ("ROW_LIMIT", "3"),
        ("OUTPUT_CSV", out_str.as_str()),
        ("FMP_BASE_URL", base.as_str()),
        ("FINNHUB_BASE_URL", base.as_str()),
    ];
    let secrets = MapSecretStore::new()
        .with("", FMP_KEY_SECRET, FMP_KEY)
        .with("", FINNHUB_KEY_SECRET, FINNHUB_KEY);
    let config = PipelineConfig::from_lookup(
        |k| {
            vars.iter()
                .find(|(name, _)| *name == k)
                .map(|(_, v)| (*v).to_string())
        },
        &secrets,
    )
    .unwrap();

    let report = run_job(config, true).await.unwrap();

    assert_eq!(report.stats.rows_uploaded, None);
    let symbols: Vec<&str> = report.rows.iter().map(|r| r.symbol.as_str()).collect();
    assert_eq!(symbols, ["AAPL", "MSFT", "GOOGL"]);
    assert!(out.exists());
}
