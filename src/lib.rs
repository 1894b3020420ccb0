//! screener-pipeline: the daily company screening job.
//!
//! Screens US NASDAQ technology and communication companies, keeps the largest unique
//! issuers, enriches them with full-time headcount and trailing social sentiment, and
//! publishes the flat table to CSV and, optionally, PostgreSQL.
//!
//! ```no_run
//! # async fn demo() -> Result<(), screener_pipeline::PipelineError> {
//! use screener_pipeline::{ApiClient, Pipeline, RunSettings};
//! use secrecy::SecretString;
//!
//! let client = ApiClient::builder()
//!     .fmp_key(SecretString::from("fmp-key".to_string()))
//!     .finnhub_key(SecretString::from("finnhub-key".to_string()))
//!     .build()?;
//! let settings = RunSettings::default();
//! let report = Pipeline::new(&client, &settings).run().await?;
//! println!("{} rows written to {}", report.rows.len(), report.csv_path.display());
//! # Ok(())
//! # }
//! ```

pub mod assemble;
pub mod config;
pub mod core;
pub mod pipeline;
pub mod profile;
pub mod screener;
pub mod secrets;
pub mod sentiment;
pub mod sink;
pub mod stats;

pub use assemble::{Column, CompanyRow, FieldValue, MissingPolicy, assemble};
pub use config::{Credentials, HttpSettings, PipelineConfig, RunSettings};
pub use crate::core::{ApiClient, ApiClientBuilder, EnrichmentStage, PipelineError, Result, SourceApi};
pub use pipeline::{Pipeline, RunReport};
pub use profile::{EmployeeCounts, EmployeeRecord, EmployeesBuilder};
pub use screener::{Candidate, ScreenerBuilder, ScreenerQuery, Sector, Universe};
pub use secrets::{EnvSecretStore, MapSecretStore, SecretStore};
pub use sentiment::{
    LookbackWindow, Mention, SentimentBuilder, SentimentIndex, SentimentSummary, SocialPlatform,
};
pub use stats::RunStats;
