//! Environment-driven configuration.
//!
//! Built once at process start and handed to each component.

use secrecy::SecretString;
use std::{path::PathBuf, str::FromStr, time::Duration};
use url::Url;

use crate::{
    assemble::MissingPolicy,
    core::{PipelineError, Result},
    screener::Sector,
    secrets::{EnvSecretStore, SecretStore},
    sentiment::SocialPlatform,
    sink::is_plain_identifier,
};

/// Secret names resolved through the [`SecretStore`].
pub const FMP_KEY_SECRET: &str = "FMI_API_KEY";
pub const FINNHUB_KEY_SECRET: &str = "FINNH_API_KEY";
pub const DATABASE_URL_SECRET: &str = "DATABASE_URL";

/// Everything a run needs.
#[derive(Debug)]
pub struct PipelineConfig {
    /// Project id secrets are scoped to (may be empty).
    pub project_id: String,
    /// Pipeline tunables.
    pub run: RunSettings,
    /// HTTP client settings.
    pub http: HttpSettings,
    /// Resolved credentials.
    pub credentials: Credentials,
    /// Target table for the database upload.
    pub database_table: String,
}

/// Tunables of the extraction pipeline.
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Upper bound on universe size and per-sector screener results. Must be > 0.
    pub row_limit: usize,
    /// Sectors to screen, in tie-break order.
    pub sectors: Vec<Sector>,
    /// Trailing days of social sentiment.
    pub lookback_days: u64,
    /// Platform whose mentions are aggregated.
    pub platform: SocialPlatform,
    /// Handling of tickers without an enrichment record.
    pub missing_policy: MissingPolicy,
    /// Per-ticker requests in flight. 1 is sequential.
    pub concurrency: usize,
    /// CSV destination, overwritten each run.
    pub output_path: PathBuf,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            row_limit: 12,
            sectors: Sector::defaults(),
            lookback_days: 7,
            platform: SocialPlatform::Reddit,
            missing_policy: MissingPolicy::Fail,
            concurrency: 1,
            output_path: PathBuf::from("data").join("final_data.csv"),
        }
    }
}

impl RunSettings {
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`] for a zero row limit, zero concurrency or no sectors.
    pub fn validate(&self) -> Result<()> {
        if self.row_limit == 0 {
            return Err(PipelineError::Config("ROW_LIMIT must be greater than 0".into()));
        }
        if self.concurrency == 0 {
            return Err(PipelineError::Config("ENRICH_CONCURRENCY must be greater than 0".into()));
        }
        if self.sectors.is_empty() {
            return Err(PipelineError::Config("SCREENER_SECTORS must name at least one sector".into()));
        }
        Ok(())
    }
}

/// HTTP client settings. `None` keeps the client default.
#[derive(Debug, Clone, Default)]
pub struct HttpSettings {
    pub timeout: Option<Duration>,
    pub fmp_base: Option<Url>,
    pub finnhub_base: Option<Url>,
}

/// API keys and the optional database URL.
#[derive(Debug)]
pub struct Credentials {
    pub fmp_key: SecretString,
    pub finnhub_key: SecretString,
    /// Upload is skipped when unset.
    pub database_url: Option<SecretString>,
}

impl PipelineConfig {
    /// Load `.env` if present, then read the process environment and resolve secrets
    /// from it.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`] for unparsable values or an unusable table name,
    /// and [`PipelineError::MissingSecret`] when an API key is absent.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|k| std::env::var(k).ok(), &EnvSecretStore)
    }

    /// Build from an arbitrary variable lookup and secret store.
    ///
    /// # Errors
    ///
    /// See [`PipelineConfig::from_env`].
    pub fn from_lookup<F, S>(var: F, secrets: &S) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
        S: SecretStore + ?Sized,
    {
        let defaults = RunSettings::default();
        let project_id = var("PROJECT_ID").unwrap_or_default();

        let sectors = match var("SCREENER_SECTORS") {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(Sector::from_str)
                .collect::<Result<Vec<_>>>()?,
            None => defaults.sectors,
        };

        let run = RunSettings {
            row_limit: parse_or(&var, "ROW_LIMIT", defaults.row_limit)?,
            sectors,
            lookback_days: parse_or(&var, "SENTIMENT_LOOKBACK_DAYS", defaults.lookback_days)?,
            platform: parse_or(&var, "SENTIMENT_PLATFORM", defaults.platform)?,
            missing_policy: parse_or(&var, "MISSING_ENRICHMENT", defaults.missing_policy)?,
            concurrency: parse_or(&var, "ENRICH_CONCURRENCY", defaults.concurrency)?,
            output_path: var("OUTPUT_CSV").map_or(defaults.output_path, PathBuf::from),
        };
        run.validate()?;

        let http = HttpSettings {
            timeout: parse_opt::<u64, _>(&var, "HTTP_TIMEOUT_SECS")?.map(Duration::from_secs),
            fmp_base: parse_opt(&var, "FMP_BASE_URL")?,
            finnhub_base: parse_opt(&var, "FINNHUB_BASE_URL")?,
        };

        let database_table = var("DATABASE_TABLE").unwrap_or_else(|| "final_data".into());
        if !is_plain_identifier(&database_table) {
            return Err(PipelineError::Config(format!(
                "DATABASE_TABLE={database_table:?} is not a plain identifier"
            )));
        }

        let credentials = Credentials {
            fmp_key: secrets.require(&project_id, FMP_KEY_SECRET)?,
            finnhub_key: secrets.require(&project_id, FINNHUB_KEY_SECRET)?,
            database_url: secrets.lookup(&project_id, DATABASE_URL_SECRET)?,
        };

        Ok(Self {
            project_id,
            run,
            http,
            credentials,
            database_table,
        })
    }
}

fn parse_opt<T, F>(var: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    var(key)
        .filter(|v| !v.trim().is_empty())
        .map(|v| {
            v.trim()
                .parse()
                .map_err(|e| PipelineError::Config(format!("{key}={v:?}: {e}")))
        })
        .transpose()
}

fn parse_or<T, F>(var: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    Ok(parse_opt(var, key)?.unwrap_or(default))
}
