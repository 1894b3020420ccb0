//! Public client surface + builder.
//! Default endpoints and the UA live in `constants`.

mod constants;

pub(crate) use constants::{PROFILE_PATH, SCREENER_PATH, SENTIMENT_PATH};

use crate::core::{PipelineError, Result};
use constants::{DEFAULT_BASE_FINNHUB, DEFAULT_BASE_FMP, USER_AGENT};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use url::Url;

/// Holds the configured HTTP client, vendor base URLs and API keys.
///
/// One instance serves all three upstream endpoints for the duration of a run.
#[derive(Debug)]
pub struct ApiClient {
    http: Client,
    base_fmp: Url,
    base_finnhub: Url,
    fmp_key: SecretString,
    finnhub_key: SecretString,
}

impl ApiClient {
    /// Create a new builder.
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn fmp_key(&self) -> &str {
        self.fmp_key.expose_secret()
    }

    pub(crate) fn finnhub_key(&self) -> &str {
        self.finnhub_key.expose_secret()
    }

    /// `{fmp root}/{path}`.
    pub(crate) fn fmp_url(&self, path: &str) -> Result<Url> {
        Ok(self.base_fmp.join(path)?)
    }

    /// `{fmp root}/{path}/{segment}` with the segment percent-encoded.
    pub(crate) fn fmp_url_with_segment(&self, path: &str, segment: &str) -> Result<Url> {
        let mut url = self.fmp_url(path)?;
        url.path_segments_mut()
            .map_err(|()| PipelineError::Config(format!("{} cannot be a base URL", self.base_fmp)))?
            .push(segment);
        Ok(url)
    }

    /// `{finnhub root}/{path}`.
    pub(crate) fn finnhub_url(&self, path: &str) -> Result<Url> {
        Ok(self.base_finnhub.join(path)?)
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct ApiClientBuilder {
    user_agent: Option<String>,
    base_fmp: Option<Url>,
    base_finnhub: Option<Url>,
    fmp_key: Option<SecretString>,
    finnhub_key: Option<SecretString>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl ApiClientBuilder {
    /// Override the User-Agent.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the FinancialModelingPrep root (e.g., `https://financialmodelingprep.com/`).
    #[must_use]
    pub fn base_fmp(mut self, url: Url) -> Self {
        self.base_fmp = Some(url);
        self
    }

    /// Override the Finnhub root (e.g., `https://finnhub.io/`).
    #[must_use]
    pub fn base_finnhub(mut self, url: Url) -> Self {
        self.base_finnhub = Some(url);
        self
    }

    /// API key for the screener and profile endpoints.
    #[must_use]
    pub fn fmp_key(mut self, key: SecretString) -> Self {
        self.fmp_key = Some(key);
        self
    }

    /// API token for the social sentiment endpoint.
    #[must_use]
    pub fn finnhub_key(mut self, key: SecretString) -> Self {
        self.finnhub_key = Some(key);
        self
    }

    /// Set a global request timeout (overall). Default: none.
    #[must_use]
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    #[must_use]
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::MissingSecret`] when either API key was not provided, and
    /// [`PipelineError::Http`] if the underlying HTTP client cannot be constructed.
    pub fn build(self) -> Result<ApiClient> {
        let fmp_key = self.fmp_key.ok_or_else(|| PipelineError::MissingSecret {
            name: "FMI_API_KEY".into(),
        })?;
        let finnhub_key = self.finnhub_key.ok_or_else(|| PipelineError::MissingSecret {
            name: "FINNH_API_KEY".into(),
        })?;

        let base_fmp = directory_url(match self.base_fmp {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_FMP)?,
        });
        let base_finnhub = directory_url(match self.base_finnhub {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_FINNHUB)?,
        });

        let mut httpb =
            reqwest::Client::builder().user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT));

        if let Some(t) = self.timeout {
            httpb = httpb.timeout(t);
        }
        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        Ok(ApiClient {
            http: httpb.build()?,
            base_fmp,
            base_finnhub,
            fmp_key,
            finnhub_key,
        })
    }
}

// `Url::join` replaces the last segment unless the base ends with '/'.
fn directory_url(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
