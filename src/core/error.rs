use thiserror::Error;

/// Which upstream API produced a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceApi {
    /// The FinancialModelingPrep stock screener.
    Screener,
    /// The FinancialModelingPrep company profile endpoint.
    Profile,
    /// The Finnhub social sentiment endpoint.
    Sentiment,
}

impl std::fmt::Display for SourceApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SourceApi::Screener => "screener",
            SourceApi::Profile => "profile",
            SourceApi::Sentiment => "sentiment",
        })
    }
}

/// Enrichment stage a missing record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichmentStage {
    /// Full-time employee headcount.
    Employees,
    /// Social sentiment aggregate.
    Sentiment,
}

impl std::fmt::Display for EnrichmentStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            EnrichmentStage::Employees => "employees",
            EnrichmentStage::Sentiment => "sentiment",
        })
    }
}

/// The primary error type for every fallible operation in this crate.
///
/// All variants are fatal to the current run. Nothing is retried.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// An error occurred during an HTTP request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The upstream API reported that the request quota is exhausted.
    #[error("API limit is reached for the {source_api} API: {message}")]
    RateLimited {
        /// The API that refused the request.
        source_api: SourceApi,
        /// The message returned by the API, or the URL for an HTTP 429.
        message: String,
    },

    /// The response parsed as JSON but did not have the expected shape.
    #[error("{source_api} API response data is not in the correct format: {detail}")]
    MalformedResponse {
        /// The API that returned the response.
        source_api: SourceApi,
        /// What was wrong with it.
        detail: String,
    },

    /// A field could not be converted to the expected type.
    #[error("cannot coerce {field} of {symbol} to an integer: {value}")]
    Coercion {
        /// The ticker the record belongs to.
        symbol: String,
        /// The field name as it appears on the wire.
        field: &'static str,
        /// The offending raw value.
        value: String,
    },

    /// An enrichment record was absent for a ticker in the universe.
    #[error("no {stage} record for {symbol}")]
    MissingEnrichment {
        /// The stage that has no record.
        stage: EnrichmentStage,
        /// The ticker that is missing.
        symbol: String,
    },

    /// The server returned an unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// Reading or writing a local file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing the output table failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The database rejected a statement or the connection failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A named secret could not be resolved.
    #[error("secret {name} is not set")]
    MissingSecret {
        /// The secret name.
        name: String,
    },

    /// The configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PipelineError>;
