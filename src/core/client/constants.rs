//! Centralized constants for default endpoints and UA.

/// UA sent with every request unless overridden.
pub(crate) const USER_AGENT: &str = concat!("screener-pipeline/", env!("CARGO_PKG_VERSION"));

/// FinancialModelingPrep API root (screener and profile paths are joined onto it).
pub(crate) const DEFAULT_BASE_FMP: &str = "https://financialmodelingprep.com/";

/// Finnhub API root (social sentiment path is joined onto it).
pub(crate) const DEFAULT_BASE_FINNHUB: &str = "https://finnhub.io/";

/// Stock screener path, relative to the FMP root.
pub(crate) const SCREENER_PATH: &str = "api/v3/stock-screener";

/// Company profile path, relative to the FMP root. The ticker is appended as a segment.
pub(crate) const PROFILE_PATH: &str = "api/v3/profile";

/// Social sentiment path, relative to the Finnhub root.
pub(crate) const SENTIMENT_PATH: &str = "api/v1/stock/social-sentiment";
