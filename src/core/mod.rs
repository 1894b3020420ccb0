//! Core components of the `screener-pipeline` crate.
//!
//! This module contains the foundational building blocks shared by the three fetchers:
//! - The [`ApiClient`] and its builder.
//! - The primary [`PipelineError`] type.
//! - Internal networking and response-shape validation.

/// The HTTP client (`ApiClient`), builder, and default endpoints.
pub mod client;
/// The primary error type (`PipelineError`) for the crate.
pub mod error;
pub(crate) mod fanout;
pub(crate) mod net;
pub(crate) mod wire;

// convenient re-exports so most code can just `use crate::core::ApiClient`
pub use client::{ApiClient, ApiClientBuilder};
pub use error::{EnrichmentStage, PipelineError, Result, SourceApi};
