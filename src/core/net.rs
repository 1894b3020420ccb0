use serde_json::Value;
use url::Url;

use crate::core::{
    PipelineError, Result, SourceApi,
    wire::{error_message, is_rate_limit_message},
};

/// GET `url` and decode the body as JSON.
///
/// Non-2xx statuses are mapped before the body is interpreted: 429 → `RateLimited`,
/// anything else → `Status`. A body that is not JSON is a malformed response.
pub(crate) async fn get_json(
    http: &reqwest::Client,
    url: Url,
    api: SourceApi,
) -> Result<Value> {
    tracing::debug!(api = %api, url = %redacted(&url), "GET");

    let resp = http
        .get(url.clone())
        .header("accept", "application/json")
        .send()
        .await
        .map_err(without_url)?;
    let status = resp.status();
    let text = resp.text().await.map_err(without_url)?;

    if !status.is_success() {
        let code = status.as_u16();
        let parsed = serde_json::from_str::<Value>(&text).ok();
        let message = parsed.as_ref().and_then(error_message);
        if code == 429 || message.is_some_and(is_rate_limit_message) {
            return Err(PipelineError::RateLimited {
                source_api: api,
                message: message.map_or_else(|| redacted(&url), str::to_owned),
            });
        }
        return Err(PipelineError::Status {
            status: code,
            url: redacted(&url),
        });
    }

    serde_json::from_str(&text).map_err(|e| PipelineError::MalformedResponse {
        source_api: api,
        detail: format!("body is not valid JSON: {e}"),
    })
}

/// The URL without its query string. Keys travel as query parameters and must
/// never reach logs or error messages.
pub(crate) fn redacted(url: &Url) -> String {
    let mut u = url.clone();
    u.set_query(None);
    u.to_string()
}

// reqwest errors embed the full request URL, query string included.
fn without_url(e: reqwest::Error) -> PipelineError {
    PipelineError::Http(e.without_url())
}
