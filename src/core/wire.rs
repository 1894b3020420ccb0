use serde_json::Value;

use crate::core::{PipelineError, Result, SourceApi};

/// Substring the FMP API puts in its error message once the daily quota is used up.
/// Finnhub says "API limit reached", so matching ignores ASCII case.
pub(crate) const RATE_LIMIT_MARKER: &str = "Limit Reach";

/// Keys under which the vendors report errors in place of a payload.
const ERROR_KEYS: [&str; 2] = ["Error Message", "error"];

pub(crate) fn error_message(value: &Value) -> Option<&str> {
    let obj = value.as_object()?;
    ERROR_KEYS
        .iter()
        .find_map(|k| obj.get(*k).and_then(Value::as_str))
}

pub(crate) fn is_rate_limit_message(message: &str) -> bool {
    message
        .to_ascii_lowercase()
        .contains(&RATE_LIMIT_MARKER.to_ascii_lowercase())
}

/// Accept a list-shaped response, or classify the error object that came back instead.
pub(crate) fn expect_list(value: &Value, api: SourceApi) -> Result<&[Value]> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(classify_non_list(other, api)),
    }
}

fn classify_non_list(value: &Value, api: SourceApi) -> PipelineError {
    match error_message(value) {
        Some(msg) if is_rate_limit_message(msg) => PipelineError::RateLimited {
            source_api: api,
            message: msg.to_owned(),
        },
        Some(msg) => PipelineError::MalformedResponse {
            source_api: api,
            detail: format!("expected a list, got error message {msg:?}"),
        },
        None => PipelineError::MalformedResponse {
            source_api: api,
            detail: format!("expected a list, got {}", kind(value)),
        },
    }
}

pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Coerce a wire value holding a non-negative integer, string-encoded or not.
pub(crate) fn coerce_u64(value: &Value) -> Option<u64> {
    match value {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_u64().or_else(|| {
            let f = n.as_f64()?;
            if f.fract() == 0.0 && f >= 0.0 && f <= u64::MAX as f64 {
                // Bounds checked above.
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                Some(f as u64)
            } else {
                None
            }
        }),
        _ => None,
    }
}
