use serde::Deserialize;
use serde_json::Value;

use super::{LookbackWindow, Mention, SentimentSummary, SocialPlatform, wire::SentimentEnvelope};
use crate::core::{
    ApiClient, PipelineError, Result, SourceApi,
    client::SENTIMENT_PATH,
    net,
    wire::{error_message, is_rate_limit_message, kind},
};

#[tracing::instrument(skip(client, window), err)]
pub(super) async fn fetch_summary(
    client: &ApiClient,
    symbol: &str,
    window: LookbackWindow,
    platform: SocialPlatform,
) -> Result<Option<SentimentSummary>> {
    let mut url = client.finnhub_url(SENTIMENT_PATH)?;
    {
        let mut qp = url.query_pairs_mut();
        qp.append_pair("symbol", symbol);
        qp.append_pair("from", &window.from().to_string());
        qp.append_pair("to", &window.to().to_string());
        qp.append_pair("token", client.finnhub_key());
    }

    let body = net::get_json(client.http(), url, SourceApi::Sentiment).await?;
    let summary = parse_sentiment_body(&body, platform)?;
    if summary.is_none() {
        tracing::debug!(platform = platform.as_str(), "no social mentions in window");
    }
    Ok(summary)
}

fn parse_sentiment_body(body: &Value, platform: SocialPlatform) -> Result<Option<SentimentSummary>> {
    let Some(obj) = body.as_object() else {
        return Err(PipelineError::MalformedResponse {
            source_api: SourceApi::Sentiment,
            detail: format!("expected an object, got {}", kind(body)),
        });
    };

    // An error reply carries no platform keys at all.
    if !obj.contains_key("reddit")
        && !obj.contains_key("twitter")
        && let Some(msg) = error_message(body)
    {
        return Err(if is_rate_limit_message(msg) {
            PipelineError::RateLimited {
                source_api: SourceApi::Sentiment,
                message: msg.to_owned(),
            }
        } else {
            PipelineError::MalformedResponse {
                source_api: SourceApi::Sentiment,
                detail: format!("error message {msg:?}"),
            }
        });
    }

    let env = SentimentEnvelope::deserialize(body).map_err(|e| PipelineError::MalformedResponse {
        source_api: SourceApi::Sentiment,
        detail: e.to_string(),
    })?;

    let nodes = match platform {
        SocialPlatform::Reddit => env.reddit,
        SocialPlatform::Twitter => env.twitter,
    }
    .unwrap_or_default();

    let mentions: Vec<Mention> = nodes.iter().map(Mention::from).collect();
    Ok(SentimentSummary::summarize(&mentions))
}
