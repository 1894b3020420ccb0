use serde_json::Value;

use super::{ScreenerQuery, Sector};
use crate::core::{ApiClient, Result, SourceApi, client::SCREENER_PATH, net};

pub(super) async fn fetch_sector(
    client: &ApiClient,
    query: &ScreenerQuery,
    sector: &Sector,
) -> Result<Value> {
    let mut url = client.fmp_url(SCREENER_PATH)?;
    {
        let mut qp = url.query_pairs_mut();
        qp.append_pair("marketCapMoreThan", &query.market_cap_more_than.to_string());
        qp.append_pair("isActivelyTrading", if query.actively_trading { "true" } else { "false" });
        qp.append_pair("sector", sector.as_str());
        qp.append_pair("country", &query.country);
        qp.append_pair("exchange", &query.exchange);
        qp.append_pair("limit", &query.limit.to_string());
        qp.append_pair("apikey", client.fmp_key());
    }

    let body = net::get_json(client.http(), url, SourceApi::Screener).await?;
    tracing::debug!(
        sector = sector.as_str(),
        entries = body.as_array().map(Vec::len),
        "screener response received"
    );
    Ok(body)
}
