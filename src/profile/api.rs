use serde::Deserialize;
use serde_json::Value;

use super::{EmployeeRecord, wire::ProfileNode};
use crate::core::{
    ApiClient, PipelineError, Result, SourceApi,
    client::PROFILE_PATH,
    net,
    wire::{coerce_u64, expect_list},
};

#[tracing::instrument(skip(client), err)]
pub(super) async fn fetch_employee_records(
    client: &ApiClient,
    symbol: &str,
) -> Result<Vec<EmployeeRecord>> {
    let mut url = client.fmp_url_with_segment(PROFILE_PATH, symbol)?;
    url.query_pairs_mut().append_pair("apikey", client.fmp_key());

    let body = net::get_json(client.http(), url, SourceApi::Profile).await?;
    let records = parse_profile_body(&body)?;
    if records.len() != 1 {
        tracing::warn!(count = records.len(), "profile endpoint did not return exactly one record");
    }
    Ok(records)
}

fn parse_profile_body(body: &Value) -> Result<Vec<EmployeeRecord>> {
    expect_list(body, SourceApi::Profile)?
        .iter()
        .map(|item| {
            let node =
                ProfileNode::deserialize(item).map_err(|e| PipelineError::MalformedResponse {
                    source_api: SourceApi::Profile,
                    detail: e.to_string(),
                })?;
            let raw = node.full_time_employees.unwrap_or(Value::Null);
            let full_time_employees =
                coerce_u64(&raw).ok_or_else(|| PipelineError::Coercion {
                    symbol: node.symbol.clone(),
                    field: "fullTimeEmployees",
                    value: raw.to_string(),
                })?;
            Ok(EmployeeRecord {
                symbol: node.symbol,
                company_name: node.company_name,
                full_time_employees,
            })
        })
        .collect()
}
