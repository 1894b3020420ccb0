use serde::Deserialize;
use serde_json::Value;

/* --------- Minimal serde mapping of one /api/v3/profile/{symbol} entry --------- */

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProfileNode {
    pub(crate) symbol: String,
    #[serde(default)]
    pub(crate) company_name: Option<String>,
    // String-encoded upstream ("164000"), kept raw for explicit coercion.
    #[serde(default)]
    pub(crate) full_time_employees: Option<Value>,
}
