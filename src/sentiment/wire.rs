use serde::Deserialize;

use super::Mention;

/* --------- Minimal serde mapping of /api/v1/stock/social-sentiment --------- */

#[derive(Deserialize)]
pub(crate) struct SentimentEnvelope {
    #[allow(dead_code)]
    #[serde(default)]
    pub(crate) symbol: Option<String>,
    #[serde(default)]
    pub(crate) reddit: Option<Vec<MentionNode>>,
    #[serde(default)]
    pub(crate) twitter: Option<Vec<MentionNode>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MentionNode {
    pub(crate) positive_mention: u64,
    pub(crate) negative_mention: u64,
    pub(crate) score: f64,
}

impl From<&MentionNode> for Mention {
    fn from(n: &MentionNode) -> Self {
        Self {
            positive_mention: n.positive_mention,
            negative_mention: n.negative_mention,
            score: n.score,
        }
    }
}
