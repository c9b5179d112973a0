use crate::types::answers::AnswerRecord;
use crate::types::scoring::ScoreRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Free-text analysis returned by the narrative collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Narrative {
    pub recommendation: String,
    pub confidence: u8,
    #[serde(alias = "topStrengths")]
    pub strengths: Vec<String>,
    #[serde(alias = "topConcerns")]
    pub concerns: Vec<String>,
    pub timeline_estimate: String,
    pub next_steps: String,
}

/// A scored submission as persisted by an assessment store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub id: String,
    pub submitted_at: DateTime<Utc>,
    pub rules_digest: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules_version: Option<String>,
    pub answers: AnswerRecord,
    pub scores: ScoreRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narrative: Option<Narrative>,
}

impl Assessment {
    pub fn new(
        answers: AnswerRecord,
        scores: ScoreRecord,
        rules_digest: String,
        rules_version: Option<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            submitted_at: Utc::now(),
            rules_digest,
            rules_version,
            answers,
            scores,
            narrative: None,
        }
    }
}
