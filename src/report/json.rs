use super::insights::Insights;
use crate::types::assessment::Assessment;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// A stored assessment plus the highlights derived from it.
#[derive(Debug, Serialize)]
pub struct AssessmentView<'a> {
    #[serde(flatten)]
    pub assessment: &'a Assessment,
    pub insights: Insights,
}

impl<'a> AssessmentView<'a> {
    pub fn new(assessment: &'a Assessment) -> Self {
        Self {
            assessment,
            insights: Insights::of(assessment),
        }
    }
}

/// One line of `fitness list`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSummary<'a> {
    pub id: &'a str,
    pub submitted_at: DateTime<Utc>,
    pub process_name: &'a str,
    pub organization_name: &'a str,
    pub category: &'a str,
    pub business_impact: u32,
    pub total_feasibility: u32,
    pub total_score: u32,
    pub has_narrative: bool,
}

pub fn summaries(assessments: &[Assessment]) -> Vec<AssessmentSummary<'_>> {
    assessments
        .iter()
        .map(|assessment| AssessmentSummary {
            id: &assessment.id,
            submitted_at: assessment.submitted_at,
            process_name: &assessment.answers.process_name,
            organization_name: &assessment.answers.organization_name,
            category: &assessment.scores.category,
            business_impact: assessment.scores.business_impact,
            total_feasibility: assessment.scores.total_feasibility,
            total_score: assessment.scores.total_score,
            has_narrative: assessment.narrative.is_some(),
        })
        .collect()
}
