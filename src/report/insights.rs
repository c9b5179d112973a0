//! Highlights derived from an assessment: the priority of its category and
//! the strengths worth calling out next to the flags.

use crate::intake::options::FULL_DOCUMENTATION;
use crate::types::answers::{AnswerRecord, ApiAvailability};
use crate::types::assessment::Assessment;
use serde::Serialize;

pub const HIGH_STANDARDIZATION: f64 = 90.0;
pub const LOW_EXCEPTION_RATE: f64 = 5.0;
pub const SMALL_TEAM: f64 = 3.0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    pub priority: &'static str,
    pub summary: &'static str,
    pub strengths: Vec<&'static str>,
}

impl Insights {
    pub fn of(assessment: &Assessment) -> Self {
        let (priority, summary) = priority(&assessment.scores.category);
        Self {
            priority,
            summary,
            strengths: strengths(&assessment.answers),
        }
    }
}

/// Priority and one-line reading of a quadrant label. Labels are matched by
/// their leading words, so decorated labels like `QUICK WIN ⭐` resolve too.
pub fn priority(category: &str) -> (&'static str, &'static str) {
    let category = category.to_ascii_uppercase();
    if category.contains("QUICK WIN") {
        (
            "Highest Priority",
            "High impact, high feasibility. These are prime candidates for automation.",
        )
    } else if category.contains("STRATEGIC") {
        (
            "High Priority",
            "High impact, but lower feasibility. Requires strategic planning and investment.",
        )
    } else if category.contains("INCREMENTAL") {
        (
            "Medium Priority",
            "Lower impact, but high feasibility. Good for quick, smaller improvements.",
        )
    } else if category.contains("REVISIT") || category.contains("AVOID") {
        (
            "Low Priority",
            "Low impact and low feasibility. Best to avoid or revisit after other priorities.",
        )
    } else {
        ("N/A", "Category not determined")
    }
}

pub fn strengths(answers: &AnswerRecord) -> Vec<&'static str> {
    let mut strengths = Vec::new();
    if answers
        .documentation_status
        .trim()
        .eq_ignore_ascii_case(FULL_DOCUMENTATION)
    {
        strengths.push("Excellent documentation (SOPs are current)");
    }
    if answers.process_standardization > HIGH_STANDARDIZATION {
        strengths.push("Highly standardized process");
    }
    if answers.exception_handling < LOW_EXCEPTION_RATE {
        strengths.push("Very low exception rate");
    }
    if answers
        .systems
        .iter()
        .all(|system| system.has_api == ApiAvailability::Yes)
    {
        strengths.push("All systems have APIs");
    }
    if answers.team_size < SMALL_TEAM {
        strengths.push("Small team, easier to coordinate");
    }
    strengths
}
