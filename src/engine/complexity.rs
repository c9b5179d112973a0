use super::criteria::Observed;
use super::matcher::CompiledCategory;
use super::{subject, DimensionScore};
use crate::intake::options::{NO_COMMUNICATION, NO_DOCUMENTS};
use crate::types::answers::AnswerRecord;
use crate::types::rules::ScoringParameters;
use crate::types::scoring::Dimension;

/// Count tier for the communication channels a process uses, or `None`
/// when it uses none.
pub fn communication_tier(channels: &[String]) -> Option<&'static str> {
    let used = channels
        .iter()
        .filter(|channel| {
            let channel = channel.trim();
            !channel.is_empty() && !channel.eq_ignore_ascii_case(NO_COMMUNICATION)
        })
        .count();
    match used {
        0 => None,
        1 => Some("1 Type"),
        2 => Some("2 Types"),
        _ => Some("3+ Types"),
    }
}

/// Averages the applicable components on their native scale, then rescales
/// onto `complexity_ceiling`. With nothing applicable the average is
/// `complexity_neutral`.
pub fn score(
    answers: &AnswerRecord,
    rules: &CompiledCategory,
    parameters: &ScoringParameters,
) -> DimensionScore {
    let document_processing = answers
        .document_processing
        .as_deref()
        .map(str::trim)
        .filter(|label| !label.is_empty() && !label.eq_ignore_ascii_case(NO_DOCUMENTS));
    let human_review = Some(answers.human_in_loop.trim()).filter(|label| !label.is_empty());
    let communication = communication_tier(answers.communication());

    let components: Vec<_> = [
        (subject::DOCUMENT_PROCESSING, document_processing),
        (subject::HUMAN_REVIEW, human_review),
        (subject::COMMUNICATION, communication),
    ]
    .into_iter()
    .filter_map(|(subject, label)| {
        label.map(|label| rules.lookup(Dimension::TaskComplexity, subject, Observed::Label(label)))
    })
    .collect();

    let average = if components.is_empty() {
        parameters.complexity_neutral
    } else {
        components.iter().map(|c| c.points).sum::<i64>() as f64 / components.len() as f64
    };

    let points = if parameters.complexity_native_max > 0.0 {
        average / parameters.complexity_native_max * parameters.complexity_ceiling
    } else {
        0.0
    };

    DimensionScore {
        points: points.max(0.0),
        components,
    }
}
