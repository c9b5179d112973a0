use super::criteria::Observed;
use super::matcher::CompiledCategory;
use super::{subject, DimensionScore};
use crate::intake::options::{compliance_severity, MINIMAL_DELAY_IMPACT, NO_COMPLIANCE};
use crate::types::answers::AnswerRecord;
use crate::types::scoring::Dimension;

pub fn score(answers: &AnswerRecord, rules: &CompiledCategory) -> DimensionScore {
    let delay_impact = answers
        .impact_of_delays
        .as_deref()
        .filter(|label| !label.trim().is_empty())
        .unwrap_or(MINIMAL_DELAY_IMPACT);

    DimensionScore::summed(vec![
        rules.lookup(
            Dimension::RiskCompliance,
            subject::ERROR_RATE,
            Observed::Number(answers.error_rate),
        ),
        rules.lookup(
            Dimension::RiskCompliance,
            subject::COMPLIANCE,
            Observed::Label(most_severe_compliance(&answers.compliance_requirements)),
        ),
        rules.lookup(
            Dimension::RiskCompliance,
            subject::DELAY_IMPACT,
            Observed::Label(delay_impact),
        ),
    ])
}

/// Reduces the selected requirements to the most restrictive one. Ties and
/// unranked labels keep selection order; nothing selected reads as "None".
pub fn most_severe_compliance(selected: &[String]) -> &str {
    selected
        .iter()
        .enumerate()
        .max_by_key(|(index, label)| (compliance_severity(label), std::cmp::Reverse(*index)))
        .map(|(_, label)| label.as_str())
        .unwrap_or(NO_COMPLIANCE)
}
