use super::criteria::Observed;
use super::matcher::CompiledCategory;
use super::{subject, DimensionScore};
use crate::types::answers::AnswerRecord;
use crate::types::scoring::Dimension;

pub fn score(answers: &AnswerRecord, rules: &CompiledCategory) -> DimensionScore {
    let answered = [
        (subject::BOTTLENECK, &answers.process_bottleneck),
        (subject::COMPLAINTS, &answers.stakeholder_complaints),
        (subject::GROWTH, &answers.growth_limitation),
        (subject::ROI, &answers.expected_roi),
    ];

    DimensionScore::summed(
        answered
            .into_iter()
            .map(|(subject, label)| {
                rules.lookup(Dimension::StrategicImpact, subject, Observed::Label(label))
            })
            .collect(),
    )
}
