use super::criteria::Observed;
use super::matcher::CompiledCategory;
use super::{subject, DimensionScore};
use crate::types::answers::AnswerRecord;
use crate::types::scoring::Dimension;

/// Frequency label plus monthly volume. Tables without `Monthly volume`
/// rules score on frequency alone.
pub fn score(answers: &AnswerRecord, rules: &CompiledCategory) -> DimensionScore {
    DimensionScore::summed(vec![
        rules.lookup(
            Dimension::VolumeScale,
            subject::FREQUENCY,
            Observed::Label(&answers.process_frequency),
        ),
        rules.lookup(
            Dimension::VolumeScale,
            subject::MONTHLY_VOLUME,
            Observed::Number(answers.monthly_volume),
        ),
    ])
}
