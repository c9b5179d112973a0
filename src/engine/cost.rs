use super::criteria::Observed;
use super::matcher::CompiledCategory;
use super::{subject, DimensionScore};
use crate::types::answers::AnswerRecord;
use crate::types::scoring::Dimension;

/// Monthly value, FTE hours and processing time, each looked up in the same
/// category and summed.
pub fn score(answers: &AnswerRecord, rules: &CompiledCategory) -> DimensionScore {
    DimensionScore::summed(vec![
        rules.lookup(
            Dimension::CostEfficiency,
            subject::MONTHLY_VALUE,
            Observed::Number(answers.monthly_value()),
        ),
        rules.lookup(
            Dimension::CostEfficiency,
            subject::FTE_HOURS,
            Observed::Number(answers.fte_hours()),
        ),
        rules.lookup(
            Dimension::CostEfficiency,
            subject::PROCESSING_TIME,
            Observed::Label(&answers.average_processing_time),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{fixtures, RuleBook};
    use crate::knowledge::builtin_table;

    #[test]
    fn sums_value_hours_and_processing_time() {
        let book = RuleBook::compile(&builtin_table());
        let mut answers = fixtures::quick_win();
        answers.monthly_volume = 200.0;
        answers.cost_per_transaction = 20.0;
        answers.team_size = 1.0;
        answers.time_percentage = 25.0;
        answers.average_processing_time = "1-2 days".to_string();

        let score = score(&answers, &book.cost_efficiency);
        let observed: Vec<_> = score
            .components
            .iter()
            .map(|c| (c.observed.as_str(), c.points))
            .collect();
        // $4,000 -> 4, 40 hours -> 4, 1-2 days -> 4
        assert_eq!(observed, vec![("4000", 4), ("40", 4), ("1-2 days", 4)]);
        assert_eq!(score.points, 12.0);
    }

    #[test]
    fn unscoped_numeric_rules_answer_every_numeric_lookup() {
        use crate::types::rules::{Rule, RuleCategory};

        let rules = CompiledCategory::compile(&RuleCategory {
            title: "Cost & Efficiency".to_string(),
            description: String::new(),
            matching: None,
            rules: vec![Rule {
                criteria: "> 100".to_string(),
                weight: "3 pts".to_string(),
            }],
        });
        // 50,000 monthly value and 320 FTE hours both exceed 100
        assert_eq!(score(&fixtures::quick_win(), &rules).points, 6.0);
    }
}
