use super::criteria::{self, Criteria, Observed};
use crate::types::rules::{MatchStrictness, RuleCategory};
use crate::types::scoring::{Dimension, ScoreComponent};
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub struct CompiledRule {
    pub text: String,
    pub criteria: Criteria,
    pub points: i64,
}

/// A rule category with every criteria string parsed up front.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledCategory {
    pub title: String,
    pub strictness: MatchStrictness,
    pub rules: Vec<CompiledRule>,
    pub diagnostics: Vec<RuleDiagnostic>,
}

/// Problem found while compiling a rule; the rule still loads but may never
/// fire or may score zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDiagnostic {
    pub category: String,
    pub criteria: String,
    pub problem: String,
}

impl CompiledCategory {
    pub fn compile(category: &RuleCategory) -> Self {
        let mut diagnostics = Vec::new();
        let rules = category
            .rules
            .iter()
            .map(|rule| {
                let parsed = criteria::parse(&rule.criteria);
                if let criteria::Predicate::Never { reason } = &parsed.predicate {
                    warn!(
                        category = %category.title,
                        criteria = %rule.criteria,
                        "criteria will never match: {reason}"
                    );
                    diagnostics.push(RuleDiagnostic {
                        category: category.title.clone(),
                        criteria: rule.criteria.clone(),
                        problem: reason.clone(),
                    });
                }

                let points = parse_weight(&rule.weight).unwrap_or_else(|| {
                    warn!(
                        category = %category.title,
                        criteria = %rule.criteria,
                        weight = %rule.weight,
                        "weight has no leading integer, scoring 0"
                    );
                    diagnostics.push(RuleDiagnostic {
                        category: category.title.clone(),
                        criteria: rule.criteria.clone(),
                        problem: format!("unparseable weight '{}'", rule.weight),
                    });
                    0
                });

                CompiledRule {
                    text: rule.criteria.clone(),
                    criteria: parsed,
                    points,
                }
            })
            .collect();

        Self {
            title: category.title.clone(),
            strictness: category.strictness(),
            rules,
            diagnostics,
        }
    }

    /// Stand-in for a category the table does not define: every lookup
    /// scores zero.
    pub fn missing(title: &str) -> Self {
        warn!(category = %title, "rule table has no such category, lookups score 0");
        Self {
            title: title.to_string(),
            strictness: MatchStrictness::default_for(title),
            rules: Vec::new(),
            diagnostics: vec![RuleDiagnostic {
                category: title.to_string(),
                criteria: String::new(),
                problem: "category missing from rule table".to_string(),
            }],
        }
    }

    /// First rule in table order whose subject and predicate both accept
    /// the observation.
    pub fn find_match(&self, subject: &str, observed: Observed<'_>) -> Option<&CompiledRule> {
        self.rules.iter().find(|rule| {
            rule.criteria.applies_to(subject)
                && rule.criteria.predicate.matches(observed, self.strictness)
        })
    }

    pub fn match_weight(&self, subject: &str, observed: Observed<'_>) -> i64 {
        self.find_match(subject, observed)
            .map(|rule| rule.points)
            .unwrap_or(0)
    }

    /// Lookup that also records the explainability trail entry.
    pub fn lookup(
        &self,
        dimension: Dimension,
        subject: &str,
        observed: Observed<'_>,
    ) -> ScoreComponent {
        ScoreComponent {
            dimension,
            subject: subject.to_string(),
            observed: observed.to_string(),
            matched: self
                .find_match(subject, observed)
                .map(|rule| rule.text.clone()),
            points: self.match_weight(subject, observed),
        }
    }
}

/// Leading integer token of a weight string: "8 pts" is 8, "-3" is -3,
/// "12pts" is 12. `None` when the first token does not start with digits.
pub fn parse_weight(weight: &str) -> Option<i64> {
    let token = weight.split_whitespace().next()?;
    let (sign, digits) = match token.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, token.strip_prefix('+').unwrap_or(token)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|value| sign * value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::rules::Rule;

    fn category(rules: &[(&str, &str)]) -> CompiledCategory {
        CompiledCategory::compile(&RuleCategory {
            title: "Risk & Compliance".to_string(),
            description: String::new(),
            matching: None,
            rules: rules
                .iter()
                .map(|(criteria, weight)| Rule {
                    criteria: criteria.to_string(),
                    weight: weight.to_string(),
                })
                .collect(),
        })
    }

    #[test]
    fn parse_weight_reads_leading_integer() {
        assert_eq!(parse_weight("8 pts"), Some(8));
        assert_eq!(parse_weight("12pts"), Some(12));
        assert_eq!(parse_weight("-3 penalty"), Some(-3));
        assert_eq!(parse_weight("+5"), Some(5));
        assert_eq!(parse_weight("pts 8"), None);
        assert_eq!(parse_weight(""), None);
    }

    #[test]
    fn single_matching_bucket_returns_its_weight() {
        let rules = category(&[("0-5", "2 pts"), ("6-10", "5 pts"), ("> 10", "9 pts")]);
        assert_eq!(rules.match_weight("Error rate", Observed::Number(7.0)), 5);
        assert_eq!(rules.match_weight("Error rate", Observed::Number(11.0)), 9);
    }

    #[test]
    fn no_matching_bucket_returns_zero() {
        let rules = category(&[("0-5", "2 pts"), ("6-10", "5 pts")]);
        assert_eq!(rules.match_weight("Error rate", Observed::Number(5.5)), 0);
        assert_eq!(rules.match_weight("Error rate", Observed::Label("Daily")), 0);
    }

    #[test]
    fn first_match_wins_over_later_overlapping_rules() {
        let rules = category(&[(">= 10", "7 pts"), (">= 0", "1 pt"), ("5-15", "9 pts")]);
        assert_eq!(rules.match_weight("Error rate", Observed::Number(12.0)), 7);
        assert_eq!(rules.match_weight("Error rate", Observed::Number(6.0)), 1);
    }

    #[test]
    fn subject_scoped_rules_only_answer_their_subject() {
        let rules = category(&[
            ("Error rate: > 10", "8 pts"),
            ("Delay impact: Minimal impact, no direct costs", "1 pt"),
            ("> 0", "2 pts"),
        ]);
        assert_eq!(rules.match_weight("Error rate", Observed::Number(12.0)), 8);
        assert_eq!(rules.match_weight("Exceptions", Observed::Number(12.0)), 2);
        assert_eq!(
            rules.match_weight("Delay impact", Observed::Label("Minimal impact, no direct costs")),
            1
        );
        assert_eq!(
            rules.match_weight("Compliance", Observed::Label("Minimal impact, no direct costs")),
            0
        );
    }

    #[test]
    fn malformed_and_unweighted_rules_are_diagnosed_not_fatal() {
        let rules = category(&[("<=", "5 pts"), ("> 3", "lots"), ("> 1", "2 pts")]);
        assert_eq!(rules.diagnostics.len(), 2);
        assert_eq!(rules.match_weight("Error rate", Observed::Number(4.0)), 0);
        assert_eq!(rules.match_weight("Error rate", Observed::Number(2.0)), 2);
    }

    #[test]
    fn lookup_records_matched_criteria() {
        let rules = category(&[("Error rate: 10-20%", "7 pts")]);
        let component = rules.lookup(
            Dimension::RiskCompliance,
            "Error rate",
            Observed::Number(20.0),
        );
        assert_eq!(component.points, 7);
        assert_eq!(component.observed, "20");
        assert_eq!(component.matched.as_deref(), Some("Error rate: 10-20%"));
    }
}
