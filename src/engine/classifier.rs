use super::criteria::CompareOp;
use super::matcher::RuleDiagnostic;
use crate::types::rules::{MatchStrictness, RuleCategory};
use crate::types::scoring::ColorTag;
use regex::Regex;
use std::sync::OnceLock;
use tracing::warn;

const BUSINESS_IMPACT: &str = "businessimpact";
const TOTAL_FEASIBILITY: &str = "totalfeasibility";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threshold {
    pub op: CompareOp,
    pub operand: f64,
}

impl Threshold {
    fn holds(&self, value: f64) -> bool {
        self.op.holds(value, self.operand)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdRule {
    pub label: String,
    pub impact: Threshold,
    pub feasibility: Threshold,
}

/// Quadrant assignment from the "Process Categorization" table.
#[derive(Debug, Clone, PartialEq)]
pub struct Classifier {
    pub rules: Vec<ThresholdRule>,
    pub default_category: String,
    pub diagnostics: Vec<RuleDiagnostic>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: String,
    pub color: ColorTag,
}

impl Classifier {
    pub fn compile(category: Option<&RuleCategory>, default_category: &str) -> Self {
        let Some(category) = category else {
            warn!("rule table has no process categorization, every process gets the default");
            return Self {
                rules: Vec::new(),
                default_category: default_category.to_string(),
                diagnostics: vec![RuleDiagnostic {
                    category: crate::types::rules::PROCESS_CATEGORIZATION.to_string(),
                    criteria: String::new(),
                    problem: "category missing from rule table".to_string(),
                }],
            };
        };

        let strictness = category.strictness();
        let mut rules = Vec::new();
        let mut diagnostics = Vec::new();
        for rule in &category.rules {
            match parse_thresholds(&rule.criteria, strictness) {
                Ok((impact, feasibility)) => rules.push(ThresholdRule {
                    label: rule.weight.trim().to_string(),
                    impact,
                    feasibility,
                }),
                Err(problem) => {
                    warn!(
                        category = %category.title,
                        criteria = %rule.criteria,
                        "threshold rule will never match: {problem}"
                    );
                    diagnostics.push(RuleDiagnostic {
                        category: category.title.clone(),
                        criteria: rule.criteria.clone(),
                        problem,
                    });
                }
            }
        }

        Self {
            rules,
            default_category: default_category.to_string(),
            diagnostics,
        }
    }

    pub fn classify(&self, business_impact: f64, total_feasibility: f64) -> Classification {
        let category = self
            .rules
            .iter()
            .find(|rule| rule.impact.holds(business_impact) && rule.feasibility.holds(total_feasibility))
            .map(|rule| rule.label.clone())
            .unwrap_or_else(|| self.default_category.clone());
        let color = ColorTag::for_category(&category);
        Classification { category, color }
    }
}

/// Reads "Business Impact >= 60, Total Feasibility < 35". Whitespace and case
/// are ignored; clause order is free. Under exact matching the clause subject
/// must name the composite exactly, under substring matching "Impact" or
/// "Feasibility" is enough.
fn parse_thresholds(
    criteria: &str,
    strictness: MatchStrictness,
) -> Result<(Threshold, Threshold), String> {
    let compact: String = criteria
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    let mut impact = None;
    let mut feasibility = None;
    for clause in compact.split([',', ';', '&']).filter(|clause| !clause.is_empty()) {
        let caps = clause_pattern()
            .captures(clause)
            .ok_or_else(|| format!("unreadable clause '{clause}'"))?;
        let subject = &caps[1];
        let op = CompareOp::parse(&caps[2]).ok_or_else(|| format!("unknown operator in '{clause}'"))?;
        let operand = caps[3]
            .parse::<f64>()
            .map_err(|_| format!("operand is not a number in '{clause}'"))?;
        let threshold = Threshold { op, operand };

        if names(subject, BUSINESS_IMPACT, "impact", strictness) {
            impact = Some(threshold);
        } else if names(subject, TOTAL_FEASIBILITY, "feasibility", strictness) {
            feasibility = Some(threshold);
        } else {
            return Err(format!("unknown threshold subject '{subject}'"));
        }
    }

    match (impact, feasibility) {
        (Some(impact), Some(feasibility)) => Ok((impact, feasibility)),
        (None, _) => Err("missing Business Impact clause".to_string()),
        (_, None) => Err("missing Total Feasibility clause".to_string()),
    }
}

fn names(subject: &str, exact: &str, keyword: &str, strictness: MatchStrictness) -> bool {
    match strictness {
        MatchStrictness::Exact => subject == exact,
        MatchStrictness::Substring => subject.contains(keyword),
    }
}

fn clause_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([a-z]+)(<=|>=|<|>)(\d+(?:\.\d+)?)$").expect("clause pattern is valid")
    })
}
