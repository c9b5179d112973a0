//! Criteria grammar for rule tables.
//!
//! A criteria string is `[Subject ":"] body`. The body is one of
//! - a range `N-M` (inclusive),
//! - a comparison `<op> N` with op in `<`, `<=`, `>`, `>=`,
//! - anything else, read as a categorical label.
//!
//! Numeric bodies may carry currency symbols, thousands separators and one
//! trailing unit (`%`, `hours`, `hrs`, `h`, `transactions`, `/month`). The
//! numeric forms must cover the whole body, so labels like `1-2 days` stay
//! categorical.

use crate::types::rules::MatchStrictness;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

const UNIT_SUFFIXES: [&str; 7] = [
    "hours/month",
    "/month",
    "transactions",
    "hours",
    "hrs",
    "h",
    "%",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "<" => Some(Self::Lt),
            "<=" => Some(Self::Le),
            ">" => Some(Self::Gt),
            ">=" => Some(Self::Ge),
            _ => None,
        }
    }

    pub fn holds(self, value: f64, operand: f64) -> bool {
        match self {
            Self::Lt => value < operand,
            Self::Le => value <= operand,
            Self::Gt => value > operand,
            Self::Ge => value >= operand,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Range { min: f64, max: f64 },
    Compare { op: CompareOp, operand: f64 },
    /// Lowercased, trimmed label text.
    Label(String),
    /// Criteria that could not be classified; never matches.
    Never { reason: String },
}

/// A value taken from an answer record, ready to test against a predicate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Observed<'a> {
    Number(f64),
    Label(&'a str),
}

impl fmt::Display for Observed<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) if value.fract() == 0.0 => write!(f, "{value:.0}"),
            Self::Number(value) => write!(f, "{value:.2}"),
            Self::Label(label) => f.write_str(label),
        }
    }
}

impl Predicate {
    /// Numeric predicates only see numbers, labels only see strings; any
    /// other pairing is a plain miss.
    pub fn matches(&self, observed: Observed<'_>, strictness: MatchStrictness) -> bool {
        match (self, observed) {
            (Self::Range { min, max }, Observed::Number(value)) => *min <= value && value <= *max,
            (Self::Compare { op, operand }, Observed::Number(value)) => op.holds(value, *operand),
            (Self::Label(label), Observed::Label(text)) => label_matches(label, text, strictness),
            _ => false,
        }
    }
}

fn label_matches(label: &str, observed: &str, strictness: MatchStrictness) -> bool {
    let observed = observed.trim().to_lowercase();
    if label.is_empty() || observed.is_empty() {
        return false;
    }
    match strictness {
        MatchStrictness::Exact => label == observed,
        MatchStrictness::Substring => label.contains(&observed) || observed.contains(label),
    }
}

/// Parsed form of one criteria string.
#[derive(Debug, Clone, PartialEq)]
pub struct Criteria {
    pub subject: Option<String>,
    pub predicate: Predicate,
}

impl Criteria {
    /// Rules without a subject apply to every lookup in their category.
    pub fn applies_to(&self, subject: &str) -> bool {
        match &self.subject {
            Some(own) => own.eq_ignore_ascii_case(subject.trim()),
            None => true,
        }
    }
}

pub fn parse(criteria: &str) -> Criteria {
    let (subject, body) = match criteria.split_once(':') {
        Some((subject, body)) if !subject.trim().is_empty() => {
            (Some(subject.trim().to_string()), body.trim())
        }
        _ => (None, criteria.trim()),
    };

    Criteria {
        subject,
        predicate: parse_body(body),
    }
}

fn parse_body(body: &str) -> Predicate {
    let numeric = normalize_numeric(body);
    if numeric.is_empty() {
        return Predicate::Never {
            reason: "empty criteria".to_string(),
        };
    }

    if let Some(caps) = range_pattern().captures(&numeric) {
        let (min, max) = (number(&caps[1]), number(&caps[2]));
        return match (min, max) {
            (Some(min), Some(max)) if min <= max => Predicate::Range { min, max },
            (Some(min), Some(max)) => Predicate::Never {
                reason: format!("range minimum {min} exceeds maximum {max}"),
            },
            _ => Predicate::Never {
                reason: "range bounds are not numbers".to_string(),
            },
        };
    }

    if let Some(caps) = comparison_pattern().captures(&numeric) {
        if let (Some(op), Some(operand)) = (CompareOp::parse(&caps[1]), number(&caps[2])) {
            return Predicate::Compare { op, operand };
        }
    }

    if numeric_debris_pattern().is_match(&numeric) {
        return Predicate::Never {
            reason: format!("unrecognized numeric expression '{body}'"),
        };
    }

    Predicate::Label(body.to_lowercase())
}

fn normalize_numeric(body: &str) -> String {
    let stripped: String = body
        .chars()
        .filter(|c| !matches!(c, '$' | '€' | '£' | ','))
        .collect();
    let lowered = stripped.trim().to_lowercase();
    UNIT_SUFFIXES
        .iter()
        .find_map(|unit| lowered.strip_suffix(unit))
        .map(|rest| rest.trim().to_string())
        .unwrap_or(lowered)
}

fn number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok()
}

fn range_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d+(?:\.\d+)?)\s*-\s*(\d+(?:\.\d+)?)$").expect("range pattern is valid")
    })
}

fn comparison_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(<=|>=|<|>)\s*(\d+(?:\.\d+)?)$").expect("comparison pattern is valid")
    })
}

// Bodies made only of digits and operator characters that matched neither
// numeric form, e.g. "<=", "500-", "=> 3" or a bare "12".
fn numeric_debris_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[\d.\s<>=+-]+$").expect("debris pattern is valid"))
}
