use serde::{Deserialize, Serialize};

pub const VOLUME_SCALE: &str = "Volume & Scale";
pub const COST_EFFICIENCY: &str = "Cost & Efficiency";
pub const RISK_COMPLIANCE: &str = "Risk & Compliance";
pub const FEASIBILITY: &str = "Feasibility";
pub const TASK_COMPLEXITY: &str = "Task Complexity";
pub const STRATEGIC_IMPACT: &str = "Strategic Impact";
pub const PROCESS_CATEGORIZATION: &str = "Process Categorization";

pub const CATEGORY_TITLES: [&str; 7] = [
    VOLUME_SCALE,
    COST_EFFICIENCY,
    RISK_COMPLIANCE,
    FEASIBILITY,
    TASK_COMPLEXITY,
    STRATEGIC_IMPACT,
    PROCESS_CATEGORIZATION,
];

/// The knowledge base: scoring categories plus the narrative prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleTable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub ai_analysis_prompt: String,
    #[serde(default)]
    pub parameters: ScoringParameters,
    pub scoring_categories: Vec<RuleCategory>,
}

impl RuleTable {
    /// First category whose title starts with `title`, so annotated titles
    /// such as "Feasibility (v2, 30 pts)" still resolve.
    pub fn category(&self, title: &str) -> Option<&RuleCategory> {
        self.scoring_categories
            .iter()
            .find(|category| category.title.starts_with(title))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleCategory {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matching: Option<MatchStrictness>,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl RuleCategory {
    /// Explicit strictness when the table sets one, otherwise the fixed
    /// choice for the category title.
    pub fn strictness(&self) -> MatchStrictness {
        self.matching
            .unwrap_or_else(|| MatchStrictness::default_for(&self.title))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub criteria: String,
    #[serde(rename = "score", alias = "weight")]
    pub weight: String,
}

/// How categorical criteria are compared with an answered label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrictness {
    /// Case-insensitive containment in either direction.
    Substring,
    /// Trimmed, case-insensitive equality.
    Exact,
}

impl MatchStrictness {
    pub fn default_for(title: &str) -> Self {
        if title.starts_with(PROCESS_CATEGORIZATION) {
            Self::Exact
        } else {
            Self::Substring
        }
    }
}

/// Per-revision knobs that differ between published rule tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoringParameters {
    pub feasibility_raw_max: f64,
    pub feasibility_ceiling: f64,
    pub complexity_native_max: f64,
    pub complexity_ceiling: f64,
    pub complexity_neutral: f64,
    pub documentation_penalty: DocumentationPenalty,
    pub default_category: String,
}

impl Default for ScoringParameters {
    fn default() -> Self {
        Self {
            feasibility_raw_max: 50.0,
            feasibility_ceiling: 30.0,
            complexity_native_max: 10.0,
            complexity_ceiling: 30.0,
            complexity_neutral: 5.0,
            documentation_penalty: DocumentationPenalty::default(),
            default_category: "REVISIT".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentationPenalty {
    pub mode: PenaltyMode,
    pub points: f64,
}

impl Default for DocumentationPenalty {
    fn default() -> Self {
        Self {
            mode: PenaltyMode::None,
            points: 3.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PenaltyMode {
    None,
    /// Subtracted once from the rescaled feasibility score.
    Flat,
    /// Subtracted from the raw component sum before rescaling.
    Raw,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_lookup_uses_title_prefix() {
        let table: RuleTable = serde_json::from_str(
            r#"{
                "scoringCategories": [
                    {"title": "Feasibility (revised, 30 pts)", "rules": [{"criteria": "> 5", "score": "2 pts"}]}
                ]
            }"#,
        )
        .expect("table should parse");

        let category = table.category(FEASIBILITY).expect("category should resolve");
        assert_eq!(category.rules[0].weight, "2 pts");
        assert!(table.category(STRATEGIC_IMPACT).is_none());
    }

    #[test]
    fn strictness_defaults_per_category_title() {
        let classifier = RuleCategory {
            title: "Process Categorization".to_string(),
            description: String::new(),
            matching: None,
            rules: vec![],
        };
        let risk = RuleCategory {
            title: "Risk & Compliance".to_string(),
            ..classifier.clone()
        };
        assert_eq!(classifier.strictness(), MatchStrictness::Exact);
        assert_eq!(risk.strictness(), MatchStrictness::Substring);

        let overridden = RuleCategory {
            matching: Some(MatchStrictness::Exact),
            ..risk
        };
        assert_eq!(overridden.strictness(), MatchStrictness::Exact);
    }

    #[test]
    fn parameters_fill_missing_fields_with_defaults() {
        let params: ScoringParameters =
            serde_json::from_str(r#"{"documentationPenalty": {"mode": "flat"}}"#)
                .expect("parameters should parse");
        assert_eq!(params.documentation_penalty.mode, PenaltyMode::Flat);
        assert_eq!(params.documentation_penalty.points, 3.0);
        assert_eq!(params.feasibility_ceiling, 30.0);
        assert_eq!(params.default_category, "REVISIT");
    }
}
