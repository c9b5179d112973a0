use serde::{Deserialize, Serialize};
use std::fmt;

/// Display hint derived from the winning category label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTag {
    Green,
    Blue,
    Orange,
    Red,
}

impl ColorTag {
    pub fn for_category(label: &str) -> Self {
        if label.contains("QUICK WIN") {
            Self::Green
        } else if label.contains("STRATEGIC") {
            Self::Blue
        } else if label.contains("INCREMENTAL") {
            Self::Orange
        } else {
            Self::Red
        }
    }
}

impl fmt::Display for ColorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Orange => "orange",
            Self::Red => "red",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    VolumeScale,
    CostEfficiency,
    RiskCompliance,
    Feasibility,
    TaskComplexity,
    StrategicImpact,
}

impl Dimension {
    pub fn label(&self) -> &'static str {
        match self {
            Self::VolumeScale => "Volume & Scale",
            Self::CostEfficiency => "Cost & Efficiency",
            Self::RiskCompliance => "Risk & Compliance",
            Self::Feasibility => "Feasibility",
            Self::TaskComplexity => "Task Complexity",
            Self::StrategicImpact => "Strategic Impact",
        }
    }
}

/// One rule lookup, kept so a score can be traced back to the table row
/// that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreComponent {
    pub dimension: Dimension,
    pub subject: String,
    pub observed: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched: Option<String>,
    pub points: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagLevel {
    Info,
    Warning,
    Blocker,
}

impl FlagLevel {
    fn marker(&self) -> &'static str {
        match self {
            Self::Info => "❓",
            Self::Warning => "⚠️",
            Self::Blocker => "❌",
        }
    }
}

/// Advisory annotation; serialized as its rendered string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct Flag {
    pub level: FlagLevel,
    pub message: String,
}

impl Flag {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: FlagLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: FlagLevel::Warning,
            message: message.into(),
        }
    }

    pub fn blocker(message: impl Into<String>) -> Self {
        Self {
            level: FlagLevel::Blocker,
            message: message.into(),
        }
    }

    pub fn is_blocker(&self) -> bool {
        self.level == FlagLevel::Blocker
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.level.marker(), self.message)
    }
}

impl From<Flag> for String {
    fn from(flag: Flag) -> Self {
        flag.to_string()
    }
}

impl From<String> for Flag {
    fn from(rendered: String) -> Self {
        for level in [FlagLevel::Blocker, FlagLevel::Warning, FlagLevel::Info] {
            if let Some(rest) = rendered.strip_prefix(level.marker()) {
                return Self {
                    level,
                    message: rest.trim_start().to_string(),
                };
            }
        }
        Self::info(rendered)
    }
}

/// Externalized result of one scoring run. All points are whole numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    pub volume_scale: u32,
    pub cost_efficiency: u32,
    pub risk_compliance: u32,
    pub feasibility: u32,
    pub task_complexity: u32,
    pub strategic_impact: u32,
    pub business_impact: u32,
    pub total_feasibility: u32,
    pub total_score: u32,
    pub category: String,
    pub color: ColorTag,
    pub flags: Vec<Flag>,
    #[serde(default)]
    pub components: Vec<ScoreComponent>,
}

impl ScoreRecord {
    pub fn has_blockers(&self) -> bool {
        self.flags.iter().any(Flag::is_blocker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_follows_category_label() {
        assert_eq!(ColorTag::for_category("QUICK WIN ⭐"), ColorTag::Green);
        assert_eq!(ColorTag::for_category("STRATEGIC LONG-TERM"), ColorTag::Blue);
        assert_eq!(ColorTag::for_category("INCREMENTAL GAINS"), ColorTag::Orange);
        assert_eq!(ColorTag::for_category("REVISIT"), ColorTag::Red);
        assert_eq!(ColorTag::for_category("AVOID"), ColorTag::Red);
    }

    #[test]
    fn flag_serializes_as_rendered_string_and_reads_back() {
        let flag = Flag::blocker("Integration blocker: Mainframe is not cloud-based and has no API");
        let json = serde_json::to_string(&flag).expect("flag should serialize");
        assert_eq!(
            json,
            "\"❌ Integration blocker: Mainframe is not cloud-based and has no API\""
        );

        let back: Flag = serde_json::from_str(&json).expect("flag should deserialize");
        assert_eq!(back, flag);
    }

    #[test]
    fn unrecognized_flag_text_reads_as_info() {
        let flag = Flag::from("legacy note".to_string());
        assert_eq!(flag.level, FlagLevel::Info);
        assert_eq!(flag.message, "legacy note");
    }
}
