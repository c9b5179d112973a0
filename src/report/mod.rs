pub mod insights;
pub mod json;
pub mod md;

use crate::error::{FitnessError, Result};
use crate::knowledge::LintReport;
use crate::types::assessment::Assessment;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Md,
}

impl OutputFormat {
    /// Parses the `[output] format` value.
    pub fn parse(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "md" => Ok(Self::Md),
            other => Err(FitnessError::ConfigParse(format!(
                "unsupported output.format: {other}"
            ))),
        }
    }
}

pub fn render(assessment: &Assessment, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            json::to_json(&json::AssessmentView::new(assessment)).map_err(FitnessError::Json)
        }
        OutputFormat::Md => Ok(md::to_markdown(assessment)),
    }
}

pub fn render_list(assessments: &[Assessment], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            json::to_json(&json::summaries(assessments)).map_err(FitnessError::Json)
        }
        OutputFormat::Md => Ok(md::list_markdown(assessments)),
    }
}

pub fn render_lint(report: &LintReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(FitnessError::Json),
        OutputFormat::Md => Ok(md::lint_markdown(report)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_configured_format_names() {
        assert_eq!(OutputFormat::parse("JSON").expect("json"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("md").expect("md"), OutputFormat::Md);
        assert!(OutputFormat::parse("sarif").is_err());
    }
}
