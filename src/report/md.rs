use super::insights::Insights;
use crate::knowledge::LintReport;
use crate::types::assessment::Assessment;
use crate::types::scoring::{Dimension, ScoreRecord};

const DIMENSIONS: [Dimension; 6] = [
    Dimension::VolumeScale,
    Dimension::CostEfficiency,
    Dimension::RiskCompliance,
    Dimension::StrategicImpact,
    Dimension::Feasibility,
    Dimension::TaskComplexity,
];

pub fn to_markdown(assessment: &Assessment) -> String {
    let answers = &assessment.answers;
    let scores = &assessment.scores;
    let insights = Insights::of(assessment);
    let mut output = String::new();

    output.push_str(&format!("# Automation Fitness: {}\n\n", answers.process_name));
    output.push_str(&format!(
        "- organization: {}\n- industry: {}\n- assessment: {}\n- submitted: {}\n",
        answers.organization_name,
        answers.industry,
        assessment.id,
        assessment.submitted_at.format("%Y-%m-%d %H:%M UTC"),
    ));
    match &assessment.rules_version {
        Some(version) => output.push_str(&format!(
            "- rule table: {version} ({})\n\n",
            short_digest(&assessment.rules_digest)
        )),
        None => output.push_str(&format!(
            "- rule table: {}\n\n",
            short_digest(&assessment.rules_digest)
        )),
    }

    output.push_str(&format!(
        "**{}** ({})\n\n{}: {}\n\n",
        scores.category, scores.color, insights.priority, insights.summary
    ));
    output.push_str("## Scores\n\n");
    output.push_str("| Measure | Points |\n|---|---|\n");
    for dimension in DIMENSIONS {
        output.push_str(&format!(
            "| {} | {} |\n",
            dimension.label(),
            dimension_points(scores, dimension)
        ));
    }
    output.push_str(&format!(
        "| Business Impact | {} |\n| Total Feasibility | {} |\n| Total | {} |\n\n",
        scores.business_impact, scores.total_feasibility, scores.total_score
    ));

    output.push_str("## Breakdown\n\n");
    if scores.components.is_empty() {
        output.push_str("- none\n\n");
    } else {
        for component in &scores.components {
            let matched = component.matched.as_deref().unwrap_or("no matching rule");
            output.push_str(&format!(
                "- {} / {}: `{}` -> {} ({} pts)\n",
                component.dimension.label(),
                component.subject,
                component.observed,
                matched,
                component.points
            ));
        }
        output.push('\n');
    }

    output.push_str("## Strengths\n\n");
    if insights.strengths.is_empty() {
        output.push_str("- none\n\n");
    } else {
        for strength in &insights.strengths {
            output.push_str(&format!("- ✅ {strength}\n"));
        }
        output.push('\n');
    }

    output.push_str("## Flags\n\n");
    if scores.flags.is_empty() {
        output.push_str("- none\n");
    } else {
        for flag in &scores.flags {
            output.push_str(&format!("- {flag}\n"));
        }
    }

    if let Some(narrative) = &assessment.narrative {
        output.push_str("\n## Analysis\n\n");
        output.push_str(&format!(
            "{} (confidence {}%), timeline {}\n\n",
            narrative.recommendation, narrative.confidence, narrative.timeline_estimate
        ));
        output.push_str("Strengths:\n");
        for strength in &narrative.strengths {
            output.push_str(&format!("- {strength}\n"));
        }
        output.push_str("\nConcerns:\n");
        for concern in &narrative.concerns {
            output.push_str(&format!("- {concern}\n"));
        }
        output.push_str(&format!("\nNext steps: {}\n", narrative.next_steps));
    }

    output
}

pub fn list_markdown(assessments: &[Assessment]) -> String {
    if assessments.is_empty() {
        return "No assessments stored.\n".to_string();
    }

    let mut output = String::from("| Id | Submitted | Process | Category | Impact | Feasibility | Total |\n");
    output.push_str("|---|---|---|---|---|---|---|\n");
    for assessment in assessments {
        output.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} | {} |\n",
            assessment.id,
            assessment.submitted_at.format("%Y-%m-%d"),
            assessment.answers.process_name,
            assessment.scores.category,
            assessment.scores.business_impact,
            assessment.scores.total_feasibility,
            assessment.scores.total_score
        ));
    }
    output
}

pub fn lint_markdown(report: &LintReport) -> String {
    let mut output = String::from("# Rule Table Check\n\n");
    if let Some(version) = &report.version {
        output.push_str(&format!("Version: {version}\n\n"));
    }

    output.push_str("## Categories\n\n");
    for title in &report.categories_found {
        output.push_str(&format!("- [x] {title}\n"));
    }
    for title in &report.categories_missing {
        output.push_str(&format!("- [ ] {title} (missing)\n"));
    }

    output.push_str("\n## Findings\n\n");
    if report.findings.is_empty() {
        output.push_str("- none\n");
    } else {
        for finding in &report.findings {
            output.push_str(&format!(
                "- {}: `{}`: {}\n",
                finding.category, finding.criteria, finding.problem
            ));
        }
    }
    output
}

fn dimension_points(scores: &ScoreRecord, dimension: Dimension) -> u32 {
    match dimension {
        Dimension::VolumeScale => scores.volume_scale,
        Dimension::CostEfficiency => scores.cost_efficiency,
        Dimension::RiskCompliance => scores.risk_compliance,
        Dimension::Feasibility => scores.feasibility,
        Dimension::TaskComplexity => scores.task_complexity,
        Dimension::StrategicImpact => scores.strategic_impact,
    }
}

fn short_digest(digest: &str) -> &str {
    digest.get(..12).unwrap_or(digest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::{builtin_table, lint};
    use crate::store::sample_assessment;
    use crate::types::assessment::Narrative;

    #[test]
    fn markdown_report_contains_sections() {
        let rendered = to_markdown(&sample_assessment());
        assert!(rendered.contains("# Automation Fitness: Freight invoice matching"));
        assert!(rendered.contains("**QUICK WIN** (green)"));
        assert!(rendered.contains("Highest Priority: High impact, high feasibility."));
        assert!(rendered.contains("## Strengths\n\n- ✅ Excellent documentation (SOPs are current)"));
        assert!(rendered.contains("| Business Impact | 71 |"));
        assert!(rendered.contains("- rule table: 2024.2 ("));
        assert!(rendered.contains("Error rate: 5-10%"));
        assert!(rendered.contains("## Flags\n\n- none"));
        assert!(!rendered.contains("## Analysis"));
    }

    #[test]
    fn narrative_is_rendered_when_present() {
        let mut assessment = sample_assessment();
        assessment.narrative = Some(Narrative {
            recommendation: "Quick Win".to_string(),
            confidence: 80,
            strengths: vec!["Stable inputs".to_string()],
            concerns: vec![],
            timeline_estimate: "3-6 months".to_string(),
            next_steps: "Pilot with one carrier".to_string(),
        });

        let rendered = to_markdown(&assessment);
        assert!(rendered.contains("## Analysis"));
        assert!(rendered.contains("Quick Win (confidence 80%), timeline 3-6 months"));
        assert!(rendered.contains("- Stable inputs"));
    }

    #[test]
    fn empty_list_says_so() {
        assert_eq!(list_markdown(&[]), "No assessments stored.\n");
    }

    #[test]
    fn lint_markdown_marks_found_categories() {
        let rendered = lint_markdown(&lint(&builtin_table()));
        assert!(rendered.contains("Version: 2024.2"));
        assert!(rendered.contains("- [x] Process Categorization"));
        assert!(rendered.contains("## Findings\n\n- none"));
    }
}
