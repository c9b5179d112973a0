pub mod classifier;
pub mod complexity;
pub mod cost;
pub mod criteria;
pub mod feasibility;
pub mod flags;
pub mod matcher;
pub mod risk;
pub mod strategic;
pub mod volume;

use crate::types::answers::AnswerRecord;
use crate::types::rules::{self, RuleTable, ScoringParameters};
use crate::types::scoring::{ScoreComponent, ScoreRecord};
use classifier::Classifier;
use matcher::{CompiledCategory, RuleDiagnostic};
use tracing::debug;

/// Lookup subjects. A rule written as `"<Subject>: <body>"` only answers
/// lookups for that subject.
pub mod subject {
    pub const FREQUENCY: &str = "Frequency";
    pub const MONTHLY_VOLUME: &str = "Monthly volume";
    pub const MONTHLY_VALUE: &str = "Monthly value";
    pub const FTE_HOURS: &str = "FTE hours";
    pub const PROCESSING_TIME: &str = "Processing time";
    pub const ERROR_RATE: &str = "Error rate";
    pub const COMPLIANCE: &str = "Compliance";
    pub const DELAY_IMPACT: &str = "Delay impact";
    pub const STANDARDIZATION: &str = "Standardization";
    pub const DOCUMENTATION: &str = "Documentation";
    pub const EXCEPTIONS: &str = "Exceptions";
    pub const API_ACCESS: &str = "API Access";
    pub const SYSTEM_ACCESS: &str = "System access";
    pub const DOCUMENT_PROCESSING: &str = "Document processing";
    pub const HUMAN_REVIEW: &str = "Human review";
    pub const COMMUNICATION: &str = "Communication";
    pub const BOTTLENECK: &str = "Bottleneck";
    pub const COMPLAINTS: &str = "Complaints";
    pub const GROWTH: &str = "Growth";
    pub const ROI: &str = "ROI";
}

/// Unrounded result of one dimension scorer.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionScore {
    pub points: f64,
    pub components: Vec<ScoreComponent>,
}

impl DimensionScore {
    pub fn summed(components: Vec<ScoreComponent>) -> Self {
        let points = components.iter().map(|c| c.points).sum::<i64>() as f64;
        Self { points, components }
    }
}

/// A rule table compiled for one scoring run. Holds no state across runs;
/// compile a fresh book whenever the table may have changed.
#[derive(Debug, Clone)]
pub struct RuleBook {
    pub volume_scale: CompiledCategory,
    pub cost_efficiency: CompiledCategory,
    pub risk_compliance: CompiledCategory,
    pub feasibility: CompiledCategory,
    pub task_complexity: CompiledCategory,
    pub strategic_impact: CompiledCategory,
    pub classifier: Classifier,
    pub parameters: ScoringParameters,
}

impl RuleBook {
    pub fn compile(table: &RuleTable) -> Self {
        let category = |title: &str| {
            table
                .category(title)
                .map(CompiledCategory::compile)
                .unwrap_or_else(|| CompiledCategory::missing(title))
        };

        Self {
            volume_scale: category(rules::VOLUME_SCALE),
            cost_efficiency: category(rules::COST_EFFICIENCY),
            risk_compliance: category(rules::RISK_COMPLIANCE),
            feasibility: category(rules::FEASIBILITY),
            task_complexity: category(rules::TASK_COMPLEXITY),
            strategic_impact: category(rules::STRATEGIC_IMPACT),
            classifier: Classifier::compile(
                table.category(rules::PROCESS_CATEGORIZATION),
                &table.parameters.default_category,
            ),
            parameters: table.parameters.clone(),
        }
    }

    pub fn diagnostics(&self) -> Vec<&RuleDiagnostic> {
        [
            &self.volume_scale,
            &self.cost_efficiency,
            &self.risk_compliance,
            &self.feasibility,
            &self.task_complexity,
            &self.strategic_impact,
        ]
        .into_iter()
        .flat_map(|category| category.diagnostics.iter())
        .chain(self.classifier.diagnostics.iter())
        .collect()
    }
}

/// Scores one answer record. Pure: the same record and book always give an
/// identical record.
pub fn score(answers: &AnswerRecord, book: &RuleBook) -> ScoreRecord {
    let volume = volume::score(answers, &book.volume_scale);
    let cost = cost::score(answers, &book.cost_efficiency);
    let risk = risk::score(answers, &book.risk_compliance);
    let feasibility = feasibility::score(answers, &book.feasibility, &book.parameters);
    let complexity = complexity::score(answers, &book.task_complexity, &book.parameters);
    let strategic = strategic::score(answers, &book.strategic_impact);
    let flags = flags::generate(answers);

    debug!(
        process = %answers.process_name,
        volume = volume.points,
        cost = cost.points,
        risk = risk.points,
        feasibility = feasibility.points,
        complexity = complexity.points,
        strategic = strategic.points,
        "dimension scores"
    );

    // composites add up the sub-scores the record shows
    let business_impact = externalize(
        volume.points.max(0.0)
            + cost.points.max(0.0)
            + risk.points.max(0.0)
            + strategic.points.max(0.0),
    );
    let feasibility_points = externalize(feasibility.points);
    let complexity_points = externalize(complexity.points);
    let total_feasibility = feasibility_points + complexity_points;
    let total_score = business_impact + total_feasibility;

    let classification = book
        .classifier
        .classify(f64::from(business_impact), f64::from(total_feasibility));

    let components = [
        &volume,
        &cost,
        &risk,
        &feasibility,
        &complexity,
        &strategic,
    ]
    .into_iter()
    .flat_map(|dimension| dimension.components.iter().cloned())
    .collect();

    ScoreRecord {
        volume_scale: externalize(volume.points),
        cost_efficiency: externalize(cost.points),
        risk_compliance: externalize(risk.points),
        feasibility: feasibility_points,
        task_complexity: complexity_points,
        strategic_impact: externalize(strategic.points),
        business_impact,
        total_feasibility,
        total_score,
        category: classification.category,
        color: classification.color,
        flags,
        components,
    }
}

/// Compiles `table` and scores against it in one call.
#[cfg(test)]
pub fn score_with_table(answers: &AnswerRecord, table: &RuleTable) -> ScoreRecord {
    score(answers, &RuleBook::compile(table))
}

fn externalize(points: f64) -> u32 {
    points.max(0.0).round() as u32
}
