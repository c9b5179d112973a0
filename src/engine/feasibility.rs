use super::criteria::Observed;
use super::flags::documentation_gap;
use super::matcher::CompiledCategory;
use super::{subject, DimensionScore};
use crate::types::answers::{ApiAvailability, AnswerRecord, System};
use crate::types::rules::{PenaltyMode, ScoringParameters};
use crate::types::scoring::{Dimension, ScoreComponent};

/// Integration readiness of the system landscape, as one categorical value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiTier {
    AllApis,
    Mixed,
    Lacking,
}

impl ApiTier {
    /// An empty landscape has nothing to integrate with and gets the best
    /// tier. Any system without a confirmed API drops the landscape to
    /// `Lacking`.
    pub fn of(systems: &[System]) -> Self {
        if systems.iter().all(|s| s.has_api == ApiAvailability::Yes) {
            return Self::AllApis;
        }
        let lacking = systems
            .iter()
            .any(|s| matches!(s.has_api, ApiAvailability::No | ApiAvailability::Unknown));
        if lacking {
            Self::Lacking
        } else {
            Self::Mixed
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::AllApis => "All systems have APIs",
            Self::Mixed => "Mixed API availability",
            Self::Lacking => "Any system without an API or unknown",
        }
    }
}

/// Raw readiness (standardization, documentation, exceptions, API tier,
/// system access) rescaled onto `feasibility_ceiling`.
pub fn score(
    answers: &AnswerRecord,
    rules: &CompiledCategory,
    parameters: &ScoringParameters,
) -> DimensionScore {
    let lookup = |subject: &str, observed: Observed<'_>| {
        rules.lookup(Dimension::Feasibility, subject, observed)
    };

    let mut components = vec![
        lookup(
            subject::STANDARDIZATION,
            Observed::Number(answers.process_standardization.max(0.0)),
        ),
        lookup(
            subject::DOCUMENTATION,
            Observed::Label(&answers.documentation_status),
        ),
        lookup(
            subject::EXCEPTIONS,
            Observed::Number(answers.exception_handling),
        ),
        lookup(
            subject::API_ACCESS,
            Observed::Label(ApiTier::of(&answers.systems).label()),
        ),
        lookup(
            subject::SYSTEM_ACCESS,
            Observed::Label(&answers.system_access),
        ),
    ];

    let raw = components.iter().map(|c| c.points).sum::<i64>() as f64;
    let penalty = &parameters.documentation_penalty;
    let penalized = penalty.mode != PenaltyMode::None
        && penalty.points > 0.0
        && documentation_gap(&answers.documentation_status);

    let rescale = |raw: f64| {
        if parameters.feasibility_raw_max > 0.0 {
            raw / parameters.feasibility_raw_max * parameters.feasibility_ceiling
        } else {
            0.0
        }
    };

    let points = match (penalized, penalty.mode) {
        (true, PenaltyMode::Raw) => rescale(raw - penalty.points),
        (true, PenaltyMode::Flat) => rescale(raw) - penalty.points,
        _ => rescale(raw),
    };

    if penalized {
        components.push(ScoreComponent {
            dimension: Dimension::Feasibility,
            subject: "Documentation penalty".to_string(),
            observed: answers.documentation_status.clone(),
            matched: None,
            points: -(penalty.points.round() as i64),
        });
    }

    DimensionScore {
        points: points.max(0.0),
        components,
    }
}
