//! Questionnaire validation, run before a submission reaches the scoring
//! engine. Every problem is collected so the caller can report them at once.

pub mod options;

use crate::error::{FitnessError, Result};
use crate::types::answers::AnswerRecord;
use options::*;

pub const DESCRIPTION_LIMIT: usize = 2000;
pub const PAIN_POINT_LIMIT: usize = 300;

pub fn validate(answers: &AnswerRecord) -> Result<()> {
    let problems = problems(answers);
    if problems.is_empty() {
        Ok(())
    } else {
        Err(FitnessError::InvalidAnswers(problems))
    }
}

/// Every validation failure in field order; empty for a valid record.
pub fn problems(answers: &AnswerRecord) -> Vec<String> {
    let mut check = Checks::default();

    check.required("organizationName", &answers.organization_name);
    check.required("yourName", &answers.your_name);
    check.required("processName", &answers.process_name);
    check.one_of("industry", &answers.industry, &INDUSTRY);
    check.required("processDescription", &answers.process_description);
    check.max_chars(
        "processDescription",
        &answers.process_description,
        DESCRIPTION_LIMIT,
    );

    check.non_negative("monthlyVolume", answers.monthly_volume);
    check.one_of(
        "processFrequency",
        &answers.process_frequency,
        &PROCESS_FREQUENCY,
    );
    if answers.team_size < 1.0 {
        check.fail(format!(
            "teamSize must be at least 1 (got {})",
            answers.team_size
        ));
    }
    check.percentage("timePercentage", answers.time_percentage);
    check.one_of(
        "averageProcessingTime",
        &answers.average_processing_time,
        &PROCESSING_TIME,
    );
    check.non_negative("costPerTransaction", answers.cost_per_transaction);

    for challenge in answers.challenges() {
        check.one_of("currentChallenges", challenge, &CHALLENGES);
    }
    let takes_too_long = answers
        .challenges()
        .iter()
        .any(|challenge| challenge.trim().eq_ignore_ascii_case(TAKES_TOO_LONG));
    match answers.impact_of_delays.as_deref() {
        Some(impact) => check.one_of("impactOfDelays", impact, &DELAY_IMPACT),
        None if takes_too_long => check.fail(format!(
            "impactOfDelays is required when currentChallenges includes '{TAKES_TOO_LONG}'"
        )),
        None => {}
    }
    if let Some(pain_point) = &answers.biggest_pain_point {
        check.max_chars("biggestPainPoint", pain_point, PAIN_POINT_LIMIT);
    }

    check.percentage("errorRate", answers.error_rate);
    if answers.compliance_requirements.is_empty() {
        check.fail("complianceRequirements needs at least one selection".to_string());
    }
    for requirement in &answers.compliance_requirements {
        check.one_of("complianceRequirements", requirement, &COMPLIANCE);
    }

    check.one_of(
        "documentationStatus",
        &answers.documentation_status,
        &DOCUMENTATION_STATUS,
    );
    let status = answers.documentation_status.trim();
    if status.eq_ignore_ascii_case(PARTIAL_DOCUMENTATION) {
        match answers.documentation_percentage {
            Some(pct) => check.percentage("documentationPercentage", pct),
            None => check.fail(format!(
                "documentationPercentage is required when documentationStatus is '{PARTIAL_DOCUMENTATION}'"
            )),
        }
    }
    if status.eq_ignore_ascii_case(NO_DOCUMENTATION) && answers.relies_on_tribal_knowledge.is_none()
    {
        check.fail(format!(
            "reliesOnTribalKnowledge is required when documentationStatus is '{NO_DOCUMENTATION}'"
        ));
    }
    check.percentage("processStandardization", answers.process_standardization);
    check.percentage("exceptionHandling", answers.exception_handling);

    if answers.systems.is_empty() {
        check.fail("systems needs at least one entry".to_string());
    }
    for (index, system) in answers.systems.iter().enumerate() {
        if system.name.trim().is_empty() {
            check.fail(format!("systems[{index}].name is required"));
        }
    }
    check.one_of("systemAccess", &answers.system_access, &SYSTEM_ACCESS);

    check.one_of("processBottleneck", &answers.process_bottleneck, &BOTTLENECK);
    check.one_of(
        "stakeholderComplaints",
        &answers.stakeholder_complaints,
        &COMPLAINTS,
    );
    check.one_of(
        "growthLimitation",
        &answers.growth_limitation,
        &GROWTH_LIMITATION,
    );
    check.one_of("expectedROI", &answers.expected_roi, &ROI_TIMELINE);

    if let Some(documents) = &answers.document_processing {
        check.one_of("documentProcessing", documents, &DOCUMENT_PROCESSING);
    }
    for channel in answers.communication() {
        check.one_of("communicationNeeds", channel, &COMMUNICATION);
    }
    check.one_of("humanInLoop", &answers.human_in_loop, &HUMAN_IN_LOOP);

    check.problems
}

#[derive(Default)]
struct Checks {
    problems: Vec<String>,
}

impl Checks {
    fn fail(&mut self, problem: String) {
        self.problems.push(problem);
    }

    fn required(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.fail(format!("{field} is required"));
        }
    }

    fn one_of(&mut self, field: &str, value: &str, allowed: &[&str]) {
        if value.trim().is_empty() {
            self.fail(format!("{field} is required"));
        } else if !allowed
            .iter()
            .any(|option| option.eq_ignore_ascii_case(value.trim()))
        {
            self.fail(format!("{field} has unknown option '{value}'"));
        }
    }

    fn max_chars(&mut self, field: &str, value: &str, limit: usize) {
        let length = value.chars().count();
        if length > limit {
            self.fail(format!(
                "{field} is {length} characters, limit is {limit}"
            ));
        }
    }

    fn non_negative(&mut self, field: &str, value: f64) {
        if !value.is_finite() || value < 0.0 {
            self.fail(format!("{field} must be a non-negative number (got {value})"));
        }
    }

    fn percentage(&mut self, field: &str, value: f64) {
        if !(0.0..=100.0).contains(&value) {
            self.fail(format!("{field} must be between 0 and 100 (got {value})"));
        }
    }
}
