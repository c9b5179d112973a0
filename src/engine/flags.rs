use crate::intake::options::{INTRANET_ONLY, NO_DOCUMENTATION, PARTIAL_DOCUMENTATION};
use crate::types::answers::{AnswerRecord, ApiAvailability};
use crate::types::scoring::Flag;

/// Exception rate above which a process is flagged.
pub const EXCEPTION_RATE_LIMIT: f64 = 30.0;

/// True for documentation answers that leave the procedure partly in
/// people's heads. Shared with the feasibility penalty.
pub fn documentation_gap(status: &str) -> bool {
    let status = status.trim();
    status.eq_ignore_ascii_case(NO_DOCUMENTATION) || status.eq_ignore_ascii_case(PARTIAL_DOCUMENTATION)
}

/// Advisory flags in a fixed order: documentation, exceptions, one entry per
/// system, then network reachability.
pub fn generate(answers: &AnswerRecord) -> Vec<Flag> {
    let mut flags = Vec::new();

    if documentation_gap(&answers.documentation_status) {
        flags.push(Flag::warning("No or partial documented SOPs"));
    }

    if answers.exception_handling > EXCEPTION_RATE_LIMIT {
        flags.push(Flag::warning("High exception rate (>30%)"));
    }

    for system in &answers.systems {
        match system.has_api {
            ApiAvailability::No if system.is_on_premise() => flags.push(Flag::blocker(format!(
                "Integration blocker: {system} is not cloud-based and has no API"
            ))),
            ApiAvailability::No => flags.push(Flag::warning(format!("System without API: {system}"))),
            ApiAvailability::Unknown => flags.push(Flag::info(format!(
                "API status unknown for {system}. Further investigation needed."
            ))),
            ApiAvailability::Yes => {}
        }
    }

    if answers.system_access.trim().eq_ignore_ascii_case(INTRANET_ONLY) {
        flags.push(Flag::blocker(
            "Integration blocker: All systems are on internal network only",
        ));
    }

    flags
}
