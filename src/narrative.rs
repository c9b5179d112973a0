//! Free-text analysis of a scored assessment by an external generator.
//!
//! The engine never calls out; this module builds the request from a stored
//! assessment, renders the rule table's prompt template and caches the
//! result on the assessment. A failed generation is reported as
//! "analysis unavailable" and is not retried.

use crate::error::{FitnessError, Result};
use crate::store::AssessmentStore;
use crate::types::assessment::{Assessment, Narrative};
use crate::types::config::NarrativeConfig;
use serde::Serialize;
use std::io::Write;
use std::process::{ChildStdin, Command, Stdio};
use tracing::{info, warn};

pub const UNAVAILABLE: &str = "analysis unavailable";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeResponses {
    pub monthly_volume: f64,
    pub frequency: String,
    pub team_size: f64,
    pub time_percentage: f64,
    pub processing_time: String,
    pub monthly_cost: f64,
    pub error_rate: f64,
    pub compliance: Vec<String>,
    pub delay_impact: String,
    pub standardization: f64,
    pub sop_status: String,
    pub exception_rate: f64,
    pub systems: Vec<NarrativeSystem>,
    pub system_access: String,
    pub bottleneck: String,
    pub complaints: String,
    pub growth_limit: String,
    pub roi_timeline: String,
    pub biggest_pain_point: String,
    pub current_challenges: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeSystem {
    pub name: String,
    #[serde(rename = "hasAPI")]
    pub has_api: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeScores {
    pub volume_scale: u32,
    pub cost_efficiency: u32,
    pub risk_compliance: u32,
    /// Total feasibility: the technical sub-score plus task complexity.
    pub feasibility: u32,
    pub strategic_impact: u32,
    pub business_impact: u32,
    pub total_score: u32,
    pub category: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeRequest {
    pub process_name: String,
    pub industry: String,
    pub responses: NarrativeResponses,
    pub scores: NarrativeScores,
    pub flags: Vec<String>,
}

impl NarrativeRequest {
    pub fn from_assessment(assessment: &Assessment) -> Self {
        use crate::types::answers::ApiAvailability;

        let answers = &assessment.answers;
        let scores = &assessment.scores;
        Self {
            process_name: answers.process_name.clone(),
            industry: answers.industry.clone(),
            responses: NarrativeResponses {
                monthly_volume: answers.monthly_volume,
                frequency: answers.process_frequency.clone(),
                team_size: answers.team_size,
                time_percentage: answers.time_percentage,
                processing_time: answers.average_processing_time.clone(),
                monthly_cost: answers.monthly_value(),
                error_rate: answers.error_rate,
                compliance: answers.compliance_requirements.clone(),
                delay_impact: answers.impact_of_delays.clone().unwrap_or_default(),
                standardization: answers.process_standardization,
                sop_status: answers.documentation_status.clone(),
                exception_rate: answers.exception_handling,
                systems: answers
                    .systems
                    .iter()
                    .map(|system| NarrativeSystem {
                        name: system.name.clone(),
                        has_api: system.has_api == ApiAvailability::Yes,
                    })
                    .collect(),
                system_access: answers.system_access.clone(),
                bottleneck: answers.process_bottleneck.clone(),
                complaints: answers.stakeholder_complaints.clone(),
                growth_limit: answers.growth_limitation.clone(),
                roi_timeline: answers.expected_roi.clone(),
                biggest_pain_point: answers.biggest_pain_point.clone().unwrap_or_default(),
                current_challenges: answers.challenges().to_vec(),
            },
            scores: NarrativeScores {
                volume_scale: scores.volume_scale,
                cost_efficiency: scores.cost_efficiency,
                risk_compliance: scores.risk_compliance,
                feasibility: scores.total_feasibility,
                strategic_impact: scores.strategic_impact,
                business_impact: scores.business_impact,
                total_score: scores.total_score,
                category: scores.category.trim_end_matches('⭐').trim_end().to_string(),
            },
            flags: scores.flags.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Fills `{{processName}}`, `{{industry}}`, `{{responses}}`, `{{scores}}`
/// and `{{flags}}`. The structured placeholders render as compact JSON.
pub fn render_prompt(template: &str, request: &NarrativeRequest) -> Result<String> {
    Ok(template
        .replace("{{processName}}", &request.process_name)
        .replace("{{industry}}", &request.industry)
        .replace("{{responses}}", &serde_json::to_string(&request.responses)?)
        .replace("{{scores}}", &serde_json::to_string(&request.scores)?)
        .replace("{{flags}}", &serde_json::to_string(&request.flags)?))
}

pub trait NarrativeGenerator {
    fn generate(&self, prompt: &str) -> Result<Narrative>;
}

/// Pipes the prompt to an external program's stdin and reads a JSON
/// narrative from its stdout.
#[derive(Debug, Clone)]
pub struct CommandNarrator {
    command: String,
    args: Vec<String>,
}

impl CommandNarrator {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }

    pub fn from_config(config: &NarrativeConfig) -> Self {
        Self::new(config.command.clone(), config.args.clone())
    }
}

impl NarrativeGenerator for CommandNarrator {
    fn generate(&self, prompt: &str) -> Result<Narrative> {
        let mut child = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| FitnessError::Narrative(format!("cannot start {}: {e}", self.command)))?;

        // stdin is fed from its own thread while stdout and stderr drain
        let stdin = child.stdin.take();
        let (written, output) = std::thread::scope(|scope| {
            let writer = scope.spawn(move || write_prompt(stdin, prompt));
            let output = child.wait_with_output();
            (writer.join(), output)
        });
        let output = output?;
        written.map_err(|_| FitnessError::Narrative("prompt writer panicked".to_string()))??;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let preview: String = stderr.trim().chars().take(180).collect();
            return Err(FitnessError::Narrative(format!(
                "{} exited with {}: {preview}",
                self.command, output.status
            )));
        }

        parse_narrative(&String::from_utf8_lossy(&output.stdout))
    }
}

/// A generator may exit without reading its input; its exit status decides
/// the outcome, so a closed pipe is not an error here.
fn write_prompt(stdin: Option<ChildStdin>, prompt: &str) -> std::io::Result<()> {
    let Some(mut stdin) = stdin else {
        return Ok(());
    };
    match stdin.write_all(prompt.as_bytes()) {
        Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

/// Generator used when no `[narrative]` command is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unconfigured;

impl NarrativeGenerator for Unconfigured {
    fn generate(&self, _prompt: &str) -> Result<Narrative> {
        Err(FitnessError::Narrative(
            "no [narrative] command configured".to_string(),
        ))
    }
}

/// Reads the outermost JSON object in `text`, tolerating chatter or code
/// fences around it.
pub fn parse_narrative(text: &str) -> Result<Narrative> {
    let start = text.find('{');
    let end = text.rfind('}');
    let body = match (start, end) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => {
            return Err(FitnessError::Narrative(
                "generator output holds no JSON object".to_string(),
            ))
        }
    };
    let mut narrative: Narrative = serde_json::from_str(body)
        .map_err(|e| FitnessError::Narrative(format!("unreadable generator output: {e}")))?;
    narrative.confidence = narrative.confidence.min(100);
    Ok(narrative)
}

#[derive(Debug, Clone, PartialEq)]
pub enum NarrativeOutcome {
    /// Already stored on the assessment; the generator was not called.
    Cached(Narrative),
    Generated(Narrative),
    Unavailable(String),
}

/// Returns the stored narrative for `id`, generating and saving one when
/// the assessment has none yet.
pub fn ensure_narrative(
    store: &dyn AssessmentStore,
    id: &str,
    template: &str,
    generator: &dyn NarrativeGenerator,
) -> Result<NarrativeOutcome> {
    let mut assessment = store.get(id)?;
    if let Some(narrative) = assessment.narrative.clone() {
        return Ok(NarrativeOutcome::Cached(narrative));
    }

    let prompt = render_prompt(template, &NarrativeRequest::from_assessment(&assessment))?;
    match generator.generate(&prompt) {
        Ok(narrative) => {
            assessment.narrative = Some(narrative.clone());
            store.save(&assessment)?;
            info!(id = %id, "narrative stored");
            Ok(NarrativeOutcome::Generated(narrative))
        }
        Err(e) => {
            warn!(id = %id, "narrative generation failed: {e}");
            Ok(NarrativeOutcome::Unavailable(e.to_string()))
        }
    }
}
