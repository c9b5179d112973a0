use thiserror::Error;

#[derive(Error, Debug)]
pub enum FitnessError {
    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("rule table error: {0}")]
    RulesParse(String),

    #[error("invalid answers: {}", .0.join("; "))]
    InvalidAnswers(Vec<String>),

    #[error("invalid submission id: {0}")]
    InvalidSubmissionId(String),

    #[error("assessment not found: {0}")]
    AssessmentNotFound(String),

    #[error("narrative generation failed: {0}")]
    Narrative(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FitnessError>;
