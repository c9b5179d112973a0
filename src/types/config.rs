use crate::error::FitnessError;
use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_STORE_DIR: &str = ".fitness/assessments";
const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];
const OUTPUT_FORMATS: [&str; 2] = ["json", "md"];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FitnessConfig {
    pub rules: Option<RulesConfig>,
    pub store: Option<StoreConfig>,
    pub output: Option<OutputConfig>,
    pub logging: Option<LoggingConfig>,
    pub narrative: Option<NarrativeConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RulesConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "md".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "warn".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct NarrativeConfig {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl FitnessConfig {
    pub fn rules_path(&self) -> Option<&PathBuf> {
        self.rules.as_ref().and_then(|rules| rules.path.as_ref())
    }

    pub fn store_dir(&self) -> PathBuf {
        self.store
            .as_ref()
            .and_then(|store| store.dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_DIR))
    }

    pub fn output_format(&self) -> &str {
        self.output
            .as_ref()
            .map(|output| output.format.as_str())
            .unwrap_or("md")
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .map(|logging| logging.level.as_str())
            .unwrap_or("warn")
    }

    pub fn validate(&self) -> Result<(), FitnessError> {
        let format = self.output_format();
        if !OUTPUT_FORMATS.contains(&format) {
            return Err(FitnessError::ConfigParse(format!(
                "unsupported output.format: {format}"
            )));
        }

        let level = self.log_level().to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(FitnessError::ConfigParse(format!(
                "unsupported logging.level: {}",
                self.log_level()
            )));
        }

        if let Some(narrative) = &self.narrative {
            if narrative.command.trim().is_empty() {
                return Err(FitnessError::ConfigParse(
                    "narrative.command must be a non-empty program name".to_string(),
                ));
            }
        }

        if let Some(path) = self.rules_path() {
            if path.as_os_str().is_empty() {
                return Err(FitnessError::ConfigParse(
                    "rules.path cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}
