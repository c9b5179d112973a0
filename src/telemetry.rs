use crate::error::{FitnessError, Result};
use tracing_subscriber::EnvFilter;

/// Level implied by the global flags, falling back to the configured one.
pub fn effective_level(verbose: u8, quiet: bool, configured: &str) -> String {
    match (quiet, verbose) {
        (true, _) => "error".to_string(),
        (false, 0) => configured.to_ascii_lowercase(),
        (false, 1) => "info".to_string(),
        (false, _) => "debug".to_string(),
    }
}

/// Installs the stderr subscriber. `RUST_LOG` wins over `level`.
pub fn init(level: &str) -> Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level).map_err(|e| {
            FitnessError::ConfigParse(format!("invalid log level/filter '{level}': {e}"))
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(|e| FitnessError::ConfigParse(format!("telemetry error: {e}")))
}
