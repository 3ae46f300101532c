use serde::{Deserialize, Serialize};

use super::defaults;

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// `EnvFilter` directive, e.g. "info" or "stowage_telemetry=debug,info".
    pub log_level: String,
    /// Emit JSON on stdout instead of the human-readable format.
    pub json_stdout: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::DEFAULT_LOG_LEVEL.to_string(),
            json_stdout: defaults::DEFAULT_JSON_STDOUT,
        }
    }
}
