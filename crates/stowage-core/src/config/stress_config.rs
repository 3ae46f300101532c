use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Load-generation job settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StressConfig {
    /// How long each worker spins.
    pub duration_secs: u64,
    /// Worker count override. Defaults to the available parallelism.
    pub workers: Option<usize>,
}

impl StressConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_secs)
    }
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            duration_secs: defaults::DEFAULT_STRESS_DURATION_SECS,
            workers: None,
        }
    }
}
