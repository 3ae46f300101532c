use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Describes a stress job that was started. Workers are still running when
/// this is returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StressLaunch {
    pub job_id: Uuid,
    pub workers: usize,
    pub duration: Duration,
}

impl StressLaunch {
    /// Plain-text acknowledgment returned to the caller.
    pub fn acknowledgment(&self) -> String {
        format!(
            "Started {} CPU stress workers for {}s (job {})",
            self.workers,
            self.duration.as_secs(),
            self.job_id
        )
    }
}
