use serde::{Deserialize, Serialize};

/// What one background loop cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleOutcome {
    /// Fresh values were published (or a buffer was shipped).
    Published,
    /// Nothing to do this cycle; no remote call, no mutation.
    Idle,
}
