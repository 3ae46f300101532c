use std::collections::VecDeque;

use stowage_core::errors::{TelemetryError, TelemetryResult};
use stowage_core::models::HostSnapshot;
use stowage_core::traits::ISampleSource;

/// Replays readings in order. Once the script runs out every call fails
/// with `SampleUnavailable`.
#[derive(Debug, Default)]
pub struct ScriptedSampleSource {
    script: VecDeque<Result<HostSnapshot, String>>,
    calls: usize,
}

impl ScriptedSampleSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then_ok(mut self, snapshot: HostSnapshot) -> Self {
        self.script.push_back(Ok(snapshot));
        self
    }

    pub fn then_unavailable(mut self, what: &str) -> Self {
        self.script.push_back(Err(what.to_string()));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl ISampleSource for ScriptedSampleSource {
    fn sample(&mut self) -> TelemetryResult<HostSnapshot> {
        self.calls += 1;
        match self.script.pop_front() {
            Some(Ok(snapshot)) => Ok(snapshot),
            Some(Err(what)) => Err(TelemetryError::SampleUnavailable { what }),
            None => Err(TelemetryError::SampleUnavailable {
                what: "script exhausted".to_string(),
            }),
        }
    }
}
