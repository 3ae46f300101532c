use crate::errors::TelemetryResult;
use crate::models::HostSnapshot;

/// Reads host-level resource counters on demand.
pub trait ISampleSource: Send {
    /// Take one reading. Cumulative counters are totals since boot.
    fn sample(&mut self) -> TelemetryResult<HostSnapshot>;
}
