//! Background loop errors. These never leave their cycle: each loop logs
//! them and waits for the next tick.

use super::error_code::{self, StowageErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("host sample unavailable: {what}")]
    SampleUnavailable { what: String },

    /// Listing failed mid-pagination; the partial totals are discarded.
    #[error("inventory enumeration aborted after {pages_completed} pages: {reason}")]
    PartialEnumeration { pages_completed: usize, reason: String },

    /// Log upload or compaction failed; the buffer is kept for the next cycle.
    #[error("log shipment failed: {reason}")]
    TransientShip { reason: String },

    #[error("telemetry destination not configured: {field} is not set")]
    Misconfigured { field: &'static str },
}

impl StowageErrorCode for TelemetryError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::SampleUnavailable { .. } => error_code::SAMPLE_UNAVAILABLE,
            Self::PartialEnumeration { .. } => error_code::PARTIAL_ENUMERATION,
            Self::TransientShip { .. } => error_code::TRANSIENT_SHIP,
            Self::Misconfigured { .. } => error_code::MISCONFIGURED,
        }
    }
}
