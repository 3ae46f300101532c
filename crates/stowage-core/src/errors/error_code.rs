//! Stable error codes for structured log events and HTTP mapping.

/// Every error enum implements this to expose a stable code string
/// that log consumers can filter on.
pub trait StowageErrorCode {
    /// Returns the code string (e.g., "STORAGE_UNAVAILABLE").
    fn error_code(&self) -> &'static str;

    /// Returns `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const MISCONFIGURED: &str = "MISCONFIGURED";
pub const STORAGE_UNAVAILABLE: &str = "STORAGE_UNAVAILABLE";
pub const LOCAL_IO: &str = "LOCAL_IO";
pub const INVALID_FILENAME: &str = "INVALID_FILENAME";
pub const METRICS_ERROR: &str = "METRICS_ERROR";
pub const SAMPLE_UNAVAILABLE: &str = "SAMPLE_UNAVAILABLE";
pub const PARTIAL_ENUMERATION: &str = "PARTIAL_ENUMERATION";
pub const TRANSIENT_SHIP: &str = "TRANSIENT_SHIP";
