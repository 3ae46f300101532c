//! Span definitions for background cycles and request handling.

/// Create a span around one background loop cycle.
#[macro_export]
macro_rules! cycle_span {
    ($task:expr) => {
        tracing::info_span!("stowage.cycle", task = %$task)
    };
}

/// Create a span around one upload request.
#[macro_export]
macro_rules! upload_span {
    ($filename:expr) => {
        tracing::info_span!("stowage.upload", filename = %$filename)
    };
}

/// Names of the long-running background tasks.
pub mod tasks {
    pub const SYSTEM_SAMPLER: &str = "system_sampler";
    pub const INVENTORY_SAMPLER: &str = "inventory_sampler";
    pub const LOG_SHIPPER: &str = "log_shipper";
}
