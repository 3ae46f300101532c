//! Error handling for stowage.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod metrics_error;
pub mod storage_error;
pub mod stowage_error;
pub mod telemetry_error;
pub mod upload_error;

pub use config_error::ConfigError;
pub use error_code::StowageErrorCode;
pub use metrics_error::MetricsError;
pub use storage_error::StorageError;
pub use stowage_error::{StowageError, StowageResult};
pub use telemetry_error::TelemetryError;
pub use upload_error::UploadError;

/// Result alias for object-store calls.
pub type StorageResult<T> = Result<T, StorageError>;

/// Result alias for background loop cycles.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
