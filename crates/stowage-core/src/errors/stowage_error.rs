//! Top-level error aggregating every subsystem error via `From`.

use super::error_code::StowageErrorCode;
use super::{ConfigError, MetricsError, StorageError, TelemetryError, UploadError};

#[derive(Debug, thiserror::Error)]
pub enum StowageError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("metrics error: {0}")]
    Metrics(#[from] MetricsError),

    #[error("upload error: {0}")]
    Upload(#[from] UploadError),

    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
}

pub type StowageResult<T> = Result<T, StowageError>;

impl StowageErrorCode for StowageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
            Self::Metrics(e) => e.error_code(),
            Self::Upload(e) => e.error_code(),
            Self::Telemetry(e) => e.error_code(),
        }
    }
}
