//! Upload request-path errors.

use super::error_code::{self, StowageErrorCode};
use super::StorageError;

/// Errors surfaced synchronously to an upload caller.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// The destination bucket is not configured. Raised before any store call.
    #[error("upload destination not configured: {field} is not set")]
    Misconfigured { field: &'static str },

    /// The store call failed. Never retried here.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[from] StorageError),

    #[error("invalid filename: {reason}")]
    InvalidFilename { reason: String },
}

impl StowageErrorCode for UploadError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Misconfigured { .. } => error_code::MISCONFIGURED,
            Self::StorageUnavailable(_) => error_code::STORAGE_UNAVAILABLE,
            Self::InvalidFilename { .. } => error_code::INVALID_FILENAME,
        }
    }
}
