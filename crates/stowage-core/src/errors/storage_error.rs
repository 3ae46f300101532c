//! Remote object-store errors.

use super::error_code::{self, StowageErrorCode};

/// Errors raised by an object-store client.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("{operation} failed: {reason}")]
    RequestFailed {
        operation: &'static str,
        reason: String,
    },

    #[error("local read of {path} failed: {reason}")]
    LocalIo { path: String, reason: String },
}

impl StowageErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::RequestFailed { .. } => error_code::STORAGE_UNAVAILABLE,
            Self::LocalIo { .. } => error_code::LOCAL_IO,
        }
    }
}
