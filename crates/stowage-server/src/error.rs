//! HTTP error mapping. Bodies carry a generic `detail`; the cause is
//! logged where it happened.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use stowage_core::errors::{MetricsError, StowageErrorCode, UploadError};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("malformed multipart body: {reason}")]
    Multipart { status: StatusCode, reason: String },

    #[error("multipart body has no file part")]
    MissingFile,

    #[error(transparent)]
    Metrics(#[from] MetricsError),
}

impl ApiError {
    pub fn multipart(err: MultipartError) -> Self {
        Self::Multipart {
            status: err.status(),
            reason: err.body_text(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Upload(UploadError::InvalidFilename { .. }) => StatusCode::BAD_REQUEST,
            Self::Upload(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Multipart { status, .. } => *status,
            Self::MissingFile => StatusCode::BAD_REQUEST,
            Self::Metrics(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn detail(&self) -> &'static str {
        match self {
            Self::Upload(UploadError::InvalidFilename { .. }) => "Invalid filename",
            Self::Upload(UploadError::Misconfigured { .. }) => "Upload storage is not configured",
            Self::Upload(UploadError::StorageUnavailable(_)) => "Failed to upload file",
            Self::Multipart { .. } => "Invalid multipart request",
            Self::MissingFile => "No file provided",
            Self::Metrics(_) => "Metrics unavailable",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Upload(e) = &self {
            tracing::debug!(code = e.error_code(), "upload request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }
        (self.status(), Json(json!({ "detail": self.detail() }))).into_response()
    }
}
