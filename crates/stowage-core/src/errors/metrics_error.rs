//! Metric registry errors.

use super::error_code::{self, StowageErrorCode};

/// Errors raised while registering or exposing metrics.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    #[error("invalid metric name: {name:?}")]
    InvalidName { name: String },

    #[error("invalid label name {label:?} on metric {name}")]
    InvalidLabel { name: String, label: String },

    #[error("metric {name} already registered as a {registered}, requested {requested}")]
    KindMismatch {
        name: String,
        registered: &'static str,
        requested: &'static str,
    },

    #[error("metric {name} already registered with labels {registered:?}")]
    LabelMismatch {
        name: String,
        registered: Vec<String>,
    },

    #[error("metric {name} rejected by the collector: {reason}")]
    Collector { name: String, reason: String },

    #[error("metric exposition failed: {reason}")]
    Encode { reason: String },
}

impl StowageErrorCode for MetricsError {
    fn error_code(&self) -> &'static str {
        error_code::METRICS_ERROR
    }
}
