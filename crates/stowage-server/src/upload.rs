//! Upload handling: key derivation and the store call.

use std::sync::Arc;

use bytes::Bytes;

use stowage_core::errors::{MetricsError, StowageErrorCode, UploadError};
use stowage_core::models::UploadReceipt;
use stowage_core::traits::IObjectStore;
use stowage_observability::metrics::names;
use stowage_observability::tracing_setup::events;
use stowage_observability::{MetricsRegistry, OutcomeCounters};

/// Derives object keys from client filenames.
///
/// The key is the configured prefix followed by the filename as sent.
/// Equal filenames map to equal keys, so a repeated upload overwrites.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyRule {
    prefix: String,
}

impl KeyRule {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn key_for(&self, filename: &str) -> Result<String, UploadError> {
        if filename.trim().is_empty() {
            return Err(UploadError::InvalidFilename {
                reason: "filename is empty".to_string(),
            });
        }
        Ok(format!("{}{}", self.prefix, filename))
    }
}

/// Stores one payload per call and counts the outcome.
///
/// Only attempts that reach the store are counted: a rejected filename or a
/// missing bucket leaves `file_uploads_total` untouched.
pub struct UploadService<S> {
    store: Arc<S>,
    bucket: Option<String>,
    keys: KeyRule,
    outcomes: OutcomeCounters,
}

impl<S: IObjectStore> UploadService<S> {
    pub fn new(
        store: Arc<S>,
        bucket: Option<String>,
        keys: KeyRule,
        registry: &MetricsRegistry,
    ) -> Result<Self, MetricsError> {
        Ok(Self {
            store,
            bucket,
            keys,
            outcomes: OutcomeCounters::register(
                registry,
                names::FILE_UPLOADS_TOTAL,
                names::FILE_UPLOADS_HELP,
            )?,
        })
    }

    pub async fn upload(&self, filename: &str, body: Bytes) -> Result<UploadReceipt, UploadError> {
        let (bucket, key) = self.prepare(filename).inspect_err(|e| {
            events::upload_rejected(e.error_code(), e);
        })?;

        let size = body.len();
        match self.store.put_object(bucket, &key, body).await {
            Ok(()) => {
                self.outcomes.record_success();
                events::upload_stored(&key, size);
                Ok(UploadReceipt::new(filename, bucket, &key))
            }
            Err(e) => {
                self.outcomes.record_failure();
                events::upload_failed(&key, e.error_code(), &e);
                Err(UploadError::StorageUnavailable(e))
            }
        }
    }

    fn prepare(&self, filename: &str) -> Result<(&str, String), UploadError> {
        let key = self.keys.key_for(filename)?;
        let bucket = self.bucket.as_deref().ok_or(UploadError::Misconfigured {
            field: "store.bucket",
        })?;
        Ok((bucket, key))
    }

    pub fn outcomes(&self) -> &OutcomeCounters {
        &self.outcomes
    }
}
