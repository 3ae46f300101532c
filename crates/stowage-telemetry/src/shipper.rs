//! Ships the local log buffer to the object store.
//!
//! Each cycle observes the buffer length N, uploads exactly the first N
//! bytes, and only after the store confirms removes those N bytes. Lines
//! appended during the upload stay in the buffer for the next cycle. A
//! failure anywhere leaves the buffer as it was, so delivery is
//! at-least-once.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::Instrument;

use stowage_core::errors::{MetricsError, StowageErrorCode, TelemetryError, TelemetryResult};
use stowage_core::models::CycleOutcome;
use stowage_core::traits::IObjectStore;
use stowage_observability::cycle_span;
use stowage_observability::metrics::names;
use stowage_observability::tracing_setup::events;
use stowage_observability::tracing_setup::spans::tasks;
use stowage_observability::{Gauge, LogBuffer, MetricsRegistry, OutcomeCounters};

const KEY_TIME_FORMAT: &str = "%Y-%m-%dT%H-%M-%SZ";

/// Remote key for a shipment taken at `at`: `<prefix><UTC time>.log`.
/// Keys sort chronologically.
pub fn shipment_key(prefix: &str, at: DateTime<Utc>) -> String {
    format!("{prefix}{}.log", at.format(KEY_TIME_FORMAT))
}

pub struct LogShipper<S> {
    store: Arc<S>,
    bucket: Option<String>,
    buffer: LogBuffer,
    key_prefix: String,
    shipments: OutcomeCounters,
    pending: Gauge,
    /// Last key shipped and how many times it was reused, so two cycles in
    /// the same second never overwrite each other.
    last_key: Mutex<Option<(String, u32)>>,
}

impl<S: IObjectStore> LogShipper<S> {
    pub fn new(
        store: Arc<S>,
        bucket: Option<String>,
        buffer: LogBuffer,
        key_prefix: impl Into<String>,
        registry: &MetricsRegistry,
    ) -> Result<Self, MetricsError> {
        Ok(Self {
            store,
            bucket,
            buffer,
            key_prefix: key_prefix.into(),
            shipments: OutcomeCounters::register(
                registry,
                names::LOG_SHIPMENTS_TOTAL,
                names::LOG_SHIPMENTS_HELP,
            )?,
            pending: registry.gauge(
                names::LOG_BUFFER_PENDING_BYTES,
                names::LOG_BUFFER_PENDING_HELP,
                &[],
            )?,
            last_key: Mutex::new(None),
        })
    }

    /// One cycle. `Idle` means the buffer was empty or absent and nothing
    /// was touched.
    pub async fn ship_once(&self) -> TelemetryResult<CycleOutcome> {
        let result = self.try_ship().await;
        match &result {
            Ok(CycleOutcome::Published) => self.shipments.record_success(),
            Ok(CycleOutcome::Idle) | Err(TelemetryError::Misconfigured { .. }) => {}
            Err(_) => self.shipments.record_failure(),
        }
        if let Err(e) = &result {
            events::ship_failed(e.error_code(), e);
        }
        result
    }

    async fn try_ship(&self) -> TelemetryResult<CycleOutcome> {
        let path = self.buffer.path().display().to_string();
        let pending = self
            .buffer
            .pending_bytes()
            .map_err(|e| TelemetryError::TransientShip {
                reason: format!("stat {path}: {e}"),
            })?;
        self.pending.set(pending as f64);
        if pending == 0 {
            return Ok(CycleOutcome::Idle);
        }

        let bucket = self.bucket.as_deref().ok_or(TelemetryError::Misconfigured {
            field: "store.bucket",
        })?;

        let key = self.next_key(Utc::now());
        self.store
            .upload_file(bucket, &key, self.buffer.path(), pending)
            .await
            .map_err(|e| TelemetryError::TransientShip {
                reason: e.to_string(),
            })?;

        let buffer = self.buffer.clone();
        let remaining = tokio::task::spawn_blocking(move || buffer.drain_prefix(pending))
            .await
            .map_err(|e| TelemetryError::TransientShip {
                reason: format!("compaction task: {e}"),
            })?
            .map_err(|e| TelemetryError::TransientShip {
                reason: format!("compact {path}: {e}"),
            })?;

        self.pending.set(remaining as f64);
        events::logs_shipped(&key, pending, remaining);
        Ok(CycleOutcome::Published)
    }

    fn next_key(&self, at: DateTime<Utc>) -> String {
        let base = shipment_key(&self.key_prefix, at);
        let mut last = self.last_key.lock().unwrap_or_else(PoisonError::into_inner);
        let reuse = match last.as_ref() {
            Some((prev, n)) if *prev == base => n + 1,
            _ => 0,
        };
        *last = Some((base.clone(), reuse));
        match reuse {
            0 => base,
            n => match base.strip_suffix(".log") {
                Some(stem) => format!("{stem}-{n}.log"),
                None => format!("{base}-{n}"),
            },
        }
    }

    /// Run until the task is aborted.
    pub async fn run(self: Arc<Self>, period: Duration) {
        let mut ticker = crate::ticker(period);
        events::task_started(tasks::LOG_SHIPPER, period.as_secs());
        loop {
            ticker.tick().await;
            let _ = self
                .ship_once()
                .instrument(cycle_span!(tasks::LOG_SHIPPER))
                .await;
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn key_is_prefixed_utc_second() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(shipment_key("logs/", at), "logs/2024-03-09T07-05-01Z.log");
        assert_eq!(shipment_key("", at), "2024-03-09T07-05-01Z.log");
    }

    #[test]
    fn same_second_keys_get_a_suffix() {
        let registry = MetricsRegistry::new();
        let dir = tempfile::tempdir().unwrap();
        let buffer = LogBuffer::open(dir.path().join("app.log")).unwrap();
        let shipper = LogShipper::new(
            Arc::new(test_fixtures::FakeObjectStore::new()),
            Some("bkt".into()),
            buffer,
            "logs/",
            &registry,
        )
        .unwrap();

        let at = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(shipper.next_key(at), "logs/2024-03-09T07-05-01Z.log");
        assert_eq!(shipper.next_key(at), "logs/2024-03-09T07-05-01Z-1.log");
        assert_eq!(shipper.next_key(at), "logs/2024-03-09T07-05-01Z-2.log");
        let later = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 2).unwrap();
        assert_eq!(shipper.next_key(later), "logs/2024-03-09T07-05-02Z.log");
    }
}
