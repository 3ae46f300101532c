//! Bucket inventory: object count and total size from a full listing.

use std::sync::Arc;
use std::time::Duration;

use tracing::Instrument;

use stowage_core::errors::{MetricsError, StowageErrorCode, TelemetryError, TelemetryResult};
use stowage_core::models::InventorySummary;
use stowage_core::traits::IObjectStore;
use stowage_observability::cycle_span;
use stowage_observability::metrics::names;
use stowage_observability::tracing_setup::events;
use stowage_observability::tracing_setup::spans::tasks;
use stowage_observability::{Gauge, MetricsRegistry, OutcomeCounters};

/// Walk every listing page of `bucket` and total the objects.
///
/// Any page failure aborts the walk; partial totals are dropped. A
/// continuation token equal to the one just sent also aborts, since
/// following it would loop forever.
pub async fn enumerate<S: IObjectStore>(store: &S, bucket: &str) -> TelemetryResult<InventorySummary> {
    let mut summary = InventorySummary::default();
    let mut token: Option<String> = None;
    loop {
        let page = store
            .list_objects(bucket, token.as_deref())
            .await
            .map_err(|e| TelemetryError::PartialEnumeration {
                pages_completed: summary.pages,
                reason: e.to_string(),
            })?;
        summary.absorb(&page);

        match page.next_token {
            None => return Ok(summary),
            Some(next) if token.as_deref() == Some(next.as_str()) => {
                return Err(TelemetryError::PartialEnumeration {
                    pages_completed: summary.pages,
                    reason: format!("continuation token {next:?} did not advance"),
                });
            }
            Some(next) => token = Some(next),
        }
    }
}

/// Publishes `bucket_object_count` / `bucket_size_bytes` after every
/// complete enumeration.
pub struct InventorySampler<S> {
    store: Arc<S>,
    bucket: Option<String>,
    object_count: Gauge,
    total_bytes: Gauge,
    scans: OutcomeCounters,
}

impl<S: IObjectStore> InventorySampler<S> {
    pub fn new(
        store: Arc<S>,
        bucket: Option<String>,
        registry: &MetricsRegistry,
    ) -> Result<Self, MetricsError> {
        Ok(Self {
            store,
            bucket,
            object_count: registry.gauge(
                names::BUCKET_OBJECT_COUNT,
                names::BUCKET_OBJECT_COUNT_HELP,
                &[],
            )?,
            total_bytes: registry.gauge(
                names::BUCKET_SIZE_BYTES,
                names::BUCKET_SIZE_BYTES_HELP,
                &[],
            )?,
            scans: OutcomeCounters::register(
                registry,
                names::INVENTORY_SCANS_TOTAL,
                names::INVENTORY_SCANS_HELP,
            )?,
        })
    }

    /// One cycle. Gauges change only when the whole listing succeeded.
    pub async fn scan_once(&self) -> TelemetryResult<InventorySummary> {
        let Some(bucket) = self.bucket.as_deref() else {
            let err = TelemetryError::Misconfigured {
                field: "store.bucket",
            };
            events::inventory_aborted(err.error_code(), &err);
            return Err(err);
        };

        match enumerate(self.store.as_ref(), bucket).await {
            Ok(summary) => {
                self.object_count.set(summary.object_count as f64);
                self.total_bytes.set(summary.total_bytes as f64);
                self.scans.record_success();
                events::inventory_published(summary.object_count, summary.total_bytes, summary.pages);
                Ok(summary)
            }
            Err(e) => {
                self.scans.record_failure();
                events::inventory_aborted(e.error_code(), &e);
                Err(e)
            }
        }
    }

    /// Run until the task is aborted.
    pub async fn run(self, period: Duration) {
        let mut ticker = crate::ticker(period);
        events::task_started(tasks::INVENTORY_SAMPLER, period.as_secs());
        loop {
            ticker.tick().await;
            let _ = self
                .scan_once()
                .instrument(cycle_span!(tasks::INVENTORY_SAMPLER))
                .await;
        }
    }
}

#[cfg(test)]
mod tests {
    use test_fixtures::FakeObjectStore;

    use super::*;

    fn seeded(page_size: usize, sizes: &[usize]) -> Arc<FakeObjectStore> {
        let store = FakeObjectStore::with_page_size(page_size);
        for (i, size) in sizes.iter().enumerate() {
            store.seed("bkt", &format!("obj-{i:03}"), vec![0u8; *size]);
        }
        Arc::new(store)
    }

    fn gauges(registry: &MetricsRegistry) -> (f64, f64) {
        let count = registry
            .gauge(names::BUCKET_OBJECT_COUNT, names::BUCKET_OBJECT_COUNT_HELP, &[])
            .unwrap();
        let size = registry
            .gauge(names::BUCKET_SIZE_BYTES, names::BUCKET_SIZE_BYTES_HELP, &[])
            .unwrap();
        (count.get(), size.get())
    }

    // --- enumerate ---

    #[tokio::test]
    async fn totals_span_every_page() {
        let store = seeded(2, &[10, 20, 30, 40, 50]);
        let summary = enumerate(store.as_ref(), "bkt").await.unwrap();
        assert_eq!(summary.object_count, 5);
        assert_eq!(summary.total_bytes, 150);
        assert_eq!(summary.pages, 3);
        assert_eq!(store.list_calls(), 3);
    }

    #[tokio::test]
    async fn empty_bucket_is_one_page_of_nothing() {
        let store = Arc::new(FakeObjectStore::new());
        let summary = enumerate(store.as_ref(), "bkt").await.unwrap();
        assert_eq!(summary, InventorySummary { object_count: 0, total_bytes: 0, pages: 1 });
    }

    #[tokio::test]
    async fn non_advancing_token_aborts() {
        let store = seeded(1, &[1, 2, 3]);
        store.stick_continuation_token(true);
        let err = enumerate(store.as_ref(), "bkt").await.unwrap_err();
        assert!(matches!(err, TelemetryError::PartialEnumeration { .. }));
        assert_eq!(store.list_calls(), 2);
    }

    // --- sampler ---

    #[tokio::test]
    async fn mid_listing_failure_keeps_previous_gauges() {
        let registry = MetricsRegistry::new();
        let store = seeded(2, &[1, 1, 1, 1, 1]);
        let sampler = InventorySampler::new(store.clone(), Some("bkt".into()), &registry).unwrap();

        sampler.scan_once().await.unwrap();
        assert_eq!(gauges(&registry), (5.0, 5.0));

        store.seed("bkt", "obj-new", vec![0u8; 100]);
        store.fail_list_on_page(Some(2));
        let err = sampler.scan_once().await.unwrap_err();
        assert!(matches!(err, TelemetryError::PartialEnumeration { pages_completed: 2, .. }));
        assert_eq!(gauges(&registry), (5.0, 5.0));

        let scans = OutcomeCounters::register(
            &registry,
            names::INVENTORY_SCANS_TOTAL,
            names::INVENTORY_SCANS_HELP,
        )
        .unwrap();
        assert_eq!((scans.successes(), scans.failures()), (1, 1));
    }

    #[tokio::test]
    async fn missing_bucket_skips_without_listing() {
        let registry = MetricsRegistry::new();
        let store = seeded(2, &[1]);
        let sampler = InventorySampler::new(store.clone(), None, &registry).unwrap();

        let err = sampler.scan_once().await.unwrap_err();
        assert!(matches!(err, TelemetryError::Misconfigured { .. }));
        assert_eq!(store.list_calls(), 0);
    }
}
