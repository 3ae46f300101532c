//! Concurrency and determinism tests for the metric registry.

use std::sync::Arc;

use proptest::prelude::*;
use stowage_observability::{MetricKind, MetricsRegistry, OutcomeCounters};

#[test]
fn concurrent_increments_are_not_lost() {
    let registry = Arc::new(MetricsRegistry::new());
    let threads = 8;
    let per_thread = 1_000;

    std::thread::scope(|scope| {
        for _ in 0..threads {
            let registry = Arc::clone(&registry);
            scope.spawn(move || {
                // Each thread registers independently; all must land on one series.
                let counter = registry
                    .counter("hits_total", "Hits", &[("route", "/upload")])
                    .unwrap();
                for _ in 0..per_thread {
                    counter.increment();
                }
            });
        }
    });

    let counter = registry
        .counter("hits_total", "Hits", &[("route", "/upload")])
        .unwrap();
    assert_eq!(counter.get(), threads * per_thread);
    assert_eq!(registry.len(), 1);
}

#[test]
fn concurrent_registration_with_mixed_kinds_keeps_one_kind() {
    let registry = Arc::new(MetricsRegistry::new());
    let results: Vec<Result<MetricKind, ()>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..16)
            .map(|i| {
                let registry = Arc::clone(&registry);
                scope.spawn(move || {
                    let kind = if i % 2 == 0 {
                        MetricKind::Counter
                    } else {
                        MetricKind::Gauge
                    };
                    registry
                        .register("contested", "h", kind, &[])
                        .map(|h| h.kind())
                        .map_err(|_| ())
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let winners: Vec<MetricKind> = results.into_iter().filter_map(Result::ok).collect();
    assert!(!winners.is_empty());
    assert!(winners.iter().all(|k| *k == winners[0]));
    assert_eq!(registry.len(), 1);
}

#[test]
fn outcome_counters_share_one_family() {
    let registry = MetricsRegistry::new();
    let uploads = OutcomeCounters::register(&registry, "file_uploads_total", "Uploads").unwrap();
    uploads.record_success();
    uploads.record_success();
    uploads.record_failure();

    let again = OutcomeCounters::register(&registry, "file_uploads_total", "Uploads").unwrap();
    assert_eq!(again.successes(), 2);
    assert_eq!(again.failures(), 1);

    let text = registry.snapshot().unwrap();
    assert_eq!(text.matches("# TYPE file_uploads_total counter").count(), 1);
    assert!(text.contains("file_uploads_total{outcome=\"success\"} 2\n"));
    assert!(text.contains("file_uploads_total{outcome=\"failure\"} 1\n"));
}

proptest! {
    #[test]
    fn snapshot_is_independent_of_registration_order(
        names in prop::collection::btree_set("[a-z][a-z0-9_]{0,8}", 1..10),
        seed in any::<u64>(),
    ) {
        let names: Vec<String> = names.into_iter().collect();
        let mut shuffled = names.clone();
        // Deterministic rotation stands in for a shuffle.
        let shift = (seed as usize) % shuffled.len();
        shuffled.rotate_left(shift);

        let a = MetricsRegistry::new();
        let b = MetricsRegistry::new();
        for n in &names {
            a.gauge(n, "h", &[]).unwrap().set(n.len() as f64);
        }
        for n in &shuffled {
            b.gauge(n, "h", &[]).unwrap().set(n.len() as f64);
        }
        prop_assert_eq!(a.snapshot().unwrap(), b.snapshot().unwrap());
    }
}
