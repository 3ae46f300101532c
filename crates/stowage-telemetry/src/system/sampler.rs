use std::time::Duration;

use chrono::Utc;

use stowage_core::errors::{MetricsError, StowageErrorCode, TelemetryResult};
use stowage_core::models::HostSnapshot;
use stowage_core::traits::ISampleSource;
use stowage_observability::cycle_span;
use stowage_observability::metrics::names::SYSTEM_GAUGE_HELP;
use stowage_observability::tracing_setup::events;
use stowage_observability::tracing_setup::spans::tasks;
use stowage_observability::{Gauge, MetricsRegistry};

/// One gauge per host counter, in `HostSnapshot::SAMPLE_NAMES` order.
#[derive(Debug, Clone)]
pub struct SystemGauges {
    gauges: Vec<Gauge>,
}

impl SystemGauges {
    pub fn register(registry: &MetricsRegistry) -> Result<Self, MetricsError> {
        let gauges = HostSnapshot::SAMPLE_NAMES
            .into_iter()
            .map(|name| registry.gauge(name, SYSTEM_GAUGE_HELP, &[]))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { gauges })
    }

    fn publish(&self, snapshot: &HostSnapshot) {
        for (sample, gauge) in snapshot.samples(Utc::now()).iter().zip(&self.gauges) {
            gauge.set(sample.value);
        }
    }
}

/// Reads the host every tick and publishes the reading as gauges.
pub struct SystemSampler<S> {
    source: S,
    gauges: SystemGauges,
}

impl<S: ISampleSource> SystemSampler<S> {
    pub fn new(source: S, registry: &MetricsRegistry) -> Result<Self, MetricsError> {
        Ok(Self {
            source,
            gauges: SystemGauges::register(registry)?,
        })
    }

    /// One cycle. A failed reading is logged and nothing is published, so
    /// the gauges keep their previous values.
    pub fn sample_once(&mut self) -> TelemetryResult<HostSnapshot> {
        match self.source.sample() {
            Ok(snapshot) => {
                self.gauges.publish(&snapshot);
                events::sample_published(snapshot.cpu_percent, snapshot.memory_percent);
                Ok(snapshot)
            }
            Err(e) => {
                events::sample_skipped(e.error_code(), &e);
                Err(e)
            }
        }
    }

    /// Run until the task is aborted.
    pub async fn run(mut self, period: Duration) {
        let mut ticker = crate::ticker(period);
        events::task_started(tasks::SYSTEM_SAMPLER, period.as_secs());
        loop {
            ticker.tick().await;
            let _span = cycle_span!(tasks::SYSTEM_SAMPLER).entered();
            let _ = self.sample_once();
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use test_fixtures::ScriptedSampleSource;

    use super::*;

    fn snapshot(cpu: f64) -> HostSnapshot {
        HostSnapshot {
            cpu_percent: cpu,
            memory_percent: 50.0,
            disk_read_bytes: 100,
            disk_written_bytes: 200,
            net_received_bytes: 300,
            net_transmitted_bytes: 400,
        }
    }

    fn gauge_value(registry: &MetricsRegistry, name: &str) -> f64 {
        registry.gauge(name, SYSTEM_GAUGE_HELP, &[]).unwrap().get()
    }

    #[test]
    fn successful_reading_sets_every_gauge() {
        let registry = MetricsRegistry::new();
        let source = ScriptedSampleSource::new().then_ok(snapshot(12.5));
        let mut sampler = SystemSampler::new(source, &registry).unwrap();

        sampler.sample_once().unwrap();

        assert_eq!(gauge_value(&registry, HostSnapshot::CPU_PERCENT), 12.5);
        assert_eq!(gauge_value(&registry, HostSnapshot::MEMORY_PERCENT), 50.0);
        assert_eq!(gauge_value(&registry, HostSnapshot::DISK_READ_BYTES), 100.0);
        assert_eq!(gauge_value(&registry, HostSnapshot::DISK_WRITTEN_BYTES), 200.0);
        assert_eq!(gauge_value(&registry, HostSnapshot::NET_RECEIVED_BYTES), 300.0);
        assert_eq!(gauge_value(&registry, HostSnapshot::NET_TRANSMITTED_BYTES), 400.0);
    }

    #[test]
    fn failed_reading_keeps_previous_values() {
        let registry = MetricsRegistry::new();
        let source = ScriptedSampleSource::new()
            .then_ok(snapshot(10.0))
            .then_unavailable("cpu counters")
            .then_ok(snapshot(30.0));
        let mut sampler = SystemSampler::new(source, &registry).unwrap();

        sampler.sample_once().unwrap();
        assert!(sampler.sample_once().is_err());
        assert_eq!(gauge_value(&registry, HostSnapshot::CPU_PERCENT), 10.0);

        // The loop carries on after a failure.
        sampler.sample_once().unwrap();
        assert_eq!(gauge_value(&registry, HostSnapshot::CPU_PERCENT), 30.0);
        assert_eq!(sampler.source().calls(), 3);
    }
}
