use std::fmt;

use dashmap::DashMap;
use prometheus::core::Collector;
use prometheus::{GaugeVec, IntCounterVec, Opts, Registry, TextEncoder};

use stowage_core::errors::MetricsError;

use super::{Counter, Gauge, MetricHandle, MetricKey, MetricKind};

/// The `prometheus` vec behind one metric name.
#[derive(Clone)]
enum FamilyVec {
    Counter(IntCounterVec),
    Gauge(GaugeVec),
}

/// Kind, label names and collector shared by every series of one name.
#[derive(Clone)]
struct Family {
    kind: MetricKind,
    labels: Vec<String>,
    vec: FamilyVec,
}

impl Family {
    /// Build the vec for `key`'s label names and register it on `registry`.
    fn create(
        registry: &Registry,
        help: &str,
        kind: MetricKind,
        key: &MetricKey,
    ) -> Result<Self, MetricsError> {
        let name = key.name();
        let labels: Vec<String> = key.labels().iter().map(|(l, _)| l.clone()).collect();
        let label_names: Vec<&str> = labels.iter().map(String::as_str).collect();
        let opts = Opts::new(name, help);

        let (vec, collector): (FamilyVec, Box<dyn Collector>) = match kind {
            MetricKind::Counter => {
                let v = IntCounterVec::new(opts, &label_names)
                    .map_err(|e| collector_error(name, e))?;
                (FamilyVec::Counter(v.clone()), Box::new(v))
            }
            MetricKind::Gauge => {
                let v = GaugeVec::new(opts, &label_names).map_err(|e| collector_error(name, e))?;
                (FamilyVec::Gauge(v.clone()), Box::new(v))
            }
        };
        registry
            .register(collector)
            .map_err(|e| collector_error(name, e))?;

        Ok(Self { kind, labels, vec })
    }

    fn child(&self, key: &MetricKey) -> Result<MetricHandle, MetricsError> {
        let values: Vec<&str> = key.labels().iter().map(|(_, v)| v.as_str()).collect();
        let handle = match &self.vec {
            FamilyVec::Counter(v) => v
                .get_metric_with_label_values(&values)
                .map(|c| MetricHandle::Counter(Counter::new(c))),
            FamilyVec::Gauge(v) => v
                .get_metric_with_label_values(&values)
                .map(|g| MetricHandle::Gauge(Gauge::new(g))),
        };
        handle.map_err(|e| collector_error(key.name(), e))
    }
}

fn collector_error(name: &str, err: prometheus::Error) -> MetricsError {
    MetricsError::Collector {
        name: name.to_string(),
        reason: err.to_string(),
    }
}

/// Owns all metric state. Construct one per process and share it by `Arc`.
pub struct MetricsRegistry {
    collectors: Registry,
    families: DashMap<String, Family>,
    series: DashMap<MetricKey, MetricHandle>,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self {
            collectors: Registry::new(),
            families: DashMap::new(),
            series: DashMap::new(),
        }
    }

    /// Register a series, or return the existing handle for the same
    /// `(name, labels)`. Fails if `name` is already registered under the
    /// other kind or with other label names.
    pub fn register(
        &self,
        name: &str,
        help: &str,
        kind: MetricKind,
        labels: &[(&str, &str)],
    ) -> Result<MetricHandle, MetricsError> {
        let key = MetricKey::new(name, labels)?;

        // The family entry stays locked until the series is cached, so two
        // racing registrations of a new name cannot both reach the collector.
        let family = self
            .families
            .entry(name.to_string())
            .or_try_insert_with(|| Family::create(&self.collectors, help, kind, &key))?;
        if family.kind != kind {
            return Err(MetricsError::KindMismatch {
                name: name.to_string(),
                registered: family.kind.as_str(),
                requested: kind.as_str(),
            });
        }
        if !family
            .labels
            .iter()
            .map(String::as_str)
            .eq(key.labels().iter().map(|(l, _)| l.as_str()))
        {
            return Err(MetricsError::LabelMismatch {
                name: name.to_string(),
                registered: family.labels.clone(),
            });
        }

        if let Some(existing) = self.series.get(&key) {
            return Ok(existing.value().clone());
        }
        let handle = family.child(&key)?;
        Ok(self.series.entry(key).or_insert(handle).value().clone())
    }

    pub fn counter(
        &self,
        name: &str,
        help: &str,
        labels: &[(&str, &str)],
    ) -> Result<Counter, MetricsError> {
        match self.register(name, help, MetricKind::Counter, labels)? {
            MetricHandle::Counter(c) => Ok(c),
            MetricHandle::Gauge(_) => Err(MetricsError::KindMismatch {
                name: name.to_string(),
                registered: MetricKind::Gauge.as_str(),
                requested: MetricKind::Counter.as_str(),
            }),
        }
    }

    pub fn gauge(
        &self,
        name: &str,
        help: &str,
        labels: &[(&str, &str)],
    ) -> Result<Gauge, MetricsError> {
        match self.register(name, help, MetricKind::Gauge, labels)? {
            MetricHandle::Gauge(g) => Ok(g),
            MetricHandle::Counter(_) => Err(MetricsError::KindMismatch {
                name: name.to_string(),
                registered: MetricKind::Counter.as_str(),
                requested: MetricKind::Gauge.as_str(),
            }),
        }
    }

    /// Number of registered series.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Prometheus text exposition of every series. The collector gathers
    /// families sorted by name and series sorted by label values, so equal
    /// state renders to equal bytes.
    pub fn snapshot(&self) -> Result<String, MetricsError> {
        let families = self.collectors.gather();
        let mut buffer = String::new();
        TextEncoder::new()
            .encode_utf8(&families, &mut buffer)
            .map_err(|e| MetricsError::Encode {
                reason: e.to_string(),
            })?;
        Ok(buffer)
    }
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MetricsRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetricsRegistry")
            .field("families", &self.families.len())
            .field("series", &self.series.len())
            .finish()
    }
}
