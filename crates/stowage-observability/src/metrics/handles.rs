//! Counter and gauge handles. Each wraps one child of a `prometheus` vec,
//! so every clone updates the series the registry exposes.

use std::fmt;

use prometheus::IntCounter;

/// The two metric kinds the registry supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Counter,
    Gauge,
}

impl MetricKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Counter => "counter",
            Self::Gauge => "gauge",
        }
    }
}

/// Monotonically non-decreasing integer.
#[derive(Clone)]
pub struct Counter {
    inner: IntCounter,
}

impl Counter {
    pub(crate) fn new(inner: IntCounter) -> Self {
        Self { inner }
    }

    pub fn increment(&self) {
        self.inner.inc();
    }

    pub fn get(&self) -> u64 {
        self.inner.get()
    }
}

impl fmt::Debug for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Counter").field("value", &self.get()).finish()
    }
}

/// Arbitrary real value.
#[derive(Clone)]
pub struct Gauge {
    inner: prometheus::Gauge,
}

impl Gauge {
    pub(crate) fn new(inner: prometheus::Gauge) -> Self {
        Self { inner }
    }

    /// Last write wins.
    pub fn set(&self, value: f64) {
        self.inner.set(value);
    }

    pub fn get(&self) -> f64 {
        self.inner.get()
    }
}

impl fmt::Debug for Gauge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gauge").field("value", &self.get()).finish()
    }
}

/// Handle returned by [`MetricsRegistry::register`](super::MetricsRegistry::register).
#[derive(Debug, Clone)]
pub enum MetricHandle {
    Counter(Counter),
    Gauge(Gauge),
}

impl MetricHandle {
    pub fn kind(&self) -> MetricKind {
        match self {
            Self::Counter(_) => MetricKind::Counter,
            Self::Gauge(_) => MetricKind::Gauge,
        }
    }

    /// Current value as `f64`.
    pub fn value(&self) -> f64 {
        match self {
            Self::Counter(c) => c.get() as f64,
            Self::Gauge(g) => g.get(),
        }
    }
}
