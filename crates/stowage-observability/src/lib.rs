//! # stowage-observability
//!
//! Process-wide metric registry with a Prometheus text snapshot, structured
//! tracing setup and event helpers, and the local log buffer that the
//! tracing layer appends to and the shipper drains.

pub mod log_buffer;
pub mod metrics;
pub mod tracing_setup;

pub use log_buffer::LogBuffer;
pub use metrics::{Counter, Gauge, MetricHandle, MetricKind, MetricsRegistry, OutcomeCounters};
