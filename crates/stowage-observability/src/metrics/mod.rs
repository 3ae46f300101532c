//! Process-wide metric registry.
//!
//! [`MetricsRegistry`] owns every counter and gauge. Components register the
//! series they produce at construction time and keep the returned handles;
//! registration is idempotent, so a component can be rebuilt without
//! leaking duplicate series.

mod handles;
mod key;
pub mod names;
mod outcome;
mod registry;

pub use handles::{Counter, Gauge, MetricHandle, MetricKind};
pub use key::MetricKey;
pub use outcome::OutcomeCounters;
pub use registry::MetricsRegistry;
