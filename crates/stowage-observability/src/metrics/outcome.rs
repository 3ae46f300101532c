use stowage_core::errors::MetricsError;

use super::names::OUTCOME_LABEL;
use super::{Counter, MetricsRegistry};

/// A counter family split by `outcome="success"|"failure"`.
#[derive(Debug, Clone)]
pub struct OutcomeCounters {
    success: Counter,
    failure: Counter,
}

impl OutcomeCounters {
    pub fn register(
        registry: &MetricsRegistry,
        name: &str,
        help: &str,
    ) -> Result<Self, MetricsError> {
        Ok(Self {
            success: registry.counter(name, help, &[(OUTCOME_LABEL, "success")])?,
            failure: registry.counter(name, help, &[(OUTCOME_LABEL, "failure")])?,
        })
    }

    pub fn record_success(&self) {
        self.success.increment();
    }

    pub fn record_failure(&self) {
        self.failure.increment();
    }

    pub fn successes(&self) -> u64 {
        self.success.get()
    }

    pub fn failures(&self) -> u64 {
        self.failure.get()
    }
}
