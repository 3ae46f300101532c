//! CPU stress jobs.

use std::hint::black_box;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use uuid::Uuid;

use stowage_core::config::StressConfig;
use stowage_core::errors::MetricsError;
use stowage_core::models::StressLaunch;
use stowage_core::traits::IStressWorker;
use stowage_observability::metrics::names;
use stowage_observability::tracing_setup::events;
use stowage_observability::{Counter, MetricsRegistry};

/// Spins on integer arithmetic until the duration elapses.
#[derive(Debug, Clone, Copy, Default)]
pub struct BusyLoopWorker;

impl IStressWorker for BusyLoopWorker {
    fn run(&self, _worker: usize, duration: Duration) {
        let deadline = Instant::now() + duration;
        let mut acc: u64 = 0;
        while Instant::now() < deadline {
            for i in 0..10_000u64 {
                acc = acc.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(i);
            }
            black_box(acc);
        }
    }
}

/// Launches one detached OS thread per worker. Jobs cannot be cancelled.
pub struct StressSpawner<W> {
    worker: Arc<W>,
    workers: Option<usize>,
    duration: Duration,
    launches: Counter,
}

impl<W: IStressWorker> StressSpawner<W> {
    pub fn new(
        worker: W,
        config: &StressConfig,
        registry: &MetricsRegistry,
    ) -> Result<Self, MetricsError> {
        Ok(Self {
            worker: Arc::new(worker),
            workers: config.workers,
            duration: config.duration(),
            launches: registry.counter(
                names::STRESS_JOBS_STARTED_TOTAL,
                names::STRESS_JOBS_STARTED_HELP,
                &[],
            )?,
        })
    }

    /// Configured worker count, else the available parallelism.
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1)
        })
    }

    /// Start a job and return without waiting for it.
    pub fn launch(&self) -> StressLaunch {
        let job_id = Uuid::new_v4();
        let job = job_id.to_string();
        let mut started = 0;
        for index in 0..self.worker_count() {
            let worker = Arc::clone(&self.worker);
            let duration = self.duration;
            let spawned = thread::Builder::new()
                .name(format!("stress-{index}"))
                .spawn(move || worker.run(index, duration));
            match spawned {
                Ok(_detached) => started += 1,
                Err(e) => events::stress_worker_failed(&job, index, &e),
            }
        }

        self.launches.increment();
        events::stress_launched(&job, started, self.duration.as_secs());
        StressLaunch {
            job_id,
            workers: started,
            duration: self.duration,
        }
    }
}
