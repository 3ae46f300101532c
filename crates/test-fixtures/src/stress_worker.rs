use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

use stowage_core::traits::IStressWorker;

#[derive(Debug, Default)]
struct Runs {
    seen: Mutex<Vec<(usize, Duration)>>,
    changed: Condvar,
}

/// Records `(worker index, duration)` for every run and returns at once.
/// Clones share the record.
#[derive(Debug, Clone, Default)]
pub struct RecordingWorker {
    runs: Arc<Runs>,
}

impl RecordingWorker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block until at least `count` runs were recorded or `timeout` passes,
    /// then return the runs sorted by worker index.
    pub fn wait_for(&self, count: usize, timeout: Duration) -> Vec<(usize, Duration)> {
        let deadline = Instant::now() + timeout;
        let mut seen = self.runs.seen.lock().unwrap_or_else(|e| e.into_inner());
        while seen.len() < count {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            seen = self
                .runs
                .changed
                .wait_timeout(seen, deadline - now)
                .unwrap_or_else(|e| e.into_inner())
                .0;
        }
        let mut runs = seen.clone();
        runs.sort_by_key(|(worker, _)| *worker);
        runs
    }
}

impl IStressWorker for RecordingWorker {
    fn run(&self, worker: usize, duration: Duration) {
        let mut seen = self.runs.seen.lock().unwrap_or_else(|e| e.into_inner());
        seen.push((worker, duration));
        self.runs.changed.notify_all();
    }
}
