use std::time::Duration;

/// Body of one stress worker. Runs on its own OS thread, never on the
/// async runtime.
pub trait IStressWorker: Send + Sync + 'static {
    /// Keep one processing unit busy for `duration`, then return.
    fn run(&self, worker: usize, duration: Duration);
}
