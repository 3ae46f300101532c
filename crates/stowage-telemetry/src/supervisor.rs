use std::future::Future;

use tokio::task::JoinHandle;

use stowage_observability::tracing_setup::events;

/// Owns the join handles of every background loop.
#[derive(Debug, Default)]
pub struct BackgroundTasks {
    handles: Vec<(&'static str, JoinHandle<()>)>,
}

impl BackgroundTasks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn<F>(&mut self, name: &'static str, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.handles.push((name, tokio::spawn(task)));
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.handles.iter().map(|(name, _)| *name).collect()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Abort every task, then wait for each to finish unwinding.
    pub async fn shutdown(self) {
        for (_, handle) in &self.handles {
            handle.abort();
        }
        for (name, handle) in self.handles {
            let cancelled = match handle.await {
                Ok(()) => false,
                Err(e) => e.is_cancelled(),
            };
            events::task_stopped(name, cancelled);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn shutdown_stops_every_loop() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let mut tasks = BackgroundTasks::new();
        for name in ["a", "b"] {
            let ticks = ticks.clone();
            tasks.spawn(name, async move {
                loop {
                    ticks.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(5)).await;
                }
            });
        }
        assert_eq!(tasks.names(), vec!["a", "b"]);

        tokio::time::sleep(Duration::from_millis(30)).await;
        tasks.shutdown().await;

        let stopped_at = ticks.load(Ordering::SeqCst);
        assert!(stopped_at >= 2);
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), stopped_at);
    }

    #[tokio::test]
    async fn finished_tasks_are_joined_too() {
        let mut tasks = BackgroundTasks::new();
        tasks.spawn("done", async {});
        tokio::task::yield_now().await;
        assert_eq!(tasks.len(), 1);
        tasks.shutdown().await;
    }
}
