use std::sync::Arc;

use stowage_observability::MetricsRegistry;

use crate::stress::StressSpawner;
use crate::upload::UploadService;

/// Shared handler state. Cloning is cheap.
pub struct AppState<S, W> {
    pub uploads: Arc<UploadService<S>>,
    pub stress: Arc<StressSpawner<W>>,
    pub registry: Arc<MetricsRegistry>,
}

impl<S, W> AppState<S, W> {
    pub fn new(
        uploads: UploadService<S>,
        stress: StressSpawner<W>,
        registry: Arc<MetricsRegistry>,
    ) -> Self {
        Self {
            uploads: Arc::new(uploads),
            stress: Arc::new(stress),
            registry,
        }
    }
}

impl<S, W> Clone for AppState<S, W> {
    fn clone(&self) -> Self {
        Self {
            uploads: Arc::clone(&self.uploads),
            stress: Arc::clone(&self.stress),
            registry: Arc::clone(&self.registry),
        }
    }
}
