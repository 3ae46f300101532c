//! # stowage-core
//!
//! Foundation crate for the stowage upload service.
//! Defines the shared models, traits, errors, and configuration.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::StowageConfig;
pub use errors::{StowageError, StowageResult};
pub use models::{CycleOutcome, InventorySummary, ObjectPage, UploadReceipt};
pub use traits::{IObjectStore, ISampleSource, IStressWorker};
