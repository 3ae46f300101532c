//! # stowage-server
//!
//! Axum router and request handlers. The binary in `main.rs` wires these to
//! the S3 store, the metric registry and the background loops.

pub mod error;
pub mod routes;
pub mod state;
pub mod stress;
pub mod upload;

pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
pub use stress::{BusyLoopWorker, StressSpawner};
pub use upload::{KeyRule, UploadService};
