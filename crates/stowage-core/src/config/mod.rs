//! Configuration for every stowage subsystem.

pub mod defaults;
mod observability_config;
mod server_config;
mod store_config;
mod stowage_config;
mod stress_config;
mod telemetry_config;
mod upload_config;

pub use observability_config::ObservabilityConfig;
pub use server_config::ServerConfig;
pub use store_config::StoreConfig;
pub use stowage_config::{EnvLookup, StowageConfig};
pub use stress_config::StressConfig;
pub use telemetry_config::TelemetryConfig;
pub use upload_config::UploadConfig;
