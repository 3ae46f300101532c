// Single source of truth for all default values.

// --- Store ---
pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_FORCE_PATH_STYLE: bool = true;

// --- Server ---
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024; // 100 MiB

// --- Upload ---
pub const DEFAULT_UPLOAD_KEY_PREFIX: &str = "";

// --- Telemetry ---
pub const DEFAULT_SYSTEM_INTERVAL_SECS: u64 = 5;
pub const DEFAULT_INVENTORY_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_SHIP_INTERVAL_SECS: u64 = 5;
pub const DEFAULT_LOG_BUFFER_PATH: &str = "app.log";
pub const DEFAULT_LOG_KEY_PREFIX: &str = "logs/";

// --- Stress ---
pub const DEFAULT_STRESS_DURATION_SECS: u64 = 30;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_STDOUT: bool = false;
