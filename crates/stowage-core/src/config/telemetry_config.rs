use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Background loop intervals and the local log buffer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub system_interval_secs: u64,
    pub inventory_interval_secs: u64,
    pub ship_interval_secs: u64,
    /// Local append-only log buffer drained by the shipper.
    pub log_buffer_path: PathBuf,
    /// Remote namespace for shipped log objects.
    pub log_key_prefix: String,
}

impl TelemetryConfig {
    pub fn system_interval(&self) -> Duration {
        Duration::from_secs(self.system_interval_secs)
    }

    pub fn inventory_interval(&self) -> Duration {
        Duration::from_secs(self.inventory_interval_secs)
    }

    pub fn ship_interval(&self) -> Duration {
        Duration::from_secs(self.ship_interval_secs)
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            system_interval_secs: defaults::DEFAULT_SYSTEM_INTERVAL_SECS,
            inventory_interval_secs: defaults::DEFAULT_INVENTORY_INTERVAL_SECS,
            ship_interval_secs: defaults::DEFAULT_SHIP_INTERVAL_SECS,
            log_buffer_path: PathBuf::from(defaults::DEFAULT_LOG_BUFFER_PATH),
            log_key_prefix: defaults::DEFAULT_LOG_KEY_PREFIX.to_string(),
        }
    }
}
