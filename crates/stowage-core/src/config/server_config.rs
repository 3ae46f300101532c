use serde::{Deserialize, Serialize};

use super::defaults;

/// HTTP listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to bind, e.g. "0.0.0.0:8000".
    pub bind_addr: String,
    /// Request body limit for `/upload`.
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: defaults::DEFAULT_BIND_ADDR.to_string(),
            max_upload_bytes: defaults::DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}
