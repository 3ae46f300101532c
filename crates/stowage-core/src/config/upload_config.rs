use serde::{Deserialize, Serialize};

use super::defaults;

/// Upload key derivation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Prepended verbatim to the uploaded filename to form the object key.
    pub key_prefix: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            key_prefix: defaults::DEFAULT_UPLOAD_KEY_PREFIX.to_string(),
        }
    }
}
