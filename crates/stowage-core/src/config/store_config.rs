use serde::{Deserialize, Serialize};

use super::defaults;

/// Remote object-store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Static access key id. When absent (with the secret) the default
    /// AWS credential chain is used.
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub region: String,
    /// Custom endpoint, e.g. a LocalStack or MinIO URL.
    pub endpoint_url: Option<String>,
    /// Destination bucket. Uploads fail with `Misconfigured` when unset.
    pub bucket: Option<String>,
    /// Path-style addressing, required by most S3-compatible endpoints.
    pub force_path_style: bool,
}

impl StoreConfig {
    /// The configured bucket, treating an empty name as unset.
    pub fn bucket(&self) -> Option<&str> {
        self.bucket.as_deref().filter(|b| !b.trim().is_empty())
    }

    /// Static credentials, only when both halves are present.
    pub fn static_credentials(&self) -> Option<(&str, &str)> {
        match (&self.access_key_id, &self.secret_access_key) {
            (Some(id), Some(secret)) if !id.is_empty() && !secret.is_empty() => {
                Some((id.as_str(), secret.as_str()))
            }
            _ => None,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            access_key_id: None,
            secret_access_key: None,
            region: defaults::DEFAULT_REGION.to_string(),
            endpoint_url: None,
            bucket: None,
            force_path_style: defaults::DEFAULT_FORCE_PATH_STYLE,
        }
    }
}
