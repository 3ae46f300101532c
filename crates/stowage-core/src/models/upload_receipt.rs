use serde::{Deserialize, Serialize};

/// Returned to the caller after a stored upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    /// Original filename as sent by the client.
    pub filename: String,
    /// Derived object key.
    pub key: String,
    /// `s3://<bucket>/<key>`.
    #[serde(rename = "url")]
    pub locator: String,
}

impl UploadReceipt {
    pub fn new(filename: &str, bucket: &str, key: &str) -> Self {
        Self {
            filename: filename.to_string(),
            key: key.to_string(),
            locator: format!("s3://{bucket}/{key}"),
        }
    }
}
