//! S3 client for uploads, inventory listing, and log shipment.

use std::path::Path;

use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region, SharedCredentialsProvider};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::{ByteStream, Length};
use aws_sdk_s3::Client;
use bytes::Bytes;

use stowage_core::config::StoreConfig;
use stowage_core::errors::{StorageError, StorageResult};
use stowage_core::models::{ObjectPage, ObjectSummary};
use stowage_core::traits::IObjectStore;

const STATIC_PROVIDER_NAME: &str = "stowage-static";
const LOG_CONTENT_TYPE: &str = "application/x-ndjson";

/// `IObjectStore` backed by `aws-sdk-s3`.
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: Client,
}

impl S3ObjectStore {
    /// Build a client from config. Static credentials are used when both
    /// halves are configured; otherwise the default AWS provider chain
    /// (environment, profile, IMDS) is loaded.
    pub async fn from_config(config: &StoreConfig) -> Self {
        if let Some((access_key_id, secret)) = config.static_credentials() {
            return Self::with_static_credentials(config, access_key_id, secret);
        }

        let shared = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await;
        let mut builder =
            aws_sdk_s3::config::Builder::from(&shared).force_path_style(config.force_path_style);
        if let Some(endpoint) = &config.endpoint_url {
            builder = builder.endpoint_url(endpoint);
        }
        tracing::info!(
            region = %config.region,
            endpoint = ?config.endpoint_url,
            "s3: using default credential chain"
        );
        Self::from_client(Client::from_conf(builder.build()))
    }

    /// Build a client with fixed credentials. Does not touch the network.
    pub fn with_static_credentials(config: &StoreConfig, access_key_id: &str, secret: &str) -> Self {
        let credentials = Credentials::new(access_key_id, secret, None, None, STATIC_PROVIDER_NAME);
        let mut builder = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .credentials_provider(SharedCredentialsProvider::new(credentials))
            .region(Region::new(config.region.clone()))
            .force_path_style(config.force_path_style);
        if let Some(endpoint) = &config.endpoint_url {
            builder = builder.endpoint_url(endpoint);
        }
        tracing::info!(
            region = %config.region,
            endpoint = ?config.endpoint_url,
            "s3: using static credentials"
        );
        Self::from_client(Client::from_conf(builder.build()))
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

fn request_failed<E>(operation: &'static str, err: E) -> StorageError
where
    E: std::error::Error,
{
    StorageError::RequestFailed {
        operation,
        reason: DisplayErrorContext(err).to_string(),
    }
}

impl IObjectStore for S3ObjectStore {
    async fn put_object(&self, bucket: &str, key: &str, body: Bytes) -> StorageResult<()> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| request_failed("put_object", e))?;
        Ok(())
    }

    async fn list_objects(
        &self,
        bucket: &str,
        continuation: Option<&str>,
    ) -> StorageResult<ObjectPage> {
        let resp = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .set_continuation_token(continuation.map(str::to_string))
            .send()
            .await
            .map_err(|e| request_failed("list_objects_v2", e))?;

        let objects = resp
            .contents()
            .iter()
            .map(|o| ObjectSummary {
                key: o.key().unwrap_or_default().to_string(),
                size: o.size().unwrap_or(0).max(0) as u64,
            })
            .collect();
        let next_token = if resp.is_truncated().unwrap_or(false) {
            resp.next_continuation_token().map(str::to_string)
        } else {
            None
        };
        Ok(ObjectPage {
            objects,
            next_token,
        })
    }

    async fn upload_file(&self, bucket: &str, key: &str, path: &Path, len: u64) -> StorageResult<()> {
        // Bounded read: bytes appended after `len` was observed stay local.
        let body = ByteStream::read_from()
            .path(path)
            .length(Length::Exact(len))
            .build()
            .await
            .map_err(|e| StorageError::LocalIo {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_length(len as i64)
            .content_type(LOG_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e| request_failed("put_object", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_config() -> StoreConfig {
        StoreConfig {
            access_key_id: Some("test".into()),
            secret_access_key: Some("test".into()),
            endpoint_url: Some("http://127.0.0.1:4566".into()),
            bucket: Some("uploads".into()),
            ..StoreConfig::default()
        }
    }

    #[test]
    fn static_credentials_build_without_network() {
        let config = local_config();
        let store = S3ObjectStore::with_static_credentials(&config, "test", "test");
        let conf = store.client.config();
        assert_eq!(conf.region().map(|r| r.as_ref()), Some("us-east-1"));
    }

    #[tokio::test]
    async fn upload_of_missing_local_file_is_a_local_error() {
        let store = S3ObjectStore::with_static_credentials(&local_config(), "test", "test");
        let err = store
            .upload_file("uploads", "logs/x.log", Path::new("/nonexistent/app.log"), 10)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::LocalIo { .. }));
    }
}
