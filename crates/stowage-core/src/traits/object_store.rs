use std::future::Future;
use std::path::Path;

use bytes::Bytes;

use crate::errors::StorageResult;
use crate::models::ObjectPage;

/// Remote object store.
///
/// Futures are `Send` so callers can drive them from spawned tasks.
pub trait IObjectStore: Send + Sync {
    /// Store `body` under `key`, overwriting any existing object.
    fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
    ) -> impl Future<Output = StorageResult<()>> + Send;

    /// Fetch one page of the bucket listing. `continuation` is the
    /// `next_token` of the previous page, `None` for the first page.
    fn list_objects(
        &self,
        bucket: &str,
        continuation: Option<&str>,
    ) -> impl Future<Output = StorageResult<ObjectPage>> + Send;

    /// Upload exactly the first `len` bytes of the local file at `path`.
    fn upload_file(
        &self,
        bucket: &str,
        key: &str,
        path: &Path,
        len: u64,
    ) -> impl Future<Output = StorageResult<()>> + Send;
}
