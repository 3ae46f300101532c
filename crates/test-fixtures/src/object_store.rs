use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use bytes::Bytes;

use stowage_core::errors::{StorageError, StorageResult};
use stowage_core::models::{ObjectPage, ObjectSummary};
use stowage_core::traits::IObjectStore;

type UploadHook = Box<dyn Fn() + Send + Sync>;

/// In-memory object store.
///
/// Listing pages are `page_size` objects long, ordered by key. Continuation
/// tokens are `page-<n>`, so a scan that fails on page `n` is easy to set up.
pub struct FakeObjectStore {
    objects: Mutex<BTreeMap<(String, String), Bytes>>,
    page_size: usize,
    fail_puts: AtomicBool,
    fail_list_on_page: Mutex<Option<usize>>,
    stuck_token: AtomicBool,
    upload_hook: Mutex<Option<UploadHook>>,
    put_calls: AtomicUsize,
    list_calls: AtomicUsize,
}

impl Default for FakeObjectStore {
    fn default() -> Self {
        Self::with_page_size(1000)
    }
}

impl FakeObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(page_size: usize) -> Self {
        assert!(page_size > 0, "page size must be positive");
        Self {
            objects: Mutex::new(BTreeMap::new()),
            page_size,
            fail_puts: AtomicBool::new(false),
            fail_list_on_page: Mutex::new(None),
            stuck_token: AtomicBool::new(false),
            upload_hook: Mutex::new(None),
            put_calls: AtomicUsize::new(0),
            list_calls: AtomicUsize::new(0),
        }
    }

    /// Put an object directly, bypassing counters and failure injection.
    pub fn seed(&self, bucket: &str, key: &str, body: impl Into<Bytes>) {
        self.lock_objects()
            .insert((bucket.to_string(), key.to_string()), body.into());
    }

    /// Make every `put_object` / `upload_file` fail.
    pub fn fail_puts(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::SeqCst);
    }

    /// Fail the listing request for page `page` (0-based).
    pub fn fail_list_on_page(&self, page: Option<usize>) {
        *lock(&self.fail_list_on_page) = page;
    }

    /// Return the requested token again instead of advancing.
    pub fn stick_continuation_token(&self, stuck: bool) {
        self.stuck_token.store(stuck, Ordering::SeqCst);
    }

    /// Run `hook` while `upload_file` is "in flight": after the local
    /// length is fixed, before the object is stored.
    pub fn on_upload(&self, hook: impl Fn() + Send + Sync + 'static) {
        *lock(&self.upload_hook) = Some(Box::new(hook));
    }

    pub fn object(&self, bucket: &str, key: &str) -> Option<Bytes> {
        self.lock_objects()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    pub fn keys(&self, bucket: &str) -> Vec<String> {
        self.lock_objects()
            .keys()
            .filter(|(b, _)| b == bucket)
            .map(|(_, k)| k.clone())
            .collect()
    }

    /// Calls to `put_object` and `upload_file`.
    pub fn put_calls(&self) -> usize {
        self.put_calls.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    fn lock_objects(&self) -> MutexGuard<'_, BTreeMap<(String, String), Bytes>> {
        lock(&self.objects)
    }

    fn store(&self, operation: &'static str, bucket: &str, key: &str, body: Bytes) -> StorageResult<()> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(StorageError::RequestFailed {
                operation,
                reason: "injected failure".to_string(),
            });
        }
        self.lock_objects()
            .insert((bucket.to_string(), key.to_string()), body);
        Ok(())
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

fn page_index(token: Option<&str>) -> StorageResult<usize> {
    match token {
        None => Ok(0),
        Some(t) => t
            .strip_prefix("page-")
            .and_then(|n| n.parse().ok())
            .ok_or_else(|| StorageError::RequestFailed {
                operation: "list_objects_v2",
                reason: format!("unknown continuation token {t:?}"),
            }),
    }
}

impl IObjectStore for FakeObjectStore {
    async fn put_object(&self, bucket: &str, key: &str, body: Bytes) -> StorageResult<()> {
        self.store("put_object", bucket, key, body)
    }

    async fn list_objects(
        &self,
        bucket: &str,
        continuation: Option<&str>,
    ) -> StorageResult<ObjectPage> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let page = page_index(continuation)?;
        if *lock(&self.fail_list_on_page) == Some(page) {
            return Err(StorageError::RequestFailed {
                operation: "list_objects_v2",
                reason: format!("injected failure on page {page}"),
            });
        }

        let all: Vec<ObjectSummary> = self
            .lock_objects()
            .iter()
            .filter(|((b, _), _)| b == bucket)
            .map(|((_, key), body)| ObjectSummary {
                key: key.clone(),
                size: body.len() as u64,
            })
            .collect();
        let start = page * self.page_size;
        let objects: Vec<ObjectSummary> =
            all.iter().skip(start).take(self.page_size).cloned().collect();
        let more = start + self.page_size < all.len();

        let next_token = if self.stuck_token.load(Ordering::SeqCst) {
            Some(continuation.unwrap_or("page-1").to_string())
        } else if more {
            Some(format!("page-{}", page + 1))
        } else {
            None
        };
        Ok(ObjectPage {
            objects,
            next_token,
        })
    }

    async fn upload_file(&self, bucket: &str, key: &str, path: &Path, len: u64) -> StorageResult<()> {
        let mut body = std::fs::read(path).map_err(|e| StorageError::LocalIo {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        if (body.len() as u64) < len {
            return Err(StorageError::LocalIo {
                path: path.display().to_string(),
                reason: format!("file shorter than {len} bytes"),
            });
        }
        body.truncate(len as usize);

        if let Some(hook) = lock(&self.upload_hook).as_ref() {
            hook();
        }
        self.store("put_object", bucket, key, Bytes::from(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn pages_follow_tokens_until_exhausted() {
        let store = FakeObjectStore::with_page_size(2);
        for key in ["a", "b", "c"] {
            store.seed("bkt", key, "xy");
        }
        let first = store.list_objects("bkt", None).await.unwrap();
        assert_eq!(first.objects.len(), 2);
        assert_eq!(first.next_token.as_deref(), Some("page-1"));
        let second = store.list_objects("bkt", first.next_token.as_deref()).await.unwrap();
        assert_eq!(second.objects.len(), 1);
        assert!(second.is_last());
        assert_eq!(store.list_calls(), 2);
    }

    #[tokio::test]
    async fn upload_file_stores_only_the_requested_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("buf.log");
        std::fs::write(&path, b"0123456789").unwrap();

        let store = FakeObjectStore::new();
        store.upload_file("bkt", "k", &path, 4).await.unwrap();
        assert_eq!(store.object("bkt", "k").unwrap(), Bytes::from_static(b"0123"));
    }
}
