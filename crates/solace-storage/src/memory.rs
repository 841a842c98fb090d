use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::error::StorageError;
use crate::store::{DocumentStore, StoredObject};

struct Entry {
    body: Vec<u8>,
    content_type: Option<String>,
    version: u64,
}

#[derive(Default)]
struct Inner {
    objects: BTreeMap<String, Entry>,
    next_version: u64,
}

impl Inner {
    fn write(&mut self, key: &str, body: Vec<u8>, content_type: Option<&str>) -> String {
        self.next_version += 1;
        let version = self.next_version;
        self.objects.insert(
            key.to_string(),
            Entry {
                body,
                content_type: content_type.map(str::to_string),
                version,
            },
        );
        etag(version)
    }
}

fn etag(version: u64) -> String {
    format!("\"v{version}\"")
}

/// In-process document store.
///
/// Versions come from a single store-wide counter, so an ETag is never
/// reused for a key even after delete and re-create.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.lock().objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // No invariant spans a panic inside the critical sections below.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<StoredObject, StorageError> {
        let inner = self.lock();
        let entry = inner.objects.get(key).ok_or_else(|| StorageError::NotFound {
            key: key.to_string(),
        })?;
        Ok(StoredObject {
            body: entry.body.clone(),
            etag: etag(entry.version),
            content_type: entry.content_type.clone(),
        })
    }

    async fn put(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<String, StorageError> {
        Ok(self.lock().write(key, body, content_type))
    }

    async fn put_if_match(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: Option<&str>,
        expected_etag: &str,
    ) -> Result<String, StorageError> {
        let mut inner = self.lock();
        let matches = inner
            .objects
            .get(key)
            .is_some_and(|entry| etag(entry.version) == expected_etag);
        if !matches {
            return Err(StorageError::PreconditionFailed {
                key: key.to_string(),
            });
        }
        Ok(inner.write(key, body, content_type))
    }

    async fn put_if_absent(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<String, StorageError> {
        let mut inner = self.lock();
        if inner.objects.contains_key(key) {
            return Err(StorageError::AlreadyExists {
                key: key.to_string(),
            });
        }
        Ok(inner.write(key, body, content_type))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.lock().objects.remove(key);
        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        Ok(self
            .lock()
            .objects
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key.clone())
            .collect())
    }

    async fn delete_prefix(&self, prefix: &str) -> Result<usize, StorageError> {
        let mut inner = self.lock();
        let before = inner.objects.len();
        inner.objects.retain(|key, _| !key.starts_with(prefix));
        Ok(before - inner.objects.len())
    }
}
