use async_trait::async_trait;

use crate::error::StorageError;

/// A stored document with its version tag.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub body: Vec<u8>,
    pub etag: String,
    pub content_type: Option<String>,
}

/// Key/value document storage with conditional writes.
///
/// Every write returns the new ETag. Conditional writes fail with
/// [`StorageError::PreconditionFailed`] when the stored version does not
/// match, which is what the read-modify-write loops in [`crate::state`] rely
/// on.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<StoredObject, StorageError>;

    async fn put(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<String, StorageError>;

    /// Write only if the stored ETag still equals `expected_etag`.
    async fn put_if_match(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: Option<&str>,
        expected_etag: &str,
    ) -> Result<String, StorageError>;

    /// Write only if nothing is stored under `key` yet.
    async fn put_if_absent(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<String, StorageError>;

    /// Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Keys under `prefix`, in ascending lexicographic order.
    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError>;

    /// Delete everything under `prefix`. Returns the number of objects
    /// deleted.
    async fn delete_prefix(&self, prefix: &str) -> Result<usize, StorageError> {
        let keys = self.list(prefix).await?;
        for key in &keys {
            self.delete(key).await?;
        }
        Ok(keys.len())
    }
}
