use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::ProvideErrorMetadata;
use aws_sdk_s3::types::{Delete, ObjectIdentifier};
use aws_smithy_types::byte_stream::ByteStream;
use tracing::{debug, info};

use crate::error::StorageError;
use crate::store::{DocumentStore, StoredObject};

/// DeleteObjects accepts at most this many keys per request.
const DELETE_BATCH: usize = 1000;

/// S3-backed document store scoped to one bucket.
#[derive(Clone)]
pub struct S3Store {
    client: Client,
    bucket: String,
}

impl S3Store {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Build a client from the default AWS config chain.
    pub async fn connect(bucket: impl Into<String>) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let store = Self::new(Client::new(&config), bucket);
        info!(bucket = %store.bucket, "connected S3 document store");
        store
    }

    async fn put_with(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: Option<&str>,
        if_match: Option<&str>,
        if_none_match: bool,
    ) -> Result<String, StorageError> {
        let mut req = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body));

        if let Some(ct) = content_type {
            req = req.content_type(ct);
        }
        if let Some(etag) = if_match {
            req = req.if_match(etag);
        }
        if if_none_match {
            req = req.if_none_match("*");
        }

        let resp = req.send().await.map_err(|e| {
            let err = e.into_service_error();
            // 412 on a failed If-Match / If-None-Match, 409 when a concurrent
            // conditional write won the race.
            match err.code() {
                Some("PreconditionFailed") if if_none_match => StorageError::AlreadyExists {
                    key: key.to_string(),
                },
                Some("PreconditionFailed") | Some("ConditionalRequestConflict") => {
                    StorageError::PreconditionFailed {
                        key: key.to_string(),
                    }
                }
                _ => StorageError::PutObject(err.to_string()),
            }
        })?;

        Ok(resp.e_tag().unwrap_or_default().to_string())
    }
}

#[async_trait]
impl DocumentStore for S3Store {
    async fn get(&self, key: &str) -> Result<StoredObject, StorageError> {
        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let err = e.into_service_error();
                if err.is_no_such_key() {
                    StorageError::NotFound {
                        key: key.to_string(),
                    }
                } else {
                    StorageError::GetObject(err.to_string())
                }
            })?;

        let etag = resp.e_tag().unwrap_or_default().to_string();
        let content_type = resp.content_type().map(|s| s.to_string());
        let body = resp
            .body
            .collect()
            .await
            .map_err(|e| StorageError::GetObject(e.to_string()))?
            .into_bytes()
            .to_vec();

        Ok(StoredObject {
            body,
            etag,
            content_type,
        })
    }

    async fn put(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<String, StorageError> {
        self.put_with(key, body, content_type, None, false).await
    }

    async fn put_if_match(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: Option<&str>,
        expected_etag: &str,
    ) -> Result<String, StorageError> {
        self.put_with(key, body, content_type, Some(expected_etag), false)
            .await
    }

    async fn put_if_absent(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<String, StorageError> {
        self.put_with(key, body, content_type, None, true).await
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::DeleteObject(e.into_service_error().to_string()))?;

        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let mut keys = Vec::new();
        let mut continuation_token: Option<String> = None;

        loop {
            let mut req = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(prefix);

            if let Some(token) = &continuation_token {
                req = req.continuation_token(token);
            }

            let resp = req
                .send()
                .await
                .map_err(|e| StorageError::ListObjects(e.into_service_error().to_string()))?;

            for obj in resp.contents() {
                if let Some(key) = obj.key() {
                    keys.push(key.to_string());
                }
            }

            if resp.is_truncated() == Some(true) {
                continuation_token = resp.next_continuation_token().map(|s| s.to_string());
            } else {
                break;
            }
        }

        Ok(keys)
    }

    /// Batch delete via DeleteObjects, up to 1000 keys per request.
    async fn delete_prefix(&self, prefix: &str) -> Result<usize, StorageError> {
        let keys = self.list(prefix).await?;

        for chunk in keys.chunks(DELETE_BATCH) {
            let objects = chunk
                .iter()
                .map(|key| ObjectIdentifier::builder().key(key).build())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| StorageError::DeleteObject(e.to_string()))?;
            let delete = Delete::builder()
                .set_objects(Some(objects))
                .quiet(true)
                .build()
                .map_err(|e| StorageError::DeleteObject(e.to_string()))?;

            let resp = self
                .client
                .delete_objects()
                .bucket(&self.bucket)
                .delete(delete)
                .send()
                .await
                .map_err(|e| StorageError::DeleteObject(e.into_service_error().to_string()))?;

            if let Some(failed) = resp.errors().first() {
                return Err(StorageError::DeleteObject(format!(
                    "{}: {}",
                    failed.key().unwrap_or_default(),
                    failed.message().unwrap_or_default()
                )));
            }
            debug!(prefix, count = chunk.len(), "deleted object batch");
        }

        Ok(keys.len())
    }
}
