use std::time::Duration;

use serde::{Serialize, de::DeserializeOwned};
use tracing::warn;

use crate::error::StorageError;
use crate::store::DocumentStore;

const JSON: &str = "application/json";

/// Attempts made by [`update_state`] before giving up on a contended key.
pub const MAX_UPDATE_ATTEMPTS: usize = 10;

/// Pause before retry number `attempt + 1`. Grows linearly so writers that
/// collided once spread out.
pub fn retry_delay(attempt: usize) -> Duration {
    Duration::from_millis(5 * attempt as u64)
}

/// Load a JSON document. Returns the deserialized value and its ETag.
pub async fn load_state<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    key: &str,
) -> Result<(T, String), StorageError> {
    let output = store.get(key).await?;
    let value: T = serde_json::from_slice(&output.body)?;
    Ok((value, output.etag))
}

/// Save a JSON document with ETag optimistic locking.
pub async fn save_state_if_match<T: Serialize>(
    store: &dyn DocumentStore,
    key: &str,
    value: &T,
    expected_etag: &str,
) -> Result<String, StorageError> {
    let body = serde_json::to_vec_pretty(value)?;
    store.put_if_match(key, body, Some(JSON), expected_etag).await
}

/// Save a JSON document that must not exist yet.
pub async fn create_state<T: Serialize>(
    store: &dyn DocumentStore,
    key: &str,
    value: &T,
) -> Result<String, StorageError> {
    let body = serde_json::to_vec_pretty(value)?;
    store.put_if_absent(key, body, Some(JSON)).await
}

/// Read-modify-write a JSON document under optimistic locking.
///
/// `apply` runs against a fresh copy on every attempt and must not have side
/// effects outside the value. An error from `apply` aborts without writing.
/// Returns `apply`'s result and the new ETag.
pub async fn update_state<T, R, E, F>(
    store: &dyn DocumentStore,
    key: &str,
    mut apply: F,
) -> Result<(R, String), E>
where
    T: Serialize + DeserializeOwned + Send,
    R: Send,
    E: From<StorageError>,
    F: FnMut(&mut T) -> Result<R, E> + Send,
{
    for attempt in 1..=MAX_UPDATE_ATTEMPTS {
        let (mut value, etag): (T, String) = load_state(store, key).await?;
        let result = apply(&mut value)?;
        match save_state_if_match(store, key, &value, &etag).await {
            Ok(new_etag) => return Ok((result, new_etag)),
            Err(StorageError::PreconditionFailed { .. }) => {
                warn!(key, attempt, "concurrent modification, retrying");
                tokio::time::sleep(retry_delay(attempt)).await;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(StorageError::Contended {
        key: key.to_string(),
        attempts: MAX_UPDATE_ATTEMPTS,
    }
    .into())
}
