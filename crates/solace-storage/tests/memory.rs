use serde::{Deserialize, Serialize};

use solace_storage::error::StorageError;
use solace_storage::state::{create_state, load_state, save_state_if_match, update_state};
use solace_storage::{DocumentStore, MemoryStore};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Counter {
    value: u32,
}

#[tokio::test]
async fn get_missing_key_is_not_found() {
    let store = MemoryStore::new();
    let err = store.get("missing.json").await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound { key } if key == "missing.json"));
}

#[tokio::test]
async fn every_write_gets_a_fresh_etag() {
    let store = MemoryStore::new();
    let first = store.put("a", b"1".to_vec(), None).await.unwrap();
    let second = store.put("a", b"2".to_vec(), None).await.unwrap();
    assert_ne!(first, second);

    let stored = store.get("a").await.unwrap();
    assert_eq!(stored.body, b"2");
    assert_eq!(stored.etag, second);
}

#[tokio::test]
async fn put_if_match_rejects_stale_etag() {
    let store = MemoryStore::new();
    let stale = store.put("doc", b"1".to_vec(), None).await.unwrap();
    let fresh = store.put_if_match("doc", b"2".to_vec(), None, &stale).await.unwrap();

    let err = store
        .put_if_match("doc", b"3".to_vec(), None, &stale)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::PreconditionFailed { .. }));
    assert_eq!(store.get("doc").await.unwrap().etag, fresh);
    assert_eq!(store.get("doc").await.unwrap().body, b"2");
}

#[tokio::test]
async fn put_if_match_on_missing_key_fails() {
    let store = MemoryStore::new();
    let err = store
        .put_if_match("doc", b"1".to_vec(), None, "\"v1\"")
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::PreconditionFailed { .. }));
    assert!(store.is_empty());
}

#[tokio::test]
async fn put_if_absent_refuses_to_overwrite() {
    let store = MemoryStore::new();
    store.put_if_absent("doc", b"1".to_vec(), None).await.unwrap();
    let err = store.put_if_absent("doc", b"2".to_vec(), None).await.unwrap_err();
    assert!(matches!(err, StorageError::AlreadyExists { .. }));
    assert_eq!(store.get("doc").await.unwrap().body, b"1");
}

#[tokio::test]
async fn list_and_delete_by_prefix() {
    let store = MemoryStore::new();
    for key in ["users/a/x", "users/a/y/z", "users/ab/x", "users/b/x"] {
        store.put(key, Vec::new(), None).await.unwrap();
    }

    assert_eq!(
        store.list("users/a/").await.unwrap(),
        vec!["users/a/x".to_string(), "users/a/y/z".to_string()]
    );
    assert_eq!(store.delete_prefix("users/a/").await.unwrap(), 2);
    assert_eq!(store.len(), 2);
    assert!(store.list("users/a/").await.unwrap().is_empty());

    // Deleting a missing key is fine.
    store.delete("users/a/x").await.unwrap();
}

#[tokio::test]
async fn json_state_round_trip_with_locking() {
    let store = MemoryStore::new();
    let etag = create_state(&store, "counter.json", &Counter { value: 1 }).await.unwrap();
    let (loaded, loaded_etag): (Counter, String) = load_state(&store, "counter.json").await.unwrap();
    assert_eq!(loaded, Counter { value: 1 });
    assert_eq!(loaded_etag, etag);

    save_state_if_match(&store, "counter.json", &Counter { value: 2 }, &etag)
        .await
        .unwrap();
    let err = save_state_if_match(&store, "counter.json", &Counter { value: 3 }, &etag)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::PreconditionFailed { .. }));
}

#[tokio::test]
async fn update_state_applies_and_returns_result() {
    let store = MemoryStore::new();
    create_state(&store, "counter.json", &Counter { value: 41 }).await.unwrap();

    let (previous, _etag) = update_state(&store, "counter.json", |c: &mut Counter| {
        let previous = c.value;
        c.value += 1;
        Ok::<_, StorageError>(previous)
    })
    .await
    .unwrap();

    assert_eq!(previous, 41);
    let (now, _): (Counter, String) = load_state(&store, "counter.json").await.unwrap();
    assert_eq!(now.value, 42);
}

#[tokio::test]
async fn update_state_aborts_without_writing_on_error() {
    let store = MemoryStore::new();
    let etag = create_state(&store, "counter.json", &Counter { value: 7 }).await.unwrap();

    let result = update_state(&store, "counter.json", |c: &mut Counter| {
        c.value = 0;
        Err::<(), _>(StorageError::NotFound {
            key: "something-else".to_string(),
        })
    })
    .await;

    assert!(result.is_err());
    assert_eq!(store.get("counter.json").await.unwrap().etag, etag);
}

#[tokio::test]
async fn concurrent_updates_do_not_lose_increments() {
    let store = std::sync::Arc::new(MemoryStore::new());
    create_state(store.as_ref(), "counter.json", &Counter { value: 0 }).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..4 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            update_state(store.as_ref(), "counter.json", |c: &mut Counter| {
                c.value += 1;
                Ok::<_, StorageError>(())
            })
            .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let (counter, _): (Counter, String) = load_state(store.as_ref(), "counter.json").await.unwrap();
    assert_eq!(counter.value, 4);
}
