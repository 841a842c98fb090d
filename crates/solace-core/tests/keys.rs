use jiff::Timestamp;
use uuid::Uuid;

use solace_core::keys;
use solace_core::user::UserId;

fn user() -> UserId {
    UserId::parse("user-1").unwrap()
}

#[test]
fn session_documents_live_under_the_user() {
    let id = Uuid::new_v4();
    let user = user();
    let session = keys::session(&user, id);

    assert_eq!(session, format!("users/user-1/sessions/{id}/session.json"));
    assert!(session.starts_with(&keys::sessions_prefix(&user)));
    assert!(session.starts_with(&keys::session_prefix(&user, id)));
    assert!(keys::session_questions(&user, id).starts_with(&keys::session_prefix(&user, id)));
}

#[test]
fn only_session_documents_match() {
    let id = Uuid::new_v4();
    let user = user();
    assert!(keys::is_session_document(&keys::session(&user, id)));
    assert!(!keys::is_session_document(&keys::session_questions(&user, id)));
    let message = keys::session_message(&user, id, Timestamp::now(), Uuid::new_v4());
    assert!(!keys::is_session_document(&message));
}

#[test]
fn message_keys_sort_by_time() {
    let id = Uuid::new_v4();
    let user = user();
    let early = Timestamp::from_millisecond(9_999).unwrap();
    let late = Timestamp::from_millisecond(10_000).unwrap();

    // A larger id must not beat an earlier timestamp.
    let a = keys::session_message(&user, id, early, Uuid::max());
    let b = keys::session_message(&user, id, late, Uuid::nil());
    assert!(a < b);
    assert!(a.starts_with(&keys::session_messages_prefix(&user, id)));
}

#[test]
fn journal_keys() {
    let id = Uuid::new_v4();
    let user = user();
    assert_eq!(keys::journal_entry(&user, id), format!("users/user-1/journal/{id}.json"));
    assert!(keys::journal_entry(&user, id).starts_with(&keys::journal_prefix(&user)));
}

#[test]
fn user_ids_cannot_escape_their_prefix() {
    for bad in ["", ".", "..", "a/b", "../x", "a b", "ü"] {
        assert!(UserId::parse(bad).is_err(), "{bad:?}");
    }
    assert!(UserId::parse(&"a".repeat(129)).is_err());

    for good in ["user-1", "google-oauth2|1234", "a.b@example.com", "us-east-1:abc_def"] {
        assert_eq!(UserId::parse(good).unwrap().as_str(), good);
    }
}

#[test]
fn user_id_deserialization_validates() {
    let ok: UserId = serde_json::from_str("\"user-1\"").unwrap();
    assert_eq!(ok.to_string(), "user-1");
    assert!(serde_json::from_str::<UserId>("\"../etc\"").is_err());
}
