//! Document key conventions.
//!
//! Canonical layout of documents in the store. Everything a user owns is
//! partitioned under `users/{user_id}/`.

use uuid::Uuid;

use crate::user::UserId;

pub const SESSION_DOCUMENT: &str = "session.json";

pub fn sessions_prefix(user: &UserId) -> String {
    format!("users/{user}/sessions/")
}

/// Prefix covering a session document and all of its children.
pub fn session_prefix(user: &UserId, id: Uuid) -> String {
    format!("users/{user}/sessions/{id}/")
}

pub fn session(user: &UserId, id: Uuid) -> String {
    format!("users/{user}/sessions/{id}/{SESSION_DOCUMENT}")
}

pub fn session_questions(user: &UserId, id: Uuid) -> String {
    format!("users/{user}/sessions/{id}/questions.json")
}

pub fn session_messages_prefix(user: &UserId, id: Uuid) -> String {
    format!("users/{user}/sessions/{id}/messages/")
}

/// Message keys sort chronologically: the zero-padded millisecond timestamp
/// comes first, the message id breaks ties.
pub fn session_message(user: &UserId, id: Uuid, at: jiff::Timestamp, message_id: Uuid) -> String {
    let millis = at.as_millisecond().max(0);
    format!("users/{user}/sessions/{id}/messages/{millis:020}-{message_id}.json")
}

/// True when `key` names a session document rather than one of its children.
pub fn is_session_document(key: &str) -> bool {
    key.ends_with(&format!("/{SESSION_DOCUMENT}"))
}

pub fn journal_prefix(user: &UserId) -> String {
    format!("users/{user}/journal/")
}

pub fn journal_entry(user: &UserId, id: Uuid) -> String {
    format!("users/{user}/journal/{id}.json")
}
