use uuid::Uuid;

use solace_core::models::session::Session;

use crate::error::SessionError;

pub const MAX_NAME_LEN: usize = 50;

/// Trim and length-check a user-supplied session name.
pub fn validate_name(raw: &str) -> Result<String, SessionError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(SessionError::InvalidName("name cannot be empty".to_string()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(SessionError::InvalidName(format!(
            "name is too long (max {MAX_NAME_LEN} characters)"
        )));
    }
    Ok(name.to_string())
}

/// Whether `name` collides case-insensitively with a session other than
/// `except`.
pub fn name_taken(existing: &[Session], name: &str, except: Option<Uuid>) -> bool {
    let wanted = name.to_lowercase();
    existing
        .iter()
        .filter(|s| Some(s.id) != except)
        .any(|s| s.name.to_lowercase() == wanted)
}

/// `Session N` with the smallest free N.
pub fn default_name(existing: &[Session]) -> String {
    let mut n = 1;
    loop {
        let candidate = format!("Session {n}");
        if !name_taken(existing, &candidate, None) {
            return candidate;
        }
        n += 1;
    }
}
