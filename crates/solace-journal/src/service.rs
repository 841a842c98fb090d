use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use solace_core::keys;
use solace_core::models::journal::{JournalEntry, Mood};
use solace_core::user::UserId;
use solace_storage::DocumentStore;
use solace_storage::error::StorageError;
use solace_storage::state::{create_state, load_state, update_state};

use crate::error::JournalError;

/// Narrows a journal listing. Empty fields match everything.
#[derive(Debug, Clone, Default)]
pub struct JournalFilter {
    pub mood: Option<Mood>,
    /// Case-insensitive substring of the entry content.
    pub query: Option<String>,
}

impl JournalFilter {
    pub fn matches(&self, entry: &JournalEntry) -> bool {
        if self.mood.is_some_and(|mood| mood != entry.mood) {
            return false;
        }
        match self.query.as_deref().map(str::trim) {
            Some(query) if !query.is_empty() => entry
                .content
                .to_lowercase()
                .contains(&query.to_lowercase()),
            _ => true,
        }
    }
}

#[derive(Clone)]
pub struct JournalService {
    store: Arc<dyn DocumentStore>,
}

impl JournalService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn create_entry(
        &self,
        user: &UserId,
        mood: Mood,
        content: &str,
    ) -> Result<JournalEntry, JournalError> {
        let content = non_empty(content)?;

        let entry = JournalEntry {
            id: Uuid::new_v4(),
            user_id: user.to_string(),
            mood,
            content: content.to_string(),
            created_at: jiff::Timestamp::now(),
            updated_at: None,
        };
        create_state(self.store.as_ref(), &keys::journal_entry(user, entry.id), &entry).await?;

        info!(user = %user, entry_id = %entry.id, mood = %mood, "journal entry created");
        Ok(entry)
    }

    /// A user's entries, newest first.
    pub async fn list_entries(&self, user: &UserId) -> Result<Vec<JournalEntry>, JournalError> {
        let found = self.store.list(&keys::journal_prefix(user)).await?;

        let mut entries = Vec::with_capacity(found.len());
        for key in &found {
            match load_state::<JournalEntry>(self.store.as_ref(), key).await {
                Ok((entry, _etag)) => entries.push(entry),
                Err(StorageError::NotFound { .. }) => continue,
                Err(e) => return Err(e.into()),
            }
        }

        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(entries)
    }

    /// Entries passing `filter`, newest first.
    pub async fn search_entries(
        &self,
        user: &UserId,
        filter: &JournalFilter,
    ) -> Result<Vec<JournalEntry>, JournalError> {
        let mut entries = self.list_entries(user).await?;
        entries.retain(|entry| filter.matches(entry));
        Ok(entries)
    }

    /// Replace an entry's mood and content. `created_at` is kept.
    pub async fn update_entry(
        &self,
        user: &UserId,
        id: Uuid,
        mood: Mood,
        content: &str,
    ) -> Result<JournalEntry, JournalError> {
        let content = non_empty(content)?;

        let key = keys::journal_entry(user, id);
        let (entry, _etag) = update_state(self.store.as_ref(), &key, |entry: &mut JournalEntry| {
            entry.mood = mood;
            entry.content = content.to_string();
            entry.updated_at = Some(jiff::Timestamp::now());
            Ok::<_, JournalError>(entry.clone())
        })
        .await
        .map_err(|e| match e {
            JournalError::Storage(StorageError::NotFound { .. }) => JournalError::NotFound(id),
            other => other,
        })?;

        info!(user = %user, entry_id = %id, mood = %mood, "journal entry updated");
        Ok(entry)
    }

    pub async fn delete_entry(&self, user: &UserId, id: Uuid) -> Result<(), JournalError> {
        let key = keys::journal_entry(user, id);
        match self.store.get(&key).await {
            Ok(_) => {}
            Err(StorageError::NotFound { .. }) => return Err(JournalError::NotFound(id)),
            Err(e) => return Err(e.into()),
        }
        self.store.delete(&key).await?;

        info!(user = %user, entry_id = %id, "journal entry deleted");
        Ok(())
    }
}

fn non_empty(content: &str) -> Result<&str, JournalError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(JournalError::EmptyContent);
    }
    Ok(content)
}
