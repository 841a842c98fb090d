use thiserror::Error;
use uuid::Uuid;

use solace_storage::error::StorageError;

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("journal entry not found: {0}")]
    NotFound(Uuid),

    #[error("journal entry cannot be empty")]
    EmptyContent,

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
