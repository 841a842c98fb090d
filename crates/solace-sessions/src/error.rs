use thiserror::Error;
use uuid::Uuid;

use solace_core::models::session::SessionStatus;
use solace_instruments::error::InstrumentError;
use solace_storage::error::StorageError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session not found: {0}")]
    NotFound(Uuid),

    #[error("a session named '{0}' already exists")]
    NameConflict(String),

    #[error("invalid session name: {0}")]
    InvalidName(String),

    #[error("cannot {action} a session that is {status}")]
    InvalidTransition {
        action: &'static str,
        status: SessionStatus,
    },

    #[error(transparent)]
    Instrument(#[from] InstrumentError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl SessionError {
    /// Turn a storage miss on one of `id`'s documents into `NotFound(id)`.
    pub(crate) fn or_not_found(self, id: Uuid) -> Self {
        match self {
            SessionError::Storage(StorageError::NotFound { .. }) => SessionError::NotFound(id),
            other => other,
        }
    }
}
