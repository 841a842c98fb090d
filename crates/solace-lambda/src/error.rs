use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use solace_core::error::CoreError;
use solace_instruments::error::InstrumentError;
use solace_journal::JournalError;
use solace_sessions::SessionError;
use solace_storage::error::StorageError;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    Unauthorized(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound { key } => ApiError::NotFound(format!("object not found: {key}")),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<InstrumentError> for ApiError {
    fn from(e: InstrumentError) -> Self {
        match e {
            InstrumentError::UnknownInstrument(_) | InstrumentError::UnknownQuestion { .. } => {
                ApiError::NotFound(e.to_string())
            }
            InstrumentError::Validation(_) | InstrumentError::Malformed(_) => {
                ApiError::BadRequest(e.to_string())
            }
            // The stored snapshot is missing a registered instrument.
            InstrumentError::MissingInstrument(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::NotFound(_) => ApiError::NotFound(e.to_string()),
            SessionError::NameConflict(_) | SessionError::InvalidTransition { .. } => {
                ApiError::Conflict(e.to_string())
            }
            SessionError::InvalidName(_) => ApiError::BadRequest(e.to_string()),
            SessionError::Instrument(inner) => inner.into(),
            SessionError::Storage(inner) => inner.into(),
        }
    }
}

impl From<JournalError> for ApiError {
    fn from(e: JournalError) -> Self {
        match e {
            JournalError::NotFound(_) => ApiError::NotFound(e.to_string()),
            JournalError::EmptyContent => ApiError::BadRequest(e.to_string()),
            JournalError::Storage(inner) => inner.into(),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::UnknownInstrument(_) => ApiError::NotFound(e.to_string()),
            CoreError::UnknownMood(_) => ApiError::BadRequest(e.to_string()),
            CoreError::InvalidUserId(_) => ApiError::Unauthorized(e.to_string()),
        }
    }
}
