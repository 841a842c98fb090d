use axum::extract::{Path, State};
use axum::{Extension, Json};
use uuid::Uuid;

use solace_core::models::message::{ChatMessage, InferenceReply};
use solace_sessions::messages::Exchange;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub async fn list_messages(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ChatMessage>>, ApiError> {
    Ok(Json(state.sessions.list_messages(&auth.sub, id).await?))
}

/// Store one inference reply and apply its diagnostic mapping.
pub async fn record_exchange(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(reply): Json<InferenceReply>,
) -> Result<Json<Exchange>, ApiError> {
    Ok(Json(
        state.sessions.record_exchange(&auth.sub, id, reply).await?,
    ))
}
