use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use solace_core::models::question::QuestionSnapshot;
use solace_core::models::session::{Session, StatusChange};
use solace_instruments::ingest::DiagnosticMapping;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CreateSession {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RenameSession {
    pub name: String,
}

/// Newest first. A user with no sessions gets their first one here.
pub async fn list_sessions(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<Session>>, ApiError> {
    Ok(Json(state.sessions.ensure_session(&auth.sub).await?))
}

pub async fn create_session(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<CreateSession>,
) -> Result<(StatusCode, Json<Session>), ApiError> {
    let session = state
        .sessions
        .create_session(&auth.sub, body.name.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(session)))
}

pub async fn get_session(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Session>, ApiError> {
    Ok(Json(state.sessions.get_session(&auth.sub, id).await?))
}

pub async fn rename_session(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(body): Json<RenameSession>,
) -> Result<Json<Session>, ApiError> {
    Ok(Json(
        state.sessions.rename_session(&auth.sub, id, &body.name).await?,
    ))
}

pub async fn delete_session(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.sessions.delete_session(&auth.sub, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Body is a raw diagnostic mapping:
/// `{ "PHQ-9": { "Q1_PHQ9": { "score": 2 } }, ... }`.
pub async fn update_question_scores(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(raw): Json<Value>,
) -> Result<Json<Session>, ApiError> {
    let mapping = DiagnosticMapping::from_json(&raw)?;
    Ok(Json(
        state
            .sessions
            .update_question_scores(&auth.sub, id, &mapping)
            .await?,
    ))
}

pub async fn get_questions(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<QuestionSnapshot>, ApiError> {
    Ok(Json(state.sessions.questions().read_all(&auth.sub, id).await?))
}

pub async fn end_session(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<StatusChange>, ApiError> {
    let status = state.sessions.end_session_manually(&auth.sub, id).await?;
    Ok(Json(StatusChange { status }))
}

pub async fn resume_session(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<StatusChange>, ApiError> {
    let status = state.sessions.resume_session(&auth.sub, id).await?;
    Ok(Json(StatusChange { status }))
}
