use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;
use uuid::Uuid;

use solace_core::models::journal::{JournalEntry, Mood};

use solace_journal::JournalFilter;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Body of both create and update.
#[derive(Debug, Deserialize)]
pub struct NewEntry {
    pub mood: Mood,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub mood: Option<Mood>,
    pub q: Option<String>,
}

pub async fn list_entries(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<JournalEntry>>, ApiError> {
    let filter = JournalFilter {
        mood: query.mood,
        query: query.q,
    };
    Ok(Json(state.journal.search_entries(&auth.sub, &filter).await?))
}

pub async fn create_entry(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<NewEntry>,
) -> Result<(StatusCode, Json<JournalEntry>), ApiError> {
    let entry = state
        .journal
        .create_entry(&auth.sub, body.mood, &body.content)
        .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn update_entry(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(body): Json<NewEntry>,
) -> Result<Json<JournalEntry>, ApiError> {
    let entry = state
        .journal
        .update_entry(&auth.sub, id, body.mood, &body.content)
        .await?;
    Ok(Json(entry))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.journal.delete_entry(&auth.sub, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
