use axum::extract::State;
use axum::{Extension, Json};

use solace_journal::dashboard::Dashboard;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub async fn get_dashboard(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Dashboard>, ApiError> {
    let entries = state.journal.list_entries(&auth.sub).await?;
    let sessions = state.sessions.list_sessions(&auth.sub).await?;
    Ok(Json(Dashboard::build(&entries, sessions.len())))
}
