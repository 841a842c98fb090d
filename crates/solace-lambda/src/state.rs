use std::sync::Arc;

use solace_journal::JournalService;
use solace_sessions::SessionService;
use solace_storage::DocumentStore;

use crate::middleware::auth::AuthMode;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionService,
    pub journal: JournalService,
    pub auth: AuthMode,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, auth: AuthMode) -> Self {
        Self {
            sessions: SessionService::new(store.clone()),
            journal: JournalService::new(store),
            auth,
        }
    }
}
