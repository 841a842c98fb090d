use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use solace_core::keys;
use solace_core::models::question::QuestionSnapshot;
use solace_core::models::session::{Session, SessionStatus};
use solace_core::user::UserId;
use solace_instruments::ingest::DiagnosticMapping;
use solace_instruments::scoring::completion;
use solace_storage::DocumentStore;
use solace_storage::error::StorageError;
use solace_storage::state::{
    MAX_UPDATE_ATTEMPTS, create_state, load_state, retry_delay, save_state_if_match,
};

use crate::error::SessionError;
use crate::lifecycle;
use crate::naming::{default_name, name_taken, validate_name};
use crate::questions::QuestionStore;

/// The session lifecycle controller.
///
/// Sole writer of a session's status, counters and summary. Every write of
/// a session document goes through [`SessionService::transact`], which
/// re-reads the session and its question snapshot and commits with a single
/// ETag-conditioned write.
#[derive(Clone)]
pub struct SessionService {
    pub(crate) store: Arc<dyn DocumentStore>,
    questions: QuestionStore,
}

impl SessionService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            questions: QuestionStore::new(store.clone()),
            store,
        }
    }

    pub fn questions(&self) -> &QuestionStore {
        &self.questions
    }

    /// Create a session with every question unanswered.
    ///
    /// Without a name the session gets the first free `Session N`.
    pub async fn create_session(
        &self,
        user: &UserId,
        name: Option<&str>,
    ) -> Result<Session, SessionError> {
        let existing = self.list_sessions(user).await?;
        let name = match name {
            Some(raw) => {
                let name = validate_name(raw)?;
                if name_taken(&existing, &name, None) {
                    return Err(SessionError::NameConflict(name));
                }
                name
            }
            None => default_name(&existing),
        };

        let id = Uuid::new_v4();
        // Questions first: a visible session document always has its store.
        let snapshot = self.questions.initialize(user, id).await?;

        let mut session = Session {
            id,
            name,
            status: SessionStatus::Active,
            created_at: jiff::Timestamp::now(),
            ended_at: None,
            resumed_at: None,
            completion_percentage: 0,
            total_questions: 0,
            answered_questions: 0,
            summary_data: None,
        };
        lifecycle::refresh_counters(&mut session, completion(&snapshot));
        create_state(self.store.as_ref(), &keys::session(user, id), &session).await?;

        info!(user = %user, session_id = %id, name = %session.name, "session created");
        Ok(session)
    }

    /// All of a user's sessions, newest first.
    pub async fn list_sessions(&self, user: &UserId) -> Result<Vec<Session>, SessionError> {
        let found = self.store.list(&keys::sessions_prefix(user)).await?;

        let mut sessions = Vec::new();
        for key in found.iter().filter(|k| keys::is_session_document(k)) {
            match load_state::<Session>(self.store.as_ref(), key).await {
                Ok((session, _etag)) => sessions.push(session),
                // Deleted between list and get.
                Err(StorageError::NotFound { .. }) => continue,
                Err(e) => return Err(e.into()),
            }
        }

        sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(sessions)
    }

    /// The user's sessions, creating the first one if there are none.
    pub async fn ensure_session(&self, user: &UserId) -> Result<Vec<Session>, SessionError> {
        let sessions = self.list_sessions(user).await?;
        if !sessions.is_empty() {
            return Ok(sessions);
        }
        Ok(vec![self.create_session(user, None).await?])
    }

    pub async fn get_session(&self, user: &UserId, id: Uuid) -> Result<Session, SessionError> {
        let (session, _etag) = self.load(user, id).await?;
        Ok(session)
    }

    /// Merge a batch of diagnostic scores and re-derive completion.
    ///
    /// An `active` session that reaches 100% moves to `ended-complete` and
    /// gets its summary in the same write. Sessions in any other status only
    /// have their counters refreshed.
    pub async fn update_question_scores(
        &self,
        user: &UserId,
        id: Uuid,
        mapping: &DiagnosticMapping,
    ) -> Result<Session, SessionError> {
        // Fail before touching the question store if the session is gone.
        self.load(user, id).await?;
        self.questions.apply(user, id, mapping).await?;

        let (session, completed) = self
            .transact(user, id, |session, snapshot| {
                let to = lifecycle::auto_complete(session.status, session.completion_percentage);
                if let Some(to) = to {
                    lifecycle::end(session, to, snapshot, jiff::Timestamp::now());
                }
                Ok(to.is_some())
            })
            .await?;

        if completed {
            info!(user = %user, session_id = %id, "session completed by answer update");
        }
        Ok(session)
    }

    /// End a session by hand. Complete sessions get their summary; partial
    /// ones end prematurely without one.
    pub async fn end_session_manually(
        &self,
        user: &UserId,
        id: Uuid,
    ) -> Result<SessionStatus, SessionError> {
        let (_, status) = self
            .transact(user, id, |session, snapshot| {
                let to = lifecycle::manual_end(session.status, session.completion_percentage)?;
                lifecycle::end(session, to, snapshot, jiff::Timestamp::now());
                Ok(to)
            })
            .await?;

        info!(user = %user, session_id = %id, status = %status, "session ended");
        Ok(status)
    }

    pub async fn resume_session(
        &self,
        user: &UserId,
        id: Uuid,
    ) -> Result<SessionStatus, SessionError> {
        let (_, status) = self
            .transact(user, id, |session, _snapshot| {
                let to = lifecycle::resume(session.status, session.completion_percentage)?;
                session.status = to;
                session.resumed_at = Some(jiff::Timestamp::now());
                Ok(to)
            })
            .await?;

        info!(user = %user, session_id = %id, status = %status, "session resumed");
        Ok(status)
    }

    /// Rename a session. Names are unique per user, ignoring case; a
    /// conflicting rename writes nothing.
    pub async fn rename_session(
        &self,
        user: &UserId,
        id: Uuid,
        name: &str,
    ) -> Result<Session, SessionError> {
        let name = validate_name(name)?;
        let existing = self.list_sessions(user).await?;
        if !existing.iter().any(|s| s.id == id) {
            return Err(SessionError::NotFound(id));
        }
        if name_taken(&existing, &name, Some(id)) {
            return Err(SessionError::NameConflict(name));
        }

        let (session, ()) = self
            .transact(user, id, |session, _snapshot| {
                session.name = name.clone();
                Ok(())
            })
            .await?;

        info!(user = %user, session_id = %id, name = %session.name, "session renamed");
        Ok(session)
    }

    /// Delete a session with its messages and question store.
    pub async fn delete_session(&self, user: &UserId, id: Uuid) -> Result<(), SessionError> {
        self.load(user, id).await?;

        let messages = self
            .store
            .delete_prefix(&keys::session_messages_prefix(user, id))
            .await?;
        self.store.delete(&keys::session_questions(user, id)).await?;
        // Last, so an interrupted delete can be retried.
        self.store.delete(&keys::session(user, id)).await?;

        info!(user = %user, session_id = %id, messages, "session deleted");
        Ok(())
    }

    pub(crate) async fn load(&self, user: &UserId, id: Uuid) -> Result<(Session, String), SessionError> {
        load_state(self.store.as_ref(), &keys::session(user, id))
            .await
            .map_err(|e| SessionError::from(e).or_not_found(id))
    }

    /// Read-modify-write a session document.
    ///
    /// Each attempt reads the session, then the question snapshot, refreshes
    /// the counters from that snapshot and runs `apply`. The result is
    /// committed with one write conditioned on the session's ETag; if another
    /// writer got there first the whole attempt is redone. An error from
    /// `apply` aborts without writing.
    async fn transact<R, F>(
        &self,
        user: &UserId,
        id: Uuid,
        mut apply: F,
    ) -> Result<(Session, R), SessionError>
    where
        R: Send,
        F: FnMut(&mut Session, &QuestionSnapshot) -> Result<R, SessionError> + Send,
    {
        let key = keys::session(user, id);

        for attempt in 1..=MAX_UPDATE_ATTEMPTS {
            let (mut session, etag) = self.load(user, id).await?;
            let snapshot = self.questions.read_all(user, id).await?;

            lifecycle::refresh_counters(&mut session, completion(&snapshot));
            let result = apply(&mut session, &snapshot)?;

            match save_state_if_match(self.store.as_ref(), &key, &session, &etag).await {
                Ok(_) => return Ok((session, result)),
                Err(StorageError::PreconditionFailed { .. }) => {
                    warn!(user = %user, session_id = %id, attempt, "session modified concurrently, retrying");
                    tokio::time::sleep(retry_delay(attempt)).await;
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(StorageError::Contended {
            key,
            attempts: MAX_UPDATE_ATTEMPTS,
        }
        .into())
    }
}
