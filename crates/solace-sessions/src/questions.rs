use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use solace_core::keys;
use solace_core::models::question::{InstrumentId, QuestionDocument, QuestionSnapshot};
use solace_core::user::UserId;
use solace_instruments::empty_snapshot;
use solace_instruments::ingest::DiagnosticMapping;
use solace_storage::DocumentStore;
use solace_storage::state::{create_state, load_state, update_state};

use crate::error::SessionError;

/// Durable per-question scores of each session, one document per session.
#[derive(Clone)]
pub struct QuestionStore {
    store: Arc<dyn DocumentStore>,
}

impl QuestionStore {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Write the question document of a new session, every question
    /// unanswered.
    pub async fn initialize(
        &self,
        user: &UserId,
        session_id: Uuid,
    ) -> Result<QuestionSnapshot, SessionError> {
        let document = QuestionDocument {
            questions: empty_snapshot(),
            updated_at: jiff::Timestamp::now(),
        };
        create_state(
            self.store.as_ref(),
            &keys::session_questions(user, session_id),
            &document,
        )
        .await?;
        Ok(document.questions)
    }

    /// Merge scores into one instrument. Questions not in `updates` are left
    /// alone.
    pub async fn set_scores(
        &self,
        user: &UserId,
        session_id: Uuid,
        instrument: InstrumentId,
        updates: &BTreeMap<String, u8>,
    ) -> Result<QuestionSnapshot, SessionError> {
        let mut mapping = DiagnosticMapping::new();
        for (question_id, score) in updates {
            mapping.insert(instrument, question_id, *score)?;
        }
        self.apply(user, session_id, &mapping).await
    }

    /// Merge a whole batch in one conditional write. Returns the snapshot as
    /// written.
    pub async fn apply(
        &self,
        user: &UserId,
        session_id: Uuid,
        mapping: &DiagnosticMapping,
    ) -> Result<QuestionSnapshot, SessionError> {
        if mapping.is_empty() {
            return self.read_all(user, session_id).await;
        }

        let key = keys::session_questions(user, session_id);
        let (snapshot, _etag) = update_state(self.store.as_ref(), &key, |doc: &mut QuestionDocument| {
            mapping.apply_to(&mut doc.questions)?;
            doc.updated_at = jiff::Timestamp::now();
            Ok::<_, SessionError>(doc.questions.clone())
        })
        .await
        .map_err(|e| e.or_not_found(session_id))?;

        debug!(user = %user, session_id = %session_id, updates = mapping.len(), "question scores merged");
        Ok(snapshot)
    }

    pub async fn read_all(
        &self,
        user: &UserId,
        session_id: Uuid,
    ) -> Result<QuestionSnapshot, SessionError> {
        let key = keys::session_questions(user, session_id);
        let (doc, _etag): (QuestionDocument, String) = load_state(self.store.as_ref(), &key)
            .await
            .map_err(|e| SessionError::from(e).or_not_found(session_id))?;
        Ok(doc.questions)
    }
}
