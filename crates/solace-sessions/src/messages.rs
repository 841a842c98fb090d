use jiff::{SignedDuration, Timestamp};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use solace_core::keys;
use solace_core::models::message::{ChatMessage, ChatRole, InferenceReply};
use solace_core::models::session::Session;
use solace_core::user::UserId;
use solace_instruments::ingest::DiagnosticMapping;
use solace_storage::error::StorageError;
use solace_storage::state::{create_state, load_state};

use crate::controller::SessionService;
use crate::error::SessionError;

/// The two messages stored for one inference reply, and the session after
/// its scores were applied.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Exchange {
    pub user_message: ChatMessage,
    pub assistant_message: ChatMessage,
    pub session: Session,
}

impl SessionService {
    /// Feed an inference reply's diagnostic mapping to
    /// [`SessionService::update_question_scores`], then store the reply as a
    /// user/assistant message pair.
    ///
    /// Messages are only written once the scores are applied, so a reply that
    /// fails validation or scoring stores nothing. A failure writing the
    /// messages leaves the applied scores in place.
    pub async fn record_exchange(
        &self,
        user: &UserId,
        id: Uuid,
        reply: InferenceReply,
    ) -> Result<Exchange, SessionError> {
        let mapping = DiagnosticMapping::from_json(&reply.diagnostic_mapping)?;
        let session = self.update_question_scores(user, id, &mapping).await?;

        let said_at = Timestamp::now();
        let user_message = ChatMessage {
            id: Uuid::new_v4(),
            role: ChatRole::User,
            text: reply.transcript,
            timestamp: said_at,
            sentiment: reply.sentiment,
            emotions: Some(reply.emotions).filter(|v| !v.is_null()),
            question_scores: Some(reply.diagnostic_mapping).filter(|v| !v.is_null()),
        };
        self.put_message(user, id, &user_message).await?;

        // Strictly after the user message so the pair lists in order.
        let replied_at = said_at
            .checked_add(SignedDuration::from_millis(1))
            .map_or(said_at, |next| next.max(Timestamp::now()));
        let assistant_message = ChatMessage {
            id: Uuid::new_v4(),
            role: ChatRole::Assistant,
            text: reply.bot_reply,
            timestamp: replied_at,
            sentiment: None,
            emotions: None,
            question_scores: None,
        };
        self.put_message(user, id, &assistant_message).await?;

        info!(user = %user, session_id = %id, scores = mapping.len(), "exchange recorded");

        Ok(Exchange {
            user_message,
            assistant_message,
            session,
        })
    }

    /// Messages of a session in chronological order.
    pub async fn list_messages(
        &self,
        user: &UserId,
        id: Uuid,
    ) -> Result<Vec<ChatMessage>, SessionError> {
        self.load(user, id).await?;

        let found = self.store.list(&keys::session_messages_prefix(user, id)).await?;
        let mut messages = Vec::with_capacity(found.len());
        for key in &found {
            match load_state::<ChatMessage>(self.store.as_ref(), key).await {
                Ok((message, _etag)) => messages.push(message),
                Err(StorageError::NotFound { .. }) => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(messages)
    }

    async fn put_message(
        &self,
        user: &UserId,
        id: Uuid,
        message: &ChatMessage,
    ) -> Result<(), SessionError> {
        let key = keys::session_message(user, id, message.timestamp, message.id);
        create_state(self.store.as_ref(), &key, message).await?;
        Ok(())
    }
}
