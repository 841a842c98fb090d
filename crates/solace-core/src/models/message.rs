use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ChatRole {
    User,
    Assistant,
}

/// A stored chat message within a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: ChatRole,
    pub text: String,
    pub timestamp: jiff::Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotions: Option<serde_json::Value>,
    /// The raw diagnostic mapping returned alongside this message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_scores: Option<serde_json::Value>,
}

/// What the inference endpoint returns for one recorded video note.
///
/// Only `diagnostic_mapping` feeds the scoring workflow; the other fields
/// are stored with the chat messages as-is.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InferenceReply {
    pub transcript: String,
    #[serde(default)]
    pub sentiment: Option<String>,
    pub bot_reply: String,
    #[serde(default)]
    pub diagnostic_mapping: serde_json::Value,
    #[serde(default)]
    pub emotions: serde_json::Value,
}
