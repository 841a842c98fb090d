use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::summary::SummaryData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum SessionStatus {
    /// Diagnostic intake in progress.
    Active,
    /// Ended by the user before every question was answered.
    EndedPremature,
    /// Ended with every question answered; the summary has been written.
    EndedComplete,
    /// Free-talk mode after a completed intake. No further scoring.
    Resumed,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Active => "active",
            SessionStatus::EndedPremature => "ended-premature",
            SessionStatus::EndedComplete => "ended-complete",
            SessionStatus::Resumed => "resumed",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A therapy session document.
///
/// `status`, `completion_percentage`, the question counters and
/// `summary_data` are only ever written by the lifecycle controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Session {
    pub id: Uuid,
    pub name: String,
    pub status: SessionStatus,
    pub created_at: jiff::Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<jiff::Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resumed_at: Option<jiff::Timestamp>,
    pub completion_percentage: u32,
    pub total_questions: u32,
    pub answered_questions: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_data: Option<SummaryData>,
}

impl Session {
    pub fn is_complete(&self) -> bool {
        self.completion_percentage == 100
    }
}

/// Body of the end and resume responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StatusChange {
    pub status: SessionStatus,
}
