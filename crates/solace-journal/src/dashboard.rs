use serde::{Deserialize, Serialize};
use ts_rs::TS;

use solace_core::models::journal::{JournalEntry, MoodSummary};

use crate::mood::mood_summary;

pub const RECENT_ENTRIES: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Dashboard {
    pub mood: MoodSummary,
    pub recent_entries: Vec<JournalEntry>,
    pub total_entries: u32,
    pub session_count: u32,
}

impl Dashboard {
    /// `entries` must be newest first, as returned by
    /// [`crate::JournalService::list_entries`].
    pub fn build(entries: &[JournalEntry], session_count: usize) -> Self {
        Self {
            mood: mood_summary(entries),
            recent_entries: entries.iter().take(RECENT_ENTRIES).cloned().collect(),
            total_entries: entries.len() as u32,
            session_count: session_count as u32,
        }
    }
}
