use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// A standardized questionnaire tracked in every session.
///
/// Declaration order is the canonical reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum InstrumentId {
    #[serde(rename = "PHQ-9")]
    Phq9,
    #[serde(rename = "GAD-7")]
    Gad7,
    #[serde(rename = "PCL-5")]
    Pcl5,
}

impl InstrumentId {
    pub const ALL: [InstrumentId; 3] = [InstrumentId::Phq9, InstrumentId::Gad7, InstrumentId::Pcl5];

    pub fn as_str(&self) -> &'static str {
        match self {
            InstrumentId::Phq9 => "PHQ-9",
            InstrumentId::Gad7 => "GAD-7",
            InstrumentId::Pcl5 => "PCL-5",
        }
    }

    /// Suffix used in question ids, e.g. `PHQ9` in `Q3_PHQ9`.
    pub fn question_tag(&self) -> &'static str {
        match self {
            InstrumentId::Phq9 => "PHQ9",
            InstrumentId::Gad7 => "GAD7",
            InstrumentId::Pcl5 => "PCL5",
        }
    }

    pub fn question_id(&self, number: usize) -> String {
        format!("Q{number}_{}", self.question_tag())
    }
}

impl fmt::Display for InstrumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstrumentId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InstrumentId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| CoreError::UnknownInstrument(s.to_string()))
    }
}

/// One question's recorded score. `None` until the question is answered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuestionScore {
    pub score: Option<u8>,
}

impl QuestionScore {
    pub fn answered(score: u8) -> Self {
        Self { score: Some(score) }
    }

    pub fn is_answered(&self) -> bool {
        self.score.is_some()
    }
}

/// Question id → score for a single instrument.
pub type QuestionMap = BTreeMap<String, QuestionScore>;

/// Every instrument's question map for one session, as read from the
/// question store in a single read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuestionSnapshot(pub BTreeMap<InstrumentId, QuestionMap>);

impl QuestionSnapshot {
    pub fn instruments(&self) -> impl Iterator<Item = (&InstrumentId, &QuestionMap)> {
        self.0.iter()
    }

    pub fn get(&self, instrument: InstrumentId) -> Option<&QuestionMap> {
        self.0.get(&instrument)
    }

    pub fn get_mut(&mut self, instrument: InstrumentId) -> Option<&mut QuestionMap> {
        self.0.get_mut(&instrument)
    }

    pub fn insert(&mut self, instrument: InstrumentId, questions: QuestionMap) {
        self.0.insert(instrument, questions);
    }

    /// Number of questions across all instruments.
    pub fn total(&self) -> usize {
        self.0.values().map(|q| q.len()).sum()
    }

    /// Number of questions with a non-null score.
    pub fn answered(&self) -> usize {
        self.0
            .values()
            .flat_map(|q| q.values())
            .filter(|s| s.is_answered())
            .count()
    }
}

/// The stored question document for a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDocument {
    pub questions: QuestionSnapshot,
    pub updated_at: jiff::Timestamp,
}
