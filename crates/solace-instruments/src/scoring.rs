use serde::{Deserialize, Serialize};
use ts_rs::TS;

use solace_core::models::question::{QuestionMap, QuestionSnapshot};
use solace_core::models::summary::{AssessmentScore, Severity, SeverityColor};

use crate::{Instrument, get_instrument};

/// Defines the valid range for a single item score. Bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreRange {
    pub min: u8,
    pub max: u8,
}

impl ScoreRange {
    pub fn contains(&self, value: u8) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// A severity band with an inclusive lower bound on the total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SeverityBand {
    pub min: u32,
    pub severity: Severity,
}

/// Answered and total question counts for a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Completion {
    pub total_questions: u32,
    pub answered_questions: u32,
    pub percentage: u32,
}

impl Completion {
    pub fn is_complete(&self) -> bool {
        self.percentage == 100
    }
}

/// `round(100 * part / whole)` with halves rounded up, in integer arithmetic.
/// Zero when `whole` is zero.
pub fn round_percent(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    let (part, whole) = (u64::from(part), u64::from(whole));
    ((200 * part + whole) / (2 * whole)) as u32
}

/// Count answered questions across every instrument in the snapshot.
pub fn completion(snapshot: &QuestionSnapshot) -> Completion {
    let total = snapshot.total() as u32;
    let answered = snapshot.answered() as u32;
    Completion {
        total_questions: total,
        answered_questions: answered,
        percentage: round_percent(answered, total),
    }
}

pub fn completion_percentage(snapshot: &QuestionSnapshot) -> u32 {
    completion(snapshot).percentage
}

/// Score one instrument's question map. Unanswered questions count as zero.
pub fn assess(instrument: &dyn Instrument, questions: &QuestionMap) -> AssessmentScore {
    let score: u32 = questions
        .values()
        .filter_map(|q| q.score)
        .map(u32::from)
        .sum();
    let max_score = instrument.max_score();
    let percentage = round_percent(score, max_score);

    AssessmentScore {
        name: instrument.full_name().to_string(),
        score,
        max_score,
        percentage,
        severity: instrument.severity(score),
        color: SeverityColor::for_percentage(percentage),
    }
}

/// Aggregate every instrument present in the snapshot, in registry order.
pub fn aggregate(snapshot: &QuestionSnapshot) -> Vec<AssessmentScore> {
    snapshot
        .instruments()
        .map(|(id, questions)| assess(get_instrument(*id), questions))
        .collect()
}
