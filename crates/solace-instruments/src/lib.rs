//! solace-instruments
//!
//! Screening instrument definitions and the scoring engine. Pure data and
//! pure functions with no storage dependency. Defines the questions, item
//! ranges, and severity bands of each supported instrument, how raw answers
//! aggregate into assessment results, and the narrative built from them.

pub mod error;
pub mod ingest;
pub mod insight;
pub mod instruments;
pub mod scoring;

use solace_core::models::question::{InstrumentId, QuestionMap, QuestionScore, QuestionSnapshot};
use solace_core::models::summary::Severity;

use error::{InstrumentError, ScoreValidationError};
use scoring::{ScoreRange, SeverityBand};

/// Trait implemented by each screening instrument.
pub trait Instrument: Send + Sync {
    fn id(&self) -> InstrumentId;

    /// Short name (e.g., "PHQ-9").
    fn name(&self) -> &str {
        self.id().as_str()
    }

    /// Full name of the disorder screened for (e.g., "Major Depressive Disorder").
    fn full_name(&self) -> &str;

    fn question_count(&self) -> usize;

    /// Valid range of a single item's score.
    fn item_range(&self) -> ScoreRange;

    /// Severity bands ordered from the highest lower bound down. The last
    /// band must start at zero.
    fn severity_bands(&self) -> &[SeverityBand];

    fn max_score(&self) -> u32 {
        self.question_count() as u32 * u32::from(self.item_range().max)
    }

    fn question_ids(&self) -> Vec<String> {
        (1..=self.question_count())
            .map(|n| self.id().question_id(n))
            .collect()
    }

    fn has_question(&self, question_id: &str) -> bool {
        self.question_ids().iter().any(|q| q == question_id)
    }

    /// Map a total score to its band. Lower bounds are inclusive.
    fn severity(&self, total: u32) -> Severity {
        let bands = self.severity_bands();
        bands
            .iter()
            .find(|band| total >= band.min)
            .or(bands.last())
            .map(|band| band.severity)
            .unwrap_or(Severity::Minimal)
    }

    /// Check a single answer against this instrument's questions and item
    /// range.
    fn validate_score(&self, question_id: &str, value: u64) -> Result<u8, InstrumentError> {
        if !self.has_question(question_id) {
            return Err(InstrumentError::UnknownQuestion {
                instrument: self.id(),
                question_id: question_id.to_string(),
            });
        }
        let range = self.item_range();
        match u8::try_from(value) {
            Ok(score) if range.contains(score) => Ok(score),
            _ => Err(ScoreValidationError {
                instrument: self.id(),
                question_id: question_id.to_string(),
                value: value.to_string(),
                expected_range: range,
                message: format!(
                    "{}: {} score {} is outside range [{}, {}]",
                    self.name(),
                    question_id,
                    value,
                    range.min,
                    range.max,
                ),
            }
            .into()),
        }
    }

    /// Every question of this instrument, unanswered.
    fn empty_questions(&self) -> QuestionMap {
        self.question_ids()
            .into_iter()
            .map(|id| (id, QuestionScore::default()))
            .collect()
    }
}

/// Return all registered instruments, in reporting order.
pub fn all_instruments() -> Vec<&'static dyn Instrument> {
    InstrumentId::ALL.into_iter().map(get_instrument).collect()
}

/// Look up an instrument by ID. The registry is exhaustive over
/// [`InstrumentId`], so every id resolves.
pub fn get_instrument(id: InstrumentId) -> &'static dyn Instrument {
    match id {
        InstrumentId::Phq9 => &instruments::phq9::Phq9,
        InstrumentId::Gad7 => &instruments::gad7::Gad7,
        InstrumentId::Pcl5 => &instruments::pcl5::Pcl5,
    }
}

/// Look up an instrument by its short name. Unknown names are rejected
/// rather than scored with another instrument's bands.
pub fn find_instrument(name: &str) -> Result<&'static dyn Instrument, InstrumentError> {
    name.parse::<InstrumentId>()
        .map(get_instrument)
        .map_err(|_| InstrumentError::UnknownInstrument(name.to_string()))
}

/// The question store contents of a freshly created session.
pub fn empty_snapshot() -> QuestionSnapshot {
    let mut snapshot = QuestionSnapshot::default();
    for instrument in all_instruments() {
        snapshot.insert(instrument.id(), instrument.empty_questions());
    }
    snapshot
}

/// Total number of questions across every registered instrument.
pub fn total_question_count() -> usize {
    all_instruments().iter().map(|i| i.question_count()).sum()
}
