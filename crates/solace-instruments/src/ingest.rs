//! Validation of diagnostic score updates at the ingestion boundary.
//!
//! The inference endpoint returns a loosely-typed nested record
//! (`instrument → question id → { score }`). It is checked here against the
//! instrument registry before anything touches the question store.

use std::collections::BTreeMap;

use serde_json::{Map, Number, Value};

use solace_core::models::question::{InstrumentId, QuestionScore, QuestionSnapshot};

use crate::error::{InstrumentError, ScoreValidationError};
use crate::{Instrument, find_instrument, get_instrument};

/// A validated batch of score updates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticMapping {
    updates: BTreeMap<InstrumentId, BTreeMap<String, u8>>,
}

impl DiagnosticMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a raw mapping.
    ///
    /// Entries whose score is `null` are skipped: an answered question never
    /// reverts to unanswered. `null` or an empty object at the top level is
    /// an empty batch.
    pub fn from_json(raw: &Value) -> Result<Self, InstrumentError> {
        let mut mapping = Self::new();
        let instruments = match raw {
            Value::Null => return Ok(mapping),
            Value::Object(map) => map,
            other => {
                return Err(InstrumentError::Malformed(format!(
                    "expected an object of instruments, got {}",
                    kind(other)
                )));
            }
        };

        for (name, questions) in instruments {
            let instrument = find_instrument(name)?;
            let questions = questions.as_object().ok_or_else(|| {
                InstrumentError::Malformed(format!(
                    "{name}: expected an object of questions, got {}",
                    kind(questions)
                ))
            })?;
            for (question_id, entry) in questions {
                if let Some(score) = parse_entry(instrument, question_id, entry)? {
                    mapping
                        .updates
                        .entry(instrument.id())
                        .or_default()
                        .insert(question_id.clone(), score);
                }
            }
        }
        Ok(mapping)
    }

    /// Add one validated score.
    pub fn insert(
        &mut self,
        instrument: InstrumentId,
        question_id: &str,
        score: u8,
    ) -> Result<(), InstrumentError> {
        let score = get_instrument(instrument).validate_score(question_id, u64::from(score))?;
        self.updates
            .entry(instrument)
            .or_default()
            .insert(question_id.to_string(), score);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.updates.values().all(|q| q.is_empty())
    }

    /// Number of individual score updates in the batch.
    pub fn len(&self) -> usize {
        self.updates.values().map(|q| q.len()).sum()
    }

    pub fn instruments(&self) -> impl Iterator<Item = (&InstrumentId, &BTreeMap<String, u8>)> {
        self.updates.iter()
    }

    /// Merge the batch into a snapshot. Questions not named in the batch are
    /// left untouched.
    pub fn apply_to(&self, snapshot: &mut QuestionSnapshot) -> Result<(), InstrumentError> {
        for (instrument, updates) in &self.updates {
            let questions = snapshot
                .get_mut(*instrument)
                .ok_or(InstrumentError::MissingInstrument(*instrument))?;
            for (question_id, score) in updates {
                questions.insert(question_id.clone(), QuestionScore::answered(*score));
            }
        }
        Ok(())
    }

    /// Serialize back to the wire shape.
    pub fn to_json(&self) -> Value {
        let mut out = Map::new();
        for (instrument, updates) in &self.updates {
            let questions: Map<String, Value> = updates
                .iter()
                .map(|(id, score)| (id.clone(), serde_json::json!({ "score": score })))
                .collect();
            out.insert(instrument.as_str().to_string(), Value::Object(questions));
        }
        Value::Object(out)
    }
}

fn parse_entry(
    instrument: &dyn Instrument,
    question_id: &str,
    entry: &Value,
) -> Result<Option<u8>, InstrumentError> {
    let score = entry
        .as_object()
        .and_then(|obj| obj.get("score"))
        .ok_or_else(|| {
            InstrumentError::Malformed(format!(
                "{} {question_id}: expected {{\"score\": <integer>}}",
                instrument.name()
            ))
        })?;

    match score {
        Value::Null => Ok(None),
        Value::Number(n) => match as_whole_number(n) {
            Some(value) => instrument.validate_score(question_id, value).map(Some),
            None => Err(invalid(instrument, question_id, &n.to_string())),
        },
        other => Err(invalid(instrument, question_id, &other.to_string())),
    }
}

/// Accept non-negative integers, including floats with no fractional part
/// (`2.0`), which some upstream serializers emit.
fn as_whole_number(n: &Number) -> Option<u64> {
    n.as_u64().or_else(|| {
        n.as_f64()
            .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= f64::from(u32::MAX))
            .map(|f| f as u64)
    })
}

fn invalid(instrument: &dyn Instrument, question_id: &str, value: &str) -> InstrumentError {
    let range = instrument.item_range();
    ScoreValidationError {
        instrument: instrument.id(),
        question_id: question_id.to_string(),
        value: value.to_string(),
        expected_range: range,
        message: format!(
            "{}: {} score {} is not an integer in [{}, {}]",
            instrument.name(),
            question_id,
            value,
            range.min,
            range.max,
        ),
    }
    .into()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
