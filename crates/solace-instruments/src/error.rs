use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use solace_core::models::question::InstrumentId;

use crate::scoring::ScoreRange;

#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error("unknown instrument: {0}")]
    UnknownInstrument(String),

    #[error("unknown question '{question_id}' for instrument '{instrument}'")]
    UnknownQuestion {
        instrument: InstrumentId,
        question_id: String,
    },

    #[error("validation failed: {0}")]
    Validation(#[from] ScoreValidationError),

    #[error("malformed diagnostic mapping: {0}")]
    Malformed(String),

    #[error("instrument {0} is missing from the question store")]
    MissingInstrument(InstrumentId),
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct ScoreValidationError {
    pub instrument: InstrumentId,
    pub question_id: String,
    /// The offending value as received.
    pub value: String,
    pub expected_range: ScoreRange,
    pub message: String,
}
