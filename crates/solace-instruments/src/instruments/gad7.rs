use solace_core::models::question::InstrumentId;
use solace_core::models::summary::Severity;

use crate::Instrument;
use crate::scoring::{ScoreRange, SeverityBand};

/// GAD-7: Generalized Anxiety Disorder scale, seven items rated 0–3.
/// Total 0–21.
pub struct Gad7;

const BANDS: &[SeverityBand] = &[
    SeverityBand { min: 15, severity: Severity::Severe },
    SeverityBand { min: 10, severity: Severity::Moderate },
    SeverityBand { min: 5, severity: Severity::Mild },
    SeverityBand { min: 0, severity: Severity::Minimal },
];

impl Instrument for Gad7 {
    fn id(&self) -> InstrumentId {
        InstrumentId::Gad7
    }

    fn full_name(&self) -> &str {
        "Generalized Anxiety Disorder"
    }

    fn question_count(&self) -> usize {
        7
    }

    fn item_range(&self) -> ScoreRange {
        ScoreRange { min: 0, max: 3 }
    }

    fn severity_bands(&self) -> &[SeverityBand] {
        BANDS
    }
}
