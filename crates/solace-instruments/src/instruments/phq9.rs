use solace_core::models::question::InstrumentId;
use solace_core::models::summary::Severity;

use crate::Instrument;
use crate::scoring::{ScoreRange, SeverityBand};

/// PHQ-9: Patient Health Questionnaire, nine items.
/// Each item rated 0–3 over the past two weeks. Total 0–27.
pub struct Phq9;

const BANDS: &[SeverityBand] = &[
    SeverityBand { min: 20, severity: Severity::Severe },
    SeverityBand { min: 15, severity: Severity::ModeratelySevere },
    SeverityBand { min: 10, severity: Severity::Moderate },
    SeverityBand { min: 5, severity: Severity::Mild },
    SeverityBand { min: 0, severity: Severity::Minimal },
];

impl Instrument for Phq9 {
    fn id(&self) -> InstrumentId {
        InstrumentId::Phq9
    }

    fn full_name(&self) -> &str {
        "Major Depressive Disorder"
    }

    fn question_count(&self) -> usize {
        9
    }

    fn item_range(&self) -> ScoreRange {
        ScoreRange { min: 0, max: 3 }
    }

    fn severity_bands(&self) -> &[SeverityBand] {
        BANDS
    }
}
