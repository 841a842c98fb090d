use solace_core::models::question::InstrumentId;
use solace_core::models::summary::Severity;

use crate::Instrument;
use crate::scoring::{ScoreRange, SeverityBand};

/// PCL-5: PTSD Checklist for DSM-5.
/// 20 items, each rated 0–4 ("not at all" to "extremely"). Total 0–80.
/// Scores below 31 fall under the provisional-diagnosis threshold.
pub struct Pcl5;

const BANDS: &[SeverityBand] = &[
    SeverityBand { min: 45, severity: Severity::Severe },
    SeverityBand { min: 31, severity: Severity::Moderate },
    SeverityBand { min: 0, severity: Severity::BelowThreshold },
];

impl Instrument for Pcl5 {
    fn id(&self) -> InstrumentId {
        InstrumentId::Pcl5
    }

    fn full_name(&self) -> &str {
        "Post-Traumatic Stress Disorder"
    }

    fn question_count(&self) -> usize {
        20
    }

    fn item_range(&self) -> ScoreRange {
        ScoreRange { min: 0, max: 4 }
    }

    fn severity_bands(&self) -> &[SeverityBand] {
        BANDS
    }
}
