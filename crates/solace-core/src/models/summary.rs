use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A labeled band of an instrument's total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Severity {
    Minimal,
    Mild,
    Moderate,
    #[serde(rename = "Moderately Severe")]
    ModeratelySevere,
    Severe,
    #[serde(rename = "Below Threshold")]
    BelowThreshold,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Minimal => "Minimal",
            Severity::Mild => "Mild",
            Severity::Moderate => "Moderate",
            Severity::ModeratelySevere => "Moderately Severe",
            Severity::Severe => "Severe",
            Severity::BelowThreshold => "Below Threshold",
        }
    }

    /// The lowest band of its instrument, i.e. no elevated symptoms.
    pub fn is_baseline(&self) -> bool {
        matches!(self, Severity::Minimal | Severity::BelowThreshold)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Three-tier display bucket for an assessment percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SeverityColor {
    #[serde(rename = "#DC2626")]
    Red,
    #[serde(rename = "#F59E0B")]
    Orange,
    #[serde(rename = "#10B981")]
    Green,
}

impl SeverityColor {
    pub fn for_percentage(percentage: u32) -> Self {
        if percentage >= 60 {
            SeverityColor::Red
        } else if percentage >= 30 {
            SeverityColor::Orange
        } else {
            SeverityColor::Green
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            SeverityColor::Red => "#DC2626",
            SeverityColor::Orange => "#F59E0B",
            SeverityColor::Green => "#10B981",
        }
    }
}

/// Aggregated result of one instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AssessmentScore {
    /// Full name of the disorder the instrument screens for.
    pub name: String,
    pub score: u32,
    pub max_score: u32,
    pub percentage: u32,
    pub severity: Severity,
    pub color: SeverityColor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DetailedSymptom {
    pub disorder: String,
    pub likelihood: u32,
    pub symptoms_reported: Vec<String>,
}

/// Written to a session exactly once, when it ends with every question
/// answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SummaryData {
    pub assessments: Vec<AssessmentScore>,
    pub clinical_insight: String,
    pub detailed_symptoms: Vec<DetailedSymptom>,
}
