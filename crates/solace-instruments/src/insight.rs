use solace_core::models::question::QuestionSnapshot;
use solace_core::models::summary::{AssessmentScore, DetailedSymptom, SummaryData};

use crate::scoring::aggregate;

const MINIMAL_SYMPTOMS: &str = "Your responses indicate minimal symptoms across all assessed \
     areas. Continue monitoring your mental health and reach out to a professional if symptoms \
     develop.";

/// Build the narrative shown on the session summary.
///
/// Results are framed as suggestive only and always point to a licensed
/// provider; nothing here is a diagnosis.
pub fn clinical_insight(assessments: &[AssessmentScore]) -> String {
    let elevated: Vec<&AssessmentScore> = assessments
        .iter()
        .filter(|a| !a.severity.is_baseline())
        .collect();

    match elevated.as_slice() {
        [] => MINIMAL_SYMPTOMS.to_string(),
        [single] => format!(
            "Your responses suggest {} symptoms consistent with {}. A licensed mental health \
             provider can provide a comprehensive evaluation and discuss appropriate treatment \
             options.",
            single.severity.label().to_lowercase(),
            single.name,
        ),
        several => {
            let described = several
                .iter()
                .map(|a| format!("{} {}", a.severity.label().to_lowercase(), a.name))
                .collect::<Vec<_>>()
                .join(", ");
            format!(
                "Your responses suggest overlapping symptoms including {described}. This \
                 comorbidity pattern is common, and a licensed mental health provider can help \
                 clarify the best support approach for you."
            )
        }
    }
}

pub fn detailed_symptoms(assessments: &[AssessmentScore]) -> Vec<DetailedSymptom> {
    assessments
        .iter()
        .map(|a| DetailedSymptom {
            disorder: a.name.clone(),
            likelihood: a.percentage,
            symptoms_reported: vec![
                format!("{} out of {} total points reported", a.score, a.max_score),
                format!("Severity level: {}", a.severity),
            ],
        })
        .collect()
}

/// Everything written to a session's `summaryData`, computed from one
/// snapshot.
pub fn summarize(snapshot: &QuestionSnapshot) -> SummaryData {
    let assessments = aggregate(snapshot);
    SummaryData {
        clinical_insight: clinical_insight(&assessments),
        detailed_symptoms: detailed_symptoms(&assessments),
        assessments,
    }
}
