use solace_core::models::question::{InstrumentId, QuestionScore};
use solace_core::models::summary::{AssessmentScore, Severity, SeverityColor};
use solace_instruments::empty_snapshot;
use solace_instruments::insight::{clinical_insight, detailed_symptoms, summarize};

fn assessment(name: &str, score: u32, max_score: u32, severity: Severity) -> AssessmentScore {
    let percentage = solace_instruments::scoring::round_percent(score, max_score);
    AssessmentScore {
        name: name.to_string(),
        score,
        max_score,
        percentage,
        severity,
        color: SeverityColor::for_percentage(percentage),
    }
}

#[test]
fn no_elevated_results_is_reassuring() {
    let insight = clinical_insight(&[
        assessment("Major Depressive Disorder", 2, 27, Severity::Minimal),
        assessment("Post-Traumatic Stress Disorder", 10, 80, Severity::BelowThreshold),
    ]);
    assert!(insight.starts_with("Your responses indicate minimal symptoms across all assessed areas."));
}

#[test]
fn single_elevated_result_names_the_disorder() {
    let insight = clinical_insight(&[
        assessment("Major Depressive Disorder", 16, 27, Severity::ModeratelySevere),
        assessment("Generalized Anxiety Disorder", 3, 21, Severity::Minimal),
    ]);
    assert!(insight.contains(
        "suggest moderately severe symptoms consistent with Major Depressive Disorder."
    ));
    assert!(insight.contains("licensed mental health provider"));
}

#[test]
fn several_elevated_results_are_framed_as_comorbidity() {
    let insight = clinical_insight(&[
        assessment("Major Depressive Disorder", 22, 27, Severity::Severe),
        assessment("Generalized Anxiety Disorder", 12, 21, Severity::Moderate),
        assessment("Post-Traumatic Stress Disorder", 5, 80, Severity::BelowThreshold),
    ]);
    assert!(insight.contains(
        "overlapping symptoms including severe Major Depressive Disorder, moderate Generalized Anxiety Disorder."
    ));
    assert!(insight.contains("comorbidity pattern"));
    assert!(!insight.contains("Post-Traumatic"));
}

#[test]
fn mild_counts_as_elevated() {
    let insight = clinical_insight(&[assessment(
        "Generalized Anxiety Disorder",
        6,
        21,
        Severity::Mild,
    )]);
    assert!(insight.contains("mild symptoms consistent with Generalized Anxiety Disorder"));
}

#[test]
fn detailed_symptoms_report_points_and_severity() {
    let symptoms = detailed_symptoms(&[assessment(
        "Major Depressive Disorder",
        22,
        27,
        Severity::Severe,
    )]);
    assert_eq!(symptoms.len(), 1);
    assert_eq!(symptoms[0].disorder, "Major Depressive Disorder");
    assert_eq!(symptoms[0].likelihood, 81);
    assert_eq!(
        symptoms[0].symptoms_reported,
        vec![
            "22 out of 27 total points reported".to_string(),
            "Severity level: Severe".to_string(),
        ]
    );
}

#[test]
fn summarize_covers_all_three_instruments() {
    let mut snapshot = empty_snapshot();
    for (instrument, questions) in [(InstrumentId::Phq9, 9), (InstrumentId::Gad7, 7), (InstrumentId::Pcl5, 20)] {
        let map = snapshot.get_mut(instrument).unwrap();
        for n in 1..=questions {
            map.insert(instrument.question_id(n), QuestionScore::answered(0));
        }
    }

    let summary = summarize(&snapshot);
    assert_eq!(summary.assessments.len(), 3);
    assert_eq!(summary.detailed_symptoms.len(), 3);
    assert!(summary.clinical_insight.contains("minimal symptoms"));
}
