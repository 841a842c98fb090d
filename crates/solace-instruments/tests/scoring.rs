use solace_core::models::question::{InstrumentId, QuestionScore, QuestionSnapshot};
use solace_core::models::summary::{Severity, SeverityColor};
use solace_instruments::scoring::{aggregate, completion, completion_percentage, round_percent};
use solace_instruments::{all_instruments, empty_snapshot, get_instrument, total_question_count};

/// Answer the first `scores.len()` questions of an instrument in order.
fn answer(snapshot: &mut QuestionSnapshot, instrument: InstrumentId, scores: &[u8]) {
    let questions = snapshot.get_mut(instrument).unwrap();
    for (n, score) in scores.iter().enumerate() {
        questions.insert(instrument.question_id(n + 1), QuestionScore::answered(*score));
    }
}

#[test]
fn registry_covers_every_instrument_in_order() {
    let ids: Vec<_> = all_instruments().iter().map(|i| i.id()).collect();
    assert_eq!(ids, InstrumentId::ALL.to_vec());
    assert_eq!(total_question_count(), 36);
}

#[test]
fn max_scores_follow_item_ranges() {
    assert_eq!(get_instrument(InstrumentId::Phq9).max_score(), 27);
    assert_eq!(get_instrument(InstrumentId::Gad7).max_score(), 21);
    assert_eq!(get_instrument(InstrumentId::Pcl5).max_score(), 80);
}

#[test]
fn empty_snapshot_has_36_unanswered_questions() {
    let snapshot = empty_snapshot();
    assert_eq!(snapshot.total(), 36);
    assert_eq!(snapshot.answered(), 0);
    assert!(snapshot.get(InstrumentId::Pcl5).unwrap().contains_key("Q20_PCL5"));
    assert_eq!(completion_percentage(&snapshot), 0);
}

#[test]
fn phq9_summing_to_22_is_severe() {
    let mut snapshot = empty_snapshot();
    answer(&mut snapshot, InstrumentId::Phq9, &[3, 3, 3, 3, 2, 2, 2, 2, 2]);

    let phq9 = &aggregate(&snapshot)[0];
    assert_eq!(phq9.name, "Major Depressive Disorder");
    assert_eq!(phq9.score, 22);
    assert_eq!(phq9.max_score, 27);
    assert_eq!(phq9.percentage, 81);
    assert_eq!(phq9.severity, Severity::Severe);
    assert_eq!(phq9.color, SeverityColor::Red);
}

#[test]
fn gad7_total_12_is_moderate() {
    let mut snapshot = empty_snapshot();
    answer(&mut snapshot, InstrumentId::Gad7, &[2, 2, 2, 2, 2, 1, 1]);

    let gad7 = &aggregate(&snapshot)[1];
    assert_eq!(gad7.name, "Generalized Anxiety Disorder");
    assert_eq!(gad7.score, 12);
    assert_eq!(gad7.percentage, 57);
    assert_eq!(gad7.severity, Severity::Moderate);
    assert_eq!(gad7.color, SeverityColor::Orange);
}

#[test]
fn severity_lower_bounds_are_inclusive() {
    let phq9 = get_instrument(InstrumentId::Phq9);
    assert_eq!(phq9.severity(4), Severity::Minimal);
    assert_eq!(phq9.severity(5), Severity::Mild);
    assert_eq!(phq9.severity(10), Severity::Moderate);
    assert_eq!(phq9.severity(15), Severity::ModeratelySevere);
    assert_eq!(phq9.severity(19), Severity::ModeratelySevere);
    assert_eq!(phq9.severity(20), Severity::Severe);

    let gad7 = get_instrument(InstrumentId::Gad7);
    assert_eq!(gad7.severity(0), Severity::Minimal);
    assert_eq!(gad7.severity(9), Severity::Mild);
    assert_eq!(gad7.severity(14), Severity::Moderate);
    assert_eq!(gad7.severity(15), Severity::Severe);

    let pcl5 = get_instrument(InstrumentId::Pcl5);
    assert_eq!(pcl5.severity(30), Severity::BelowThreshold);
    assert_eq!(pcl5.severity(31), Severity::Moderate);
    assert_eq!(pcl5.severity(44), Severity::Moderate);
    assert_eq!(pcl5.severity(45), Severity::Severe);
}

#[test]
fn color_tiers() {
    assert_eq!(SeverityColor::for_percentage(60), SeverityColor::Red);
    assert_eq!(SeverityColor::for_percentage(59), SeverityColor::Orange);
    assert_eq!(SeverityColor::for_percentage(30), SeverityColor::Orange);
    assert_eq!(SeverityColor::for_percentage(29), SeverityColor::Green);
    assert_eq!(SeverityColor::Green.hex(), "#10B981");
}

#[test]
fn rounding_is_half_up() {
    assert_eq!(round_percent(1, 8), 13); // 12.5
    assert_eq!(round_percent(1, 3), 33);
    assert_eq!(round_percent(2, 3), 67);
    assert_eq!(round_percent(0, 0), 0);
    assert_eq!(round_percent(36, 36), 100);
}

#[test]
fn completion_of_empty_store_is_zero() {
    let snapshot = QuestionSnapshot::default();
    let c = completion(&snapshot);
    assert_eq!(c.total_questions, 0);
    assert_eq!(c.answered_questions, 0);
    assert_eq!(c.percentage, 0);
}

#[test]
fn completion_never_decreases_as_questions_are_answered() {
    let mut snapshot = empty_snapshot();
    let mut previous = completion_percentage(&snapshot);

    for instrument in all_instruments() {
        for question_id in instrument.question_ids() {
            snapshot
                .get_mut(instrument.id())
                .unwrap()
                .insert(question_id, QuestionScore::answered(1));
            let current = completion_percentage(&snapshot);
            assert!(current >= previous, "{current} < {previous}");
            previous = current;
        }
    }

    let c = completion(&snapshot);
    assert_eq!(c.answered_questions, 36);
    assert_eq!(c.percentage, 100);
    assert!(c.is_complete());
}

#[test]
fn aggregate_is_deterministic() {
    let mut snapshot = empty_snapshot();
    answer(&mut snapshot, InstrumentId::Pcl5, &[4, 3, 2, 1, 0, 4, 4, 4, 4, 4]);
    answer(&mut snapshot, InstrumentId::Gad7, &[1, 1, 1]);

    let first = aggregate(&snapshot);
    let second = aggregate(&snapshot.clone());
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
    assert_eq!(first[2].score, 30);
    assert_eq!(first[2].severity, Severity::BelowThreshold);
}

#[test]
fn aggregate_skips_instruments_absent_from_snapshot() {
    let mut snapshot = QuestionSnapshot::default();
    snapshot.insert(
        InstrumentId::Gad7,
        get_instrument(InstrumentId::Gad7).empty_questions(),
    );
    let results = aggregate(&snapshot);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].severity, Severity::Minimal);
    assert_eq!(results[0].percentage, 0);
}
