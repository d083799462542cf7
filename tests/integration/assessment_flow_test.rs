//! Assessment Flow Integration Tests
//!
//! Drives complete attempts through `AssessmentFlow` against the reference
//! question bank:
//! - Weak Openness at the midpoint inserts calibration question 102
//! - The midpoint transition is idempotent under back/forward navigation
//! - Duplicate dual selections are rejected at the input boundary
//! - Submissions carry exactly the base identifiers with evidence merged

use trait_assessment::{AppError, AssessmentFlow, MergeOutcome, QuestionBank};
use trait_assessment_core::TraitDimension::{Affinity, Extraversion, Openness};
use trait_assessment_core::TraitVector;

// ============================================================================
// Helpers
// ============================================================================

fn answer_single(flow: &mut AssessmentFlow<'_>, value: &str) {
    flow.select_single(value).unwrap();
    flow.advance().unwrap();
}

fn answer_dual(flow: &mut AssessmentFlow<'_>, most: &str, second: &str) {
    flow.select_most_like(most).unwrap();
    flow.select_second_like(second).unwrap();
    flow.advance().unwrap();
}

/// First six answers leave Openness with one primary exposure valued 1
fn weak_openness_first_half(flow: &mut AssessmentFlow<'_>) {
    answer_single(flow, "D");
    answer_dual(flow, "A", "B");
    answer_single(flow, "A");
    answer_dual(flow, "B", "D");
    answer_single(flow, "D");
    answer_single(flow, "D");
}

/// First six answers with no weak dimension
fn balanced_first_half(flow: &mut AssessmentFlow<'_>) {
    answer_single(flow, "A");
    answer_dual(flow, "C", "A");
    answer_single(flow, "A");
    answer_dual(flow, "B", "C");
    answer_single(flow, "C");
    answer_single(flow, "A");
}

/// Questions 7..=11 with the first options
fn answer_through_eleven(flow: &mut AssessmentFlow<'_>) {
    for _ in 7..=11 {
        let question = flow.current_question().unwrap();
        if question.is_dual() {
            answer_dual(flow, "A", "B");
        } else {
            answer_single(flow, "A");
        }
    }
}

// ============================================================================
// Calibration insertion
// ============================================================================

#[test]
fn test_weak_openness_inserts_openness_calibration() {
    let mut flow = AssessmentFlow::new(QuestionBank::reference());
    weak_openness_first_half(&mut flow);

    assert!(flow.calibration_checked());
    assert_eq!(flow.calibration_question(), Some(102));
    assert_eq!(flow.calibration_dimension(), Some(Openness));
    assert_eq!(flow.current_question_id(), Some(102));
    assert_eq!(
        flow.sequence(),
        vec![1, 2, 3, 4, 5, 6, 102, 7, 8, 9, 10, 11, 12]
    );
}

#[test]
fn test_balanced_first_half_inserts_nothing() {
    let mut flow = AssessmentFlow::new(QuestionBank::reference());
    balanced_first_half(&mut flow);

    assert!(flow.calibration_checked());
    assert_eq!(flow.calibration_question(), None);
    assert_eq!(flow.current_question_id(), Some(7));
    assert_eq!(flow.total_questions(), 12);
}

#[test]
fn test_midpoint_transition_is_idempotent() {
    let mut flow = AssessmentFlow::new(QuestionBank::reference());
    weak_openness_first_half(&mut flow);

    for _ in 0..3 {
        assert_eq!(flow.go_back(), Some(6));
        let outcome = flow.advance().unwrap();
        assert_eq!(outcome.inserted_calibration, None);
        assert_eq!(outcome.next_question, Some(102));
    }

    // Direct re-runs are no-ops too
    assert_eq!(flow.run_midpoint_check(), None);
    assert_eq!(flow.run_midpoint_check(), None);
    assert_eq!(flow.sequence().iter().filter(|id| **id > 100).count(), 1);
}

#[test]
fn test_changing_midpoint_answer_after_check_does_not_redetect() {
    let mut flow = AssessmentFlow::new(QuestionBank::reference());
    balanced_first_half(&mut flow);

    assert_eq!(flow.go_back(), Some(6));
    answer_single(&mut flow, "D");

    assert_eq!(flow.calibration_question(), None);
    assert_eq!(flow.current_question_id(), Some(7));
    assert_eq!(flow.total_questions(), 12);
}

// ============================================================================
// Input boundary
// ============================================================================

#[test]
fn test_duplicate_dual_selection_never_reaches_store() {
    let mut flow = AssessmentFlow::new(QuestionBank::reference());
    answer_single(&mut flow, "A");

    flow.select_second_like("B").unwrap();
    let err = flow.select_most_like("B").unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let stored = flow.responses().get(2).unwrap();
    assert!(stored.primary.is_none());
    assert_eq!(stored.secondary_choice.as_deref(), Some("B"));
    assert!(flow.responses().validate().is_ok());
}

#[test]
fn test_progress_tracks_answered_questions() {
    let mut flow = AssessmentFlow::new(QuestionBank::reference());
    balanced_first_half(&mut flow);
    assert!((flow.progress() - 50.0).abs() < f64::EPSILON);
}

// ============================================================================
// Submission
// ============================================================================

#[test]
fn test_submission_merges_calibration_into_last_question() {
    let mut flow = AssessmentFlow::new(QuestionBank::reference());
    weak_openness_first_half(&mut flow);
    answer_single(&mut flow, "A"); // 102: Openness 4, Extraversion 1
    answer_through_eleven(&mut flow);

    flow.select_most_like("B").unwrap(); // Affinity 2, Openness 1
    flow.select_second_like("A").unwrap(); // Extraversion 3
    let last = flow.advance().unwrap();
    assert_eq!(last.next_question, None);
    assert!(flow.is_ready_to_submit());

    let submission = flow.submission().unwrap();
    let answers = submission.payload.answers();
    assert_eq!(answers.ids().collect::<Vec<_>>(), (1..=12).collect::<Vec<u32>>());

    let target = answers.get(12).unwrap();
    assert_eq!(
        target.primary,
        Some(
            TraitVector::empty()
                .with(Affinity, 2)
                .with(Openness, 3)
                .with(Extraversion, 1)
        )
    );
    assert_eq!(
        target.secondary,
        Some(TraitVector::empty().with(Extraversion, 4).with(Openness, 2))
    );
    assert!(matches!(
        submission.merge,
        MergeOutcome::Applied { target: 12, .. }
    ));
}

#[test]
fn test_submission_without_calibration_is_base_answers() {
    let mut flow = AssessmentFlow::new(QuestionBank::reference());
    balanced_first_half(&mut flow);
    answer_through_eleven(&mut flow);
    answer_dual(&mut flow, "D", "C");

    let submission = flow.submission().unwrap();
    assert_eq!(submission.merge, MergeOutcome::NoCalibration);
    assert_eq!(submission.payload.answers(), flow.responses());
}

#[test]
fn test_payload_serializes_with_base_keys_only() {
    let mut flow = AssessmentFlow::new(QuestionBank::reference());
    weak_openness_first_half(&mut flow);
    answer_single(&mut flow, "B");
    answer_through_eleven(&mut flow);
    answer_dual(&mut flow, "A", "C");

    let submission = flow.submission().unwrap();
    let value = serde_json::to_value(&submission.payload).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 12);
    assert!(object.contains_key("12"));
    assert!(!object.contains_key("102"));
    assert_eq!(object["12"]["type"], "dual");
}
