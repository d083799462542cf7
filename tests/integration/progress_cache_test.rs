//! Progress Cache Integration Tests
//!
//! Resume behaviour through `AssessmentService` and `ProgressCache` using
//! a real in-memory SQLite database:
//! - Answers, position and the midpoint flag restore together
//! - Malformed, expired and future-dated records are discarded
//! - Submission clears cached progress

use serde_json::json;

use trait_assessment::services::progress::FUTURE_TOLERANCE_MS;
use trait_assessment::{TraitDimension, TraitVector};
use trait_assessment::{
    AppResult, ArchetypeClassifier, AssessmentConfig, AssessmentFlow, AssessmentService,
    Database, ProgressCache, QuestionBank, ScoreReport, SubmissionPayload,
};

const NOW: i64 = 1_760_000_000_000;
const DAY_MS: i64 = 24 * 60 * 60 * 1000;

// ============================================================================
// Helpers
// ============================================================================

fn create_test_db() -> Database {
    Database::new_in_memory().expect("Failed to create in-memory test database")
}

fn create_service(db: Database) -> AssessmentService<'static> {
    AssessmentService::new(QuestionBank::reference(), db, AssessmentConfig::default())
        .expect("Failed to create assessment service")
}

fn weak_openness_first_half(flow: &mut AssessmentFlow<'_>) {
    let steps: [(&str, Option<&str>); 6] = [
        ("D", None),
        ("A", Some("B")),
        ("A", None),
        ("B", Some("D")),
        ("D", None),
        ("D", None),
    ];
    for (most, second) in steps {
        match second {
            Some(second) => {
                flow.select_most_like(most).unwrap();
                flow.select_second_like(second).unwrap();
            }
            None => flow.select_single(most).unwrap(),
        }
        flow.advance().unwrap();
    }
}

struct AnswerCount;

impl ArchetypeClassifier for AnswerCount {
    type Output = usize;

    fn classify(&self, payload: &SubmissionPayload, _scores: &ScoreReport) -> AppResult<usize> {
        Ok(payload.answers().len())
    }
}

// ============================================================================
// Resume
// ============================================================================

#[test]
fn test_resume_restores_flag_and_answers_together() {
    let service = create_service(create_test_db());
    let mut flow = service.start_at("user-1", NOW).unwrap();
    weak_openness_first_half(&mut flow);
    service.checkpoint_at("user-1", &flow, NOW).unwrap();

    let mut resumed = service.start_at("user-1", NOW + DAY_MS).unwrap();
    assert_eq!(resumed.responses(), flow.responses());
    assert!(resumed.calibration_checked());
    assert_eq!(resumed.calibration_question(), Some(102));
    assert_eq!(resumed.current_question_id(), Some(102));

    // Revisiting the midpoint after resume must not detect again
    assert_eq!(resumed.go_back(), Some(6));
    let outcome = resumed.advance().unwrap();
    assert_eq!(outcome.inserted_calibration, None);
    assert_eq!(resumed.total_questions(), 13);
}

#[test]
fn test_resume_before_midpoint_still_runs_check() {
    let service = create_service(create_test_db());
    let mut flow = service.start_at("user-2", NOW).unwrap();
    weak_openness_first_half(&mut flow);

    // Checkpoint taken while still on question 6
    let mut early = flow.snapshot(NOW);
    early.current_question_index = 5;
    early.calibration_checked = false;
    early.calibration_question_id = None;
    service.cache().save("user-2", &early).unwrap();

    let mut resumed = service.start_at("user-2", NOW).unwrap();
    assert!(!resumed.calibration_checked());
    let outcome = resumed.advance().unwrap();
    assert_eq!(outcome.inserted_calibration, Some(102));
}

// ============================================================================
// Discard
// ============================================================================

#[test]
fn test_expired_snapshot_is_discarded() {
    let db = create_test_db();
    let service = create_service(db.clone());
    let mut flow = service.start_at("user-3", NOW).unwrap();
    flow.select_single("A").unwrap();
    service.checkpoint_at("user-3", &flow, NOW).unwrap();

    let fresh = service.start_at("user-3", NOW + 8 * DAY_MS).unwrap();
    assert!(fresh.responses().is_empty());
    assert_ne!(fresh.attempt_id(), flow.attempt_id());
    assert!(db.get_snapshot("user-3").unwrap().is_none());
}

#[test]
fn test_unparseable_snapshot_is_discarded() {
    let db = create_test_db();
    db.upsert_snapshot("user-4", "{not json", NOW).unwrap();

    let cache = ProgressCache::from_config(db.clone(), &AssessmentConfig::default());
    assert!(cache.load("user-4", NOW).unwrap().is_none());
    assert!(db.get_snapshot("user-4").unwrap().is_none());
}

#[test]
fn test_snapshot_missing_flag_is_discarded() {
    let db = create_test_db();
    let payload = json!({
        "currentQuestionIndex": 1,
        "answers": { "1": { "type": "single", "primary": { "openness": 2 } } },
        "timestamp": NOW
    });
    db.upsert_snapshot("user-5", &payload.to_string(), NOW).unwrap();

    let service = create_service(db.clone());
    let flow = service.start_at("user-5", NOW).unwrap();
    assert!(flow.responses().is_empty());
    assert!(db.get_snapshot("user-5").unwrap().is_none());
}

#[test]
fn test_inconsistent_snapshot_is_discarded_on_start() {
    let db = create_test_db();
    // Parses, but claims an answer to a calibration question never inserted
    let payload = json!({
        "currentQuestionIndex": 1,
        "answers": { "103": { "type": "single", "primary": { "conscientiousness": 4 } } },
        "calibrationChecked": false,
        "timestamp": NOW
    });
    db.upsert_snapshot("user-6", &payload.to_string(), NOW).unwrap();

    let service = create_service(db.clone());
    let flow = service.start_at("user-6", NOW).unwrap();
    assert_eq!(flow.current_question_id(), Some(1));
    assert!(flow.responses().is_empty());
    assert!(db.get_snapshot("user-6").unwrap().is_none());
}

#[test]
fn test_future_snapshot_is_discarded() {
    let db = create_test_db();
    let service = create_service(db.clone());
    let flow = service.start_at("user-7", NOW).unwrap();
    service
        .checkpoint_at("user-7", &flow, NOW + FUTURE_TOLERANCE_MS + 1)
        .unwrap();

    assert!(service.cache().load("user-7", NOW).unwrap().is_none());
}

#[test]
fn test_out_of_range_timestamp_is_discarded() {
    let db = create_test_db();
    let payload = json!({
        "currentQuestionIndex": 0,
        "answers": {},
        "calibrationChecked": false,
        "timestamp": i64::MIN
    });
    db.upsert_snapshot("user-9", &payload.to_string(), i64::MIN).unwrap();

    let cache = ProgressCache::from_config(db.clone(), &AssessmentConfig::default());
    assert!(cache.load("user-9", NOW).unwrap().is_none());
    assert!(db.get_snapshot("user-9").unwrap().is_none());

    db.upsert_snapshot("user-9", &payload.to_string(), i64::MIN).unwrap();
    let service = create_service(db.clone());
    let flow = service.start_at("user-9", NOW).unwrap();
    assert_eq!(flow.current_question_id(), Some(1));
    assert!(db.get_snapshot("user-9").unwrap().is_none());
}

#[test]
fn test_tampered_contribution_is_discarded() {
    let db = create_test_db();
    let service = create_service(db.clone());
    let mut flow = service.start_at("user-10", NOW).unwrap();
    weak_openness_first_half(&mut flow);
    loop {
        let question = flow.current_question().unwrap();
        if question.is_dual() {
            flow.select_most_like("A").unwrap();
            flow.select_second_like("B").unwrap();
        } else {
            flow.select_single("A").unwrap();
        }
        if flow.advance().unwrap().next_question.is_none() {
            break;
        }
    }
    assert_eq!(flow.responses().len(), 13);

    let mut snapshot = flow.snapshot(NOW);
    let mut last = snapshot.answers.get(12).unwrap().clone();
    last.primary = Some(TraitVector::empty().with(TraitDimension::Openness, i32::MAX));
    snapshot.answers.record(12, last).unwrap();
    service.cache().save("user-10", &snapshot).unwrap();

    let fresh = service.start_at("user-10", NOW).unwrap();
    assert!(fresh.responses().is_empty());
    assert_ne!(fresh.attempt_id(), flow.attempt_id());
    assert!(db.get_snapshot("user-10").unwrap().is_none());
}

#[test]
fn test_purge_removes_only_expired() {
    let db = create_test_db();
    let cache = ProgressCache::from_config(db.clone(), &AssessmentConfig::default());
    let flow = AssessmentFlow::new(QuestionBank::reference());
    cache.save("old", &flow.snapshot(NOW - 10 * DAY_MS)).unwrap();
    cache.save("recent", &flow.snapshot(NOW - DAY_MS)).unwrap();

    assert_eq!(cache.purge_expired(NOW).unwrap(), 1);
    assert!(db.get_snapshot("old").unwrap().is_none());
    assert!(db.get_snapshot("recent").unwrap().is_some());
}

// ============================================================================
// Submit
// ============================================================================

#[test]
fn test_submit_clears_progress() {
    let db = create_test_db();
    let service = create_service(db.clone());
    let mut flow = service.start_at("user-8", NOW).unwrap();
    weak_openness_first_half(&mut flow);
    while flow.current_question_id().is_some() {
        let question = flow.current_question().unwrap();
        if question.is_dual() {
            flow.select_most_like("A").unwrap();
            flow.select_second_like("C").unwrap();
        } else {
            flow.select_single("B").unwrap();
        }
        service.checkpoint_at("user-8", &flow, NOW).unwrap();
        if flow.advance().unwrap().next_question.is_none() {
            break;
        }
    }

    let count = service.submit("user-8", &flow, &AnswerCount).unwrap();
    assert_eq!(count, 12);
    assert!(db.get_snapshot("user-8").unwrap().is_none());
}
