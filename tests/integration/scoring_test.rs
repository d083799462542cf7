//! Scoring Engine Integration Tests
//!
//! Properties of the pure engine, exercised through the public crate API:
//! - Score totality and the single-exposure boundary scores
//! - Weak-signal exactness and selector determinism
//! - Merge shape invariance and additivity
//! - The Openness calibration scenario end to end

use trait_assessment_core::TraitDimension::{
    self, Affinity, Conscientiousness, EmotionalStability, Extraversion, Openness, Positivity,
};
use trait_assessment_core::{TraitMap, TraitVector};
use trait_assessment_scoring::{
    Answer, CalibrationMerger, CalibrationSelector, MergeOutcome, QuestionBank, QuestionKind,
    ResponseStore, TraitScorer, WeakSignalDetector, MAX_OPTION_CONTRIBUTION,
    MIN_OPTION_CONTRIBUTION,
};

// ============================================================================
// Helpers
// ============================================================================

fn vector(pairs: &[(TraitDimension, i32)]) -> TraitVector {
    pairs
        .iter()
        .fold(TraitVector::empty(), |v, (d, value)| v.with(*d, *value))
}

fn single(pairs: &[(TraitDimension, i32)]) -> Answer {
    Answer::from_vectors(QuestionKind::Single, Some(vector(pairs)), None)
}

fn dual(primary: &[(TraitDimension, i32)], secondary: &[(TraitDimension, i32)]) -> Answer {
    Answer::from_vectors(
        QuestionKind::Dual,
        Some(vector(primary)),
        Some(vector(secondary)),
    )
}

fn store(answers: Vec<(u32, Answer)>) -> ResponseStore {
    let mut store = ResponseStore::new();
    for (id, answer) in answers {
        store.record(id, answer).unwrap();
    }
    store
}

/// A complete base answer set built from the first options of the catalog
fn full_base_store(bank: &QuestionBank) -> ResponseStore {
    let mut store = ResponseStore::new();
    for question in bank.base_questions() {
        let answer = if question.is_dual() {
            Answer::dual(&question.options[0], &question.options[1]).unwrap()
        } else {
            Answer::single(&question.options[0])
        };
        store.record(question.id, answer).unwrap();
    }
    store
}

// ============================================================================
// Scorer
// ============================================================================

#[test]
fn test_empty_responses_score_neutral() {
    let report = TraitScorer::score(&ResponseStore::new());
    assert_eq!(report.normalized, TraitMap::splat(50));
    assert_eq!(report.counts, TraitMap::splat(0.0));
}

#[test]
fn test_scores_always_within_range() {
    let bank = QuestionBank::reference();
    let stores = vec![
        ResponseStore::new(),
        full_base_store(bank),
        store(vec![(1, single(&[(Openness, MAX_OPTION_CONTRIBUTION)]))]),
        store(vec![(
            2,
            dual(
                &[(Extraversion, MAX_OPTION_CONTRIBUTION)],
                &[(Extraversion, MAX_OPTION_CONTRIBUTION - 1)],
            ),
        )]),
        store(vec![(1, single(&[(Affinity, 0)]))]),
    ];

    for responses in &stores {
        let report = TraitScorer::score(responses);
        for (dimension, score) in report.normalized.iter() {
            assert!(
                (50..=100).contains(score),
                "{} scored {} outside [50, 100]",
                dimension,
                score
            );
        }
    }
}

#[test]
fn test_single_exposure_boundary_scores() {
    let low = TraitScorer::score(&store(vec![(
        1,
        single(&[(Openness, MIN_OPTION_CONTRIBUTION)]),
    )]));
    assert_eq!(*low.normalized.get(Openness), 56);

    let high = TraitScorer::score(&store(vec![(
        1,
        single(&[(Openness, MAX_OPTION_CONTRIBUTION)]),
    )]));
    assert_eq!(*high.normalized.get(Openness), 75);
}

#[test]
fn test_secondary_counts_half_exposure() {
    let report = TraitScorer::score(&store(vec![(
        2,
        dual(&[(Positivity, 2)], &[(Conscientiousness, 4)]),
    )]));
    assert_eq!(*report.counts.get(Positivity), 1.0);
    assert_eq!(*report.counts.get(Conscientiousness), 0.5);
    // 0.5 * 4 over 0.5 exposure averages back to 4
    assert_eq!(*report.normalized.get(Conscientiousness), 75);
    assert_eq!(*report.counts.get(Affinity), 0.0);
}

// ============================================================================
// Detector and selector
// ============================================================================

#[test]
fn test_weak_dimensions_have_single_exposure() {
    let responses = store(vec![
        (1, single(&[(Openness, 1)])),
        (2, dual(&[(Affinity, 1)], &[(Positivity, 1)])),
        (3, single(&[(Affinity, 1)])),
        (4, single(&[(EmotionalStability, 3)])),
    ]);
    let report = TraitScorer::score(&responses);
    let weak = WeakSignalDetector::detect_report(&report);

    assert_eq!(weak, vec![Openness]);
    for dimension in &weak {
        assert_eq!(*report.counts.get(*dimension), 1.0);
        assert!(*report.normalized.get(*dimension) <= 56);
    }
}

#[test]
fn test_unmeasured_dimension_never_weak() {
    let report = TraitScorer::score(&ResponseStore::new());
    assert!(WeakSignalDetector::detect_report(&report).is_empty());
}

#[test]
fn test_selector_ignores_input_order() {
    let weak = vec![Extraversion, Positivity, Conscientiousness, Affinity];
    let expected = CalibrationSelector::select(&weak);
    assert_eq!(expected, Some(Conscientiousness));

    let mut reversed = weak.clone();
    reversed.reverse();
    assert_eq!(CalibrationSelector::select(&reversed), expected);

    for shift in 0..weak.len() {
        let mut rotated = weak.clone();
        rotated.rotate_left(shift);
        assert_eq!(CalibrationSelector::select(&rotated), expected);
    }

    assert_eq!(CalibrationSelector::select(&[]), None);
}

// ============================================================================
// Merger
// ============================================================================

#[test]
fn test_merge_keeps_base_key_set() {
    let bank = QuestionBank::reference();
    let merger = CalibrationMerger::for_bank(bank);

    for calibration in bank.calibration_questions() {
        let mut responses = full_base_store(bank);
        let base_ids: Vec<u32> = responses.ids().collect();
        for option in &calibration.question.options {
            responses
                .record(calibration.question.id, Answer::single(option))
                .unwrap();

            let result = merger.merge(&responses);
            let merged_ids: Vec<u32> = result.answers.ids().collect();
            assert_eq!(merged_ids, base_ids);

            let target = result.answers.get(bank.merge_target_id()).unwrap();
            assert!(target.primary.is_some());
            assert!(target.secondary.is_some());
            assert!(matches!(result.outcome, MergeOutcome::Applied { .. }));
        }
    }
}

#[test]
fn test_merge_adds_half_delta_to_both_slots() {
    let merger = CalibrationMerger::for_bank(QuestionBank::reference());
    let base = store(vec![(12, dual(&[(Affinity, 2), (Positivity, 1)], &[(Extraversion, 3)]))]);
    let calibration = single(&[(Affinity, 4)]);

    let result = merger.merge_with(base, Some(&calibration));
    let target = result.answers.get(12).unwrap();
    let primary = target.primary.unwrap();
    let secondary = target.secondary.unwrap();

    assert_eq!(primary.value(Affinity), Some(4));
    assert_eq!(primary.value(Positivity), Some(1));
    assert_eq!(secondary.value(Affinity), Some(2));
    assert_eq!(secondary.value(Extraversion), Some(3));
    assert_eq!(primary.value(Openness), None);
}

#[test]
fn test_merge_drops_evidence_for_single_target() {
    let merger = CalibrationMerger::for_bank(QuestionBank::reference());
    let base = store(vec![(12, single(&[(Affinity, 2)]))]);
    let before = base.clone();

    let result = merger.merge_with(base, Some(&single(&[(Openness, 4)])));
    assert_eq!(result.answers, before);
    assert!(matches!(result.outcome, MergeOutcome::Dropped { .. }));
}

// ============================================================================
// Scenario
// ============================================================================

#[test]
fn test_openness_calibration_scenario() {
    let bank = QuestionBank::reference();

    // Openness: one primary contribution of 1. Every other dimension has
    // zero exposure or at least two units.
    let first_half = store(vec![
        (1, single(&[(Openness, 1), (Affinity, 2)])),
        (2, dual(&[(Affinity, 3)], &[(Extraversion, 2)])),
        (3, single(&[(Extraversion, 2), (Conscientiousness, 3)])),
        (4, dual(&[(Conscientiousness, 2)], &[(Extraversion, 1)])),
        (5, single(&[(Extraversion, 3), (EmotionalStability, 2)])),
        (6, single(&[(EmotionalStability, 4)])),
    ]);
    let report = TraitScorer::score(&first_half);
    assert_eq!(*report.counts.get(Openness), 1.0);
    assert_eq!(*report.normalized.get(Openness), 56);

    let weak = WeakSignalDetector::detect_report(&report);
    assert_eq!(weak, vec![Openness]);
    assert_eq!(CalibrationSelector::select(&weak), Some(Openness));

    let question = CalibrationSelector::select_question(bank, &weak).unwrap();
    assert_eq!(question.id, 102);

    let calibration = Answer::single(question.require_option("A").unwrap());
    assert_eq!(
        calibration.primary,
        Some(vector(&[(Openness, 4), (Extraversion, 1)]))
    );

    let base = store(vec![(12, dual(&[(Openness, 2)], &[(Openness, 1)]))]);
    let result = CalibrationMerger::for_bank(bank).merge_with(base, Some(&calibration));
    let target = result.answers.get(12).unwrap();

    // round(4 / 2) = 2 and round(1 / 2) = 1 with half-away-from-zero
    assert_eq!(
        target.primary,
        Some(vector(&[(Openness, 4), (Extraversion, 1)]))
    );
    assert_eq!(
        target.secondary,
        Some(vector(&[(Openness, 3), (Extraversion, 1)]))
    );
}
