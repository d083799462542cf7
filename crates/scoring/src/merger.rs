//! Calibration Merger
//!
//! Folds the calibration answer into a designated base answer at half weight
//! so the submitted answer set keeps exactly the base question identifiers.
//!
//! When the merge target is missing, not dual, or incomplete, the calibration
//! evidence is dropped and the base answers are returned unchanged. That is an
//! accepted boundary condition, not an error.

use std::ops::RangeInclusive;

use trait_assessment_core::{TraitDimension, TraitVector};
use tracing::{debug, warn};

use crate::bank::QuestionBank;
use crate::models::{Answer, QuestionId, QuestionKind, ResponseStore, SubmissionPayload};
use crate::scorer::round_half_away;

/// Divisor applied to calibration contributions before merging
pub const CALIBRATION_MERGE_DIVISOR: f64 = 2.0;

/// What the merge did with the calibration evidence
#[derive(Debug, Clone, PartialEq)]
pub enum MergeOutcome {
    /// No calibration answer was present
    NoCalibration,
    /// Delta added to the merge target
    Applied {
        target: QuestionId,
        delta: TraitVector,
    },
    /// Calibration evidence discarded
    Dropped { reason: String },
}

/// Merged answers plus the outcome, for logging and tests
#[derive(Debug, Clone, PartialEq)]
pub struct MergeResult {
    pub answers: ResponseStore,
    pub outcome: MergeOutcome,
}

impl MergeResult {
    pub fn into_payload(self) -> SubmissionPayload {
        SubmissionPayload::new(self.answers)
    }
}

/// Merges calibration evidence into a fixed base answer
#[derive(Debug, Clone)]
pub struct CalibrationMerger {
    base_ids: RangeInclusive<QuestionId>,
    merge_target: QuestionId,
}

impl CalibrationMerger {
    pub fn new(base_ids: RangeInclusive<QuestionId>, merge_target: QuestionId) -> Self {
        Self {
            base_ids,
            merge_target,
        }
    }

    /// Merger configured from a bank's base range and merge target
    pub fn for_bank(bank: &QuestionBank) -> Self {
        Self::new(bank.base_ids(), bank.merge_target_id())
    }

    /// Half-weight delta of a calibration contribution
    pub fn delta(calibration_primary: &TraitVector) -> TraitVector {
        calibration_primary.touched().fold(
            TraitVector::empty(),
            |delta, (dimension, value)| {
                let halved = round_half_away(f64::from(value) / CALIBRATION_MERGE_DIVISOR);
                delta.with(dimension, halved as i32)
            },
        )
    }

    /// Partition the full answer set and merge any calibration answer.
    pub fn merge(&self, responses: &ResponseStore) -> MergeResult {
        let mut base = ResponseStore::new();
        let mut calibration: Vec<(QuestionId, &Answer)> = Vec::new();
        for (id, answer) in responses.iter() {
            if self.base_ids.contains(&id) {
                base.insert_unchecked(id, answer.clone());
            } else {
                calibration.push((id, answer));
            }
        }

        if calibration.len() > 1 {
            warn!(
                ids = ?calibration.iter().map(|(id, _)| *id).collect::<Vec<_>>(),
                "More than one calibration answer present; merging the lowest id only"
            );
        }

        self.merge_with(base, calibration.first().map(|(_, a)| *a))
    }

    /// Merge `calibration` into `base`. `base` must hold only base answers.
    pub fn merge_with(&self, mut base: ResponseStore, calibration: Option<&Answer>) -> MergeResult {
        let Some(calibration) = calibration else {
            return MergeResult {
                answers: base,
                outcome: MergeOutcome::NoCalibration,
            };
        };

        let Some(calibration_primary) = calibration.primary.as_ref() else {
            return Self::dropped(base, "calibration answer has no selection");
        };

        let target = match base.get(self.merge_target) {
            None => Err(format!("merge target {} is unanswered", self.merge_target)),
            Some(answer) if answer.kind != QuestionKind::Dual => Err(format!(
                "merge target {} is not a dual answer",
                self.merge_target
            )),
            Some(answer) if answer.primary.is_none() || answer.secondary.is_none() => {
                Err(format!("merge target {} is incomplete", self.merge_target))
            }
            Some(answer) => Ok(answer.clone()),
        };
        let mut merged = match target {
            Ok(answer) => answer,
            Err(reason) => return Self::dropped(base, reason),
        };

        let delta = Self::delta(calibration_primary);
        if let Some(primary) = merged.primary.as_mut() {
            primary.add(&delta);
        }
        if let Some(secondary) = merged.secondary.as_mut() {
            secondary.add(&delta);
        }
        base.insert_unchecked(self.merge_target, merged);

        debug!(
            target = self.merge_target,
            dimensions = ?delta.touched().map(|(d, _)| d).collect::<Vec<TraitDimension>>(),
            "Merged calibration evidence"
        );

        MergeResult {
            answers: base,
            outcome: MergeOutcome::Applied {
                target: self.merge_target,
                delta,
            },
        }
    }

    fn dropped(base: ResponseStore, reason: impl Into<String>) -> MergeResult {
        let reason = reason.into();
        warn!(reason = %reason, "Dropping calibration evidence");
        MergeResult {
            answers: base,
            outcome: MergeOutcome::Dropped { reason },
        }
    }
}
