//! Trait Scorer
//!
//! Reduces a `ResponseStore` into a normalized 50..=100 score and a
//! fractional exposure count per dimension.
//!
//! Rounding is half-away-from-zero (`f64::round`) here and in the calibration
//! merge, so 56.25 becomes 56 and 0.5 becomes 1.

use serde::{Deserialize, Serialize};
use trait_assessment_core::{ExposureCounts, NormalizedTraitVector, TraitMap, TraitVector};

use crate::bank::MAX_OPTION_CONTRIBUTION;
use crate::models::ResponseStore;

/// Score of a dimension with no evidence
pub const NEUTRAL_SCORE: u8 = 50;
/// Upper bound of a normalized score
pub const MAX_SCORE: u8 = 100;
/// Points added on top of the neutral score for an average of `TRAIT_SCALE`
pub const SCORE_SPAN: f64 = 25.0;
/// Average contribution that maps to the full `SCORE_SPAN`
pub const TRAIT_SCALE: f64 = MAX_OPTION_CONTRIBUTION as f64;

/// Exposure weight of a single-choice or most-like selection
pub const PRIMARY_WEIGHT: f64 = 1.0;
/// Exposure weight (and contribution multiplier) of a second-like selection
pub const SECONDARY_WEIGHT: f64 = 0.5;

/// Round half away from zero, the convention shared by scoring and merging
pub fn round_half_away(value: f64) -> i64 {
    value.round() as i64
}

/// Map an accumulated total and exposure to the 50..=100 scale.
///
/// Zero exposure yields exactly the neutral score.
pub fn normalize(total: f64, count: f64) -> u8 {
    if count <= 0.0 {
        return NEUTRAL_SCORE;
    }
    let average = total / count;
    let raw = f64::from(NEUTRAL_SCORE) + (average / TRAIT_SCALE) * SCORE_SPAN;
    round_half_away(raw).clamp(i64::from(NEUTRAL_SCORE), i64::from(MAX_SCORE)) as u8
}

/// Raw sums of contributions and exposure weights
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TraitAccumulation {
    pub totals: TraitMap<f64>,
    pub counts: ExposureCounts,
}

impl TraitAccumulation {
    /// Accumulate every answer in the store.
    ///
    /// Only dimensions an option actually touches receive exposure.
    pub fn from_responses(responses: &ResponseStore) -> Self {
        let mut acc = Self::default();
        for (_, answer) in responses.iter() {
            if let Some(primary) = &answer.primary {
                acc.add(primary, PRIMARY_WEIGHT);
            }
            if let Some(secondary) = &answer.secondary {
                acc.add(secondary, SECONDARY_WEIGHT);
            }
        }
        acc
    }

    fn add(&mut self, contribution: &TraitVector, weight: f64) {
        for (dimension, value) in contribution.touched() {
            *self.totals.get_mut(dimension) += f64::from(value) * weight;
            *self.counts.get_mut(dimension) += weight;
        }
    }

    pub fn normalized(&self) -> NormalizedTraitVector {
        TraitMap::from_fn(|d| normalize(*self.totals.get(d), *self.counts.get(d)))
    }
}

/// Scorer output: normalized scores plus the exposure behind them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub normalized: NormalizedTraitVector,
    pub counts: ExposureCounts,
}

/// Stateless trait scorer
pub struct TraitScorer;

impl TraitScorer {
    /// Score a response store. Pure; an empty store scores 50 everywhere.
    pub fn score(responses: &ResponseStore) -> ScoreReport {
        let acc = TraitAccumulation::from_responses(responses);
        ScoreReport {
            normalized: acc.normalized(),
            counts: acc.counts,
        }
    }
}
