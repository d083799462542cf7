//! Calibration Selector
//!
//! Picks the single highest-priority weak dimension. The priority list is a
//! total order over all six dimensions, least covered by the base catalog
//! first, so the choice never depends on input order.

use trait_assessment_core::TraitDimension;
use tracing::debug;

use crate::bank::QuestionBank;
use crate::models::Question;

/// Calibration priority, highest first
pub const CALIBRATION_PRIORITY: [TraitDimension; 6] = [
    TraitDimension::Openness,
    TraitDimension::Conscientiousness,
    TraitDimension::EmotionalStability,
    TraitDimension::Positivity,
    TraitDimension::Affinity,
    TraitDimension::Extraversion,
];

/// Stateless calibration selector
pub struct CalibrationSelector;

impl CalibrationSelector {
    /// Position of `dimension` in the priority list (0 = highest)
    pub fn priority(dimension: TraitDimension) -> usize {
        CALIBRATION_PRIORITY
            .iter()
            .position(|d| *d == dimension)
            .unwrap_or(CALIBRATION_PRIORITY.len())
    }

    /// Highest-priority weak dimension, or `None` when nothing is weak
    pub fn select(weak: &[TraitDimension]) -> Option<TraitDimension> {
        weak.iter().copied().min_by_key(|d| Self::priority(*d))
    }

    /// Calibration question for the highest-priority weak dimension
    pub fn select_question<'a>(
        bank: &'a QuestionBank,
        weak: &[TraitDimension],
    ) -> Option<&'a Question> {
        let dimension = Self::select(weak)?;
        let question = bank.calibration_for(dimension);
        debug!(
            dimension = %dimension,
            question_id = question.map(|q| q.id),
            "Selected calibration dimension"
        );
        question
    }
}
