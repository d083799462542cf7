//! Question Bank
//!
//! Read-only catalog of base scenario questions and per-dimension calibration
//! questions. Building or fetching the bank has no side effects; catalog
//! checks are an explicit `validate()` call made by whoever loads it.

use std::collections::HashSet;
use std::ops::RangeInclusive;
use std::sync::OnceLock;

use trait_assessment_core::{CoreError, CoreResult, TraitDimension, TraitMap};

use crate::catalog;
use crate::models::{Question, QuestionId};

/// Smallest trait value a single option may contribute
pub const MIN_OPTION_CONTRIBUTION: i32 = 1;
/// Largest trait value a single option may contribute
pub const MAX_OPTION_CONTRIBUTION: i32 = 4;

/// Base question after which weak-signal detection runs
pub const MIDPOINT_QUESTION_ID: QuestionId = 6;
/// Base question that absorbs calibration evidence before submission
pub const MERGE_TARGET_ID: QuestionId = 12;

/// A calibration question and the dimension it measures
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationQuestion {
    pub dimension: TraitDimension,
    pub question: Question,
}

impl CalibrationQuestion {
    pub fn new(dimension: TraitDimension, question: Question) -> Self {
        Self {
            dimension,
            question,
        }
    }
}

/// Static question catalog
#[derive(Debug, Clone)]
pub struct QuestionBank {
    base: Vec<Question>,
    calibration: Vec<CalibrationQuestion>,
    midpoint_id: QuestionId,
    merge_target_id: QuestionId,
}

impl QuestionBank {
    /// Create a bank from explicit tables. Call `validate()` before use.
    pub fn new(
        base: Vec<Question>,
        calibration: Vec<CalibrationQuestion>,
        midpoint_id: QuestionId,
        merge_target_id: QuestionId,
    ) -> Self {
        Self {
            base,
            calibration,
            midpoint_id,
            merge_target_id,
        }
    }

    /// The shipped catalog, built once per process
    pub fn reference() -> &'static QuestionBank {
        static BANK: OnceLock<QuestionBank> = OnceLock::new();
        BANK.get_or_init(|| {
            QuestionBank::new(
                catalog::base_questions(),
                catalog::calibration_questions(),
                MIDPOINT_QUESTION_ID,
                MERGE_TARGET_ID,
            )
        })
    }

    pub fn base_questions(&self) -> &[Question] {
        &self.base
    }

    pub fn calibration_questions(&self) -> &[CalibrationQuestion] {
        &self.calibration
    }

    pub fn base_count(&self) -> usize {
        self.base.len()
    }

    /// Base identifiers, always `1..=N`
    pub fn base_ids(&self) -> RangeInclusive<QuestionId> {
        1..=self.base.len() as QuestionId
    }

    pub fn midpoint_id(&self) -> QuestionId {
        self.midpoint_id
    }

    pub fn merge_target_id(&self) -> QuestionId {
        self.merge_target_id
    }

    pub fn is_base(&self, id: QuestionId) -> bool {
        self.base_ids().contains(&id)
    }

    pub fn is_calibration(&self, id: QuestionId) -> bool {
        self.calibration.iter().any(|c| c.question.id == id)
    }

    /// Look up a base or calibration question
    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.base
            .iter()
            .find(|q| q.id == id)
            .or_else(|| self.calibration_question(id).map(|c| &c.question))
    }

    pub fn require_question(&self, id: QuestionId) -> CoreResult<&Question> {
        self.question(id)
            .ok_or_else(|| CoreError::not_found(format!("question {}", id)))
    }

    pub fn calibration_question(&self, id: QuestionId) -> Option<&CalibrationQuestion> {
        self.calibration.iter().find(|c| c.question.id == id)
    }

    /// Calibration question targeting `dimension`
    pub fn calibration_for(&self, dimension: TraitDimension) -> Option<&Question> {
        self.calibration
            .iter()
            .find(|c| c.dimension == dimension)
            .map(|c| &c.question)
    }

    /// How many base options touch each dimension
    pub fn coverage(&self) -> TraitMap<usize> {
        let mut coverage = TraitMap::splat(0usize);
        for option in self.base.iter().flat_map(|q| q.options.iter()) {
            for (dimension, _) in option.traits.touched() {
                *coverage.get_mut(dimension) += 1;
            }
        }
        coverage
    }

    /// Check the structural guarantees the scoring pipeline relies on.
    pub fn validate(&self) -> CoreResult<()> {
        if self.base.is_empty() {
            return Err(CoreError::validation("question bank has no base questions"));
        }

        for (index, question) in self.base.iter().enumerate() {
            let expected = index as QuestionId + 1;
            if question.id != expected {
                return Err(CoreError::validation(format!(
                    "base question at position {} has id {}, expected {}",
                    index, question.id, expected
                )));
            }
        }

        let mut seen_dimensions = HashSet::new();
        for calibration in &self.calibration {
            let id = calibration.question.id;
            if self.is_base(id) {
                return Err(CoreError::validation(format!(
                    "calibration question {} overlaps the base id range",
                    id
                )));
            }
            if !seen_dimensions.insert(calibration.dimension) {
                return Err(CoreError::validation(format!(
                    "more than one calibration question for {}",
                    calibration.dimension
                )));
            }
        }
        if let Some(missing) = TraitDimension::ALL
            .iter()
            .find(|d| !seen_dimensions.contains(*d))
        {
            return Err(CoreError::validation(format!(
                "no calibration question for {}",
                missing
            )));
        }

        let all_questions = self
            .base
            .iter()
            .chain(self.calibration.iter().map(|c| &c.question));
        for question in all_questions {
            Self::validate_question(question)?;
        }

        if !self.is_base(self.midpoint_id) || self.midpoint_id >= self.merge_target_id {
            return Err(CoreError::validation(format!(
                "midpoint question {} must be a base question before the merge target",
                self.midpoint_id
            )));
        }

        let target = self
            .question(self.merge_target_id)
            .filter(|q| self.is_base(q.id))
            .ok_or_else(|| {
                CoreError::validation(format!(
                    "merge target {} is not a base question",
                    self.merge_target_id
                ))
            })?;
        if !target.is_dual() {
            return Err(CoreError::validation(format!(
                "merge target {} must be a dual question",
                target.id
            )));
        }

        Ok(())
    }

    fn validate_question(question: &Question) -> CoreResult<()> {
        let min_options = if question.is_dual() { 2 } else { 1 };
        if question.options.len() < min_options {
            return Err(CoreError::validation(format!(
                "question {} needs at least {} options",
                question.id, min_options
            )));
        }

        let mut values = HashSet::new();
        for option in &question.options {
            if !values.insert(option.value.as_str()) {
                return Err(CoreError::validation(format!(
                    "question {} repeats option value '{}'",
                    question.id, option.value
                )));
            }
            if option.traits.is_empty() {
                return Err(CoreError::validation(format!(
                    "option '{}' on question {} carries no trait contribution",
                    option.value, question.id
                )));
            }
            for (dimension, value) in option.traits.touched() {
                if !(MIN_OPTION_CONTRIBUTION..=MAX_OPTION_CONTRIBUTION).contains(&value) {
                    return Err(CoreError::validation(format!(
                        "option '{}' on question {} gives {} = {}, outside {}..={}",
                        option.value,
                        question.id,
                        dimension,
                        value,
                        MIN_OPTION_CONTRIBUTION,
                        MAX_OPTION_CONTRIBUTION
                    )));
                }
            }
        }
        Ok(())
    }
}
