//! Assessment Flow
//!
//! Single-owner state machine for one test attempt: walks the question
//! sequence, collects selections at the input boundary, runs the one-shot
//! midpoint calibration check, and builds the merged submission.

use tracing::{debug, info};
use trait_assessment_core::TraitDimension;
use trait_assessment_scoring::{
    Answer, CalibrationMerger, CalibrationSelector, MergeOutcome, Question, QuestionBank,
    QuestionId, QuestionKind, QuestionOption, ResponseStore, ScoreReport, SubmissionPayload, TraitScorer,
    WeakSignalDetector,
};
use uuid::Uuid;

use crate::models::snapshot::ProgressSnapshot;
use crate::utils::error::{AppError, AppResult};

/// Result of moving past the current question
#[derive(Debug, Clone, PartialEq)]
pub struct AdvanceOutcome {
    /// Question now current; `None` when the last question was just answered
    pub next_question: Option<QuestionId>,
    /// Calibration question inserted by this step's midpoint check
    pub inserted_calibration: Option<QuestionId>,
}

/// Everything produced at submission time
#[derive(Debug, Clone)]
pub struct Submission {
    /// Base answers with calibration evidence merged in
    pub payload: SubmissionPayload,
    /// Scores of the merged answer set
    pub scores: ScoreReport,
    /// What happened to the calibration evidence
    pub merge: MergeOutcome,
}

/// In-progress attempt
#[derive(Debug, Clone)]
pub struct AssessmentFlow<'b> {
    bank: &'b QuestionBank,
    attempt_id: String,
    current_index: usize,
    responses: ResponseStore,
    calibration_checked: bool,
    calibration_question: Option<QuestionId>,
    calibration_enabled: bool,
}

impl<'b> AssessmentFlow<'b> {
    /// Start a fresh attempt at the first base question
    pub fn new(bank: &'b QuestionBank) -> Self {
        Self {
            bank,
            attempt_id: Uuid::new_v4().to_string(),
            current_index: 0,
            responses: ResponseStore::new(),
            calibration_checked: false,
            calibration_question: None,
            calibration_enabled: true,
        }
    }

    /// Disable insertion while keeping the one-shot check itself
    pub fn with_calibration_enabled(mut self, enabled: bool) -> Self {
        self.calibration_enabled = enabled;
        self
    }

    pub fn attempt_id(&self) -> &str {
        &self.attempt_id
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn responses(&self) -> &ResponseStore {
        &self.responses
    }

    pub fn calibration_checked(&self) -> bool {
        self.calibration_checked
    }

    pub fn calibration_question(&self) -> Option<QuestionId> {
        self.calibration_question
    }

    /// Dimension targeted by the inserted calibration question
    pub fn calibration_dimension(&self) -> Option<TraitDimension> {
        self.calibration_question
            .and_then(|id| self.bank.calibration_question(id))
            .map(|c| c.dimension)
    }

    /// Question order: base ids with any calibration question placed
    /// directly after the midpoint question.
    pub fn sequence(&self) -> Vec<QuestionId> {
        let mut sequence: Vec<QuestionId> = self.bank.base_ids().collect();
        if let Some(calibration) = self.calibration_question {
            let position = self.midpoint_position().map_or(sequence.len(), |i| i + 1);
            sequence.insert(position, calibration);
        }
        sequence
    }

    fn midpoint_position(&self) -> Option<usize> {
        self.bank
            .base_ids()
            .position(|id| id == self.bank.midpoint_id())
    }

    pub fn total_questions(&self) -> usize {
        self.sequence().len()
    }

    pub fn current_question_id(&self) -> Option<QuestionId> {
        self.sequence().get(self.current_index).copied()
    }

    pub fn current_question(&self) -> AppResult<&'b Question> {
        let id = self
            .current_question_id()
            .ok_or_else(|| AppError::internal("question index is past the end of the sequence"))?;
        Ok(self.bank.require_question(id)?)
    }

    fn current_question_of_kind(&self, kind: QuestionKind) -> AppResult<&'b Question> {
        let question = self.current_question()?;
        if question.kind != kind {
            return Err(AppError::validation(format!(
                "question {} is {}, not {}",
                question.id, question.kind, kind
            )));
        }
        Ok(question)
    }

    /// Choose an option on the current single-choice question
    pub fn select_single(&mut self, value: &str) -> AppResult<()> {
        let question = self.current_question_of_kind(QuestionKind::Single)?;
        let option = question.require_option(value)?;
        self.responses.record(question.id, Answer::single(option))?;
        Ok(())
    }

    /// Choose the "most like me" option on the current dual question
    pub fn select_most_like(&mut self, value: &str) -> AppResult<()> {
        let question = self.current_question_of_kind(QuestionKind::Dual)?;
        let option = question.require_option(value)?;
        let mut answer = self.pending_dual(question.id);
        answer.set_most_like(option)?;
        self.responses.record(question.id, answer)?;
        Ok(())
    }

    /// Choose the "second most like me" option on the current dual question
    pub fn select_second_like(&mut self, value: &str) -> AppResult<()> {
        let question = self.current_question_of_kind(QuestionKind::Dual)?;
        let option = question.require_option(value)?;
        let mut answer = self.pending_dual(question.id);
        answer.set_second_like(option)?;
        self.responses.record(question.id, answer)?;
        Ok(())
    }

    fn pending_dual(&self, id: QuestionId) -> Answer {
        self.responses
            .get(id)
            .filter(|a| a.kind == QuestionKind::Dual)
            .cloned()
            .unwrap_or_else(Answer::dual_pending)
    }

    /// Move to the next question. The current answer must be complete.
    pub fn advance(&mut self) -> AppResult<AdvanceOutcome> {
        let current = self.current_question()?;
        let complete = self
            .responses
            .get(current.id)
            .is_some_and(Answer::is_complete);
        if !complete {
            return Err(AppError::validation(format!(
                "question {} is not fully answered",
                current.id
            )));
        }

        let inserted_calibration = if current.id == self.bank.midpoint_id() {
            self.run_midpoint_check()
        } else {
            None
        };

        let next_question = if self.current_index + 1 < self.total_questions() {
            self.current_index += 1;
            self.current_question_id()
        } else {
            None
        };

        Ok(AdvanceOutcome {
            next_question,
            inserted_calibration,
        })
    }

    /// Step back one question; returns the new current question
    pub fn go_back(&mut self) -> Option<QuestionId> {
        if self.current_index == 0 {
            return None;
        }
        self.current_index -= 1;
        self.current_question_id()
    }

    /// One-shot weak-signal detection and calibration insertion.
    ///
    /// Latches `calibration_checked` on the first call; later calls are
    /// no-ops, so back/forward navigation over the midpoint cannot detect or
    /// insert twice.
    pub fn run_midpoint_check(&mut self) -> Option<QuestionId> {
        if self.calibration_checked {
            debug!(attempt_id = %self.attempt_id, "Midpoint check already ran");
            return None;
        }
        self.calibration_checked = true;

        let report = TraitScorer::score(&self.responses);
        let weak = WeakSignalDetector::detect_report(&report);
        info!(
            attempt_id = %self.attempt_id,
            weak = ?weak,
            "Midpoint weak-signal check"
        );

        if !self.calibration_enabled {
            return None;
        }

        let question = CalibrationSelector::select_question(self.bank, &weak)?;
        self.calibration_question = Some(question.id);
        info!(
            attempt_id = %self.attempt_id,
            question_id = question.id,
            "Inserted calibration question"
        );
        Some(question.id)
    }

    /// Percentage of the current sequence with a complete answer
    pub fn progress(&self) -> f64 {
        let sequence = self.sequence();
        let answered = sequence
            .iter()
            .filter(|id| self.responses.get(**id).is_some_and(Answer::is_complete))
            .count();
        (answered as f64 / sequence.len() as f64) * 100.0
    }

    fn unanswered_base_questions(&self) -> Vec<QuestionId> {
        self.bank
            .base_ids()
            .filter(|id| !self.responses.get(*id).is_some_and(Answer::is_complete))
            .collect()
    }

    /// Whether every base question has a complete answer
    pub fn is_ready_to_submit(&self) -> bool {
        self.unanswered_base_questions().is_empty()
    }

    /// Merge calibration evidence and build the classifier payload
    pub fn submission(&self) -> AppResult<Submission> {
        let missing = self.unanswered_base_questions();
        if !missing.is_empty() {
            return Err(AppError::validation(format!(
                "cannot submit with unanswered questions {:?}",
                missing
            )));
        }

        let result = CalibrationMerger::for_bank(self.bank).merge(&self.responses);
        let scores = TraitScorer::score(&result.answers);
        let merge = result.outcome.clone();
        Ok(Submission {
            payload: result.into_payload(),
            scores,
            merge,
        })
    }

    /// Snapshot for the progress cache
    pub fn snapshot(&self, now_ms: i64) -> ProgressSnapshot {
        ProgressSnapshot {
            current_question_index: self.current_index,
            answers: self.responses.clone(),
            calibration_checked: self.calibration_checked,
            timestamp: now_ms,
            calibration_question_id: self.calibration_question,
            attempt_id: Some(self.attempt_id.clone()),
        }
    }

    /// Rebuild an attempt from a cached snapshot.
    ///
    /// The answers, the checked flag and the inserted calibration question
    /// are restored together; a snapshot whose parts disagree is rejected.
    pub fn restore(
        bank: &'b QuestionBank,
        snapshot: ProgressSnapshot,
        calibration_enabled: bool,
    ) -> AppResult<Self> {
        snapshot.answers.validate()?;

        if let Some(id) = snapshot.calibration_question_id {
            if !bank.is_calibration(id) {
                return Err(AppError::validation(format!(
                    "question {} is not a calibration question",
                    id
                )));
            }
            if !snapshot.calibration_checked {
                return Err(AppError::validation(
                    "calibration question present but midpoint check not recorded",
                ));
            }
        }

        for (id, answer) in snapshot.answers.iter() {
            let question = bank.require_question(id)?;
            if bank.is_calibration(id) && snapshot.calibration_question_id != Some(id) {
                return Err(AppError::validation(format!(
                    "answer to calibration question {} that was never inserted",
                    id
                )));
            }
            if answer.kind != question.kind {
                return Err(AppError::validation(format!(
                    "answer to question {} is {}, question is {}",
                    id, answer.kind, question.kind
                )));
            }
            if rebuild_answer(question, answer)? != *answer {
                return Err(AppError::validation(format!(
                    "answer to question {} does not match its chosen options",
                    id
                )));
            }
        }

        let flow = Self {
            bank,
            attempt_id: snapshot
                .attempt_id
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            current_index: snapshot.current_question_index,
            responses: snapshot.answers,
            calibration_checked: snapshot.calibration_checked,
            calibration_question: snapshot.calibration_question_id,
            calibration_enabled,
        };

        if flow.current_index >= flow.total_questions() {
            return Err(AppError::validation(format!(
                "question index {} is outside a {}-question sequence",
                flow.current_index,
                flow.total_questions()
            )));
        }
        if let Some(midpoint) = flow.midpoint_position() {
            if !flow.calibration_checked && flow.current_index > midpoint {
                return Err(AppError::validation(
                    "snapshot is past the midpoint without a recorded midpoint check",
                ));
            }
        }

        Ok(flow)
    }
}

/// Re-derive a stored answer from the bank using only its choice tags
fn rebuild_answer(question: &Question, stored: &Answer) -> AppResult<Answer> {
    match question.kind {
        QuestionKind::Single => {
            let option = stored_choice(question, stored.primary_choice.as_deref(), "most-like")?;
            Ok(Answer::single(option))
        }
        QuestionKind::Dual => {
            let mut answer = Answer::dual_pending();
            if stored.primary.is_some() || stored.primary_choice.is_some() {
                let option =
                    stored_choice(question, stored.primary_choice.as_deref(), "most-like")?;
                answer.set_most_like(option)?;
            }
            if stored.secondary.is_some() || stored.secondary_choice.is_some() {
                let option =
                    stored_choice(question, stored.secondary_choice.as_deref(), "second-like")?;
                answer.set_second_like(option)?;
            }
            Ok(answer)
        }
    }
}

fn stored_choice<'q>(
    question: &'q Question,
    value: Option<&str>,
    role: &str,
) -> AppResult<&'q QuestionOption> {
    let value = value.ok_or_else(|| {
        AppError::validation(format!(
            "answer to question {} has no {} option recorded",
            question.id, role
        ))
    })?;
    Ok(question.require_option(value)?)
}
