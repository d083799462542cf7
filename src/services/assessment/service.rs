//! Assessment Service
//!
//! Ties the flow to the progress cache and to an archetype classifier:
//! start (fresh or resumed), checkpoint, submit, abandon.

use tracing::{debug, info};
use trait_assessment_scoring::{QuestionBank, ScoreReport, SubmissionPayload};

use crate::models::settings::AssessmentConfig;
use crate::services::progress::{DiscardReason, ProgressCache};
use crate::storage::{ConfigService, Database};
use crate::utils::error::{AppError, AppResult};

use super::flow::AssessmentFlow;

/// Maps a merged submission to a result. Implemented outside this crate.
pub trait ArchetypeClassifier {
    type Output;

    fn classify(
        &self,
        payload: &SubmissionPayload,
        scores: &ScoreReport,
    ) -> AppResult<Self::Output>;
}

/// Current wall-clock time in milliseconds since the Unix epoch
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Assessment orchestration for one question bank
pub struct AssessmentService<'b> {
    bank: &'b QuestionBank,
    cache: ProgressCache,
    config: AssessmentConfig,
}

impl<'b> AssessmentService<'b> {
    /// Validate the bank and config, then build the service
    pub fn new(bank: &'b QuestionBank, db: Database, config: AssessmentConfig) -> AppResult<Self> {
        bank.validate()?;
        config.validate().map_err(AppError::config)?;
        debug!(
            base_questions = bank.base_count(),
            calibration_questions = bank.calibration_questions().len(),
            coverage = ?bank.coverage(),
            "Question bank validated"
        );

        let cache = ProgressCache::from_config(db, &config);
        Ok(Self {
            bank,
            cache,
            config,
        })
    }

    /// Build from the default on-disk config and database
    pub fn initialize(bank: &'b QuestionBank) -> AppResult<Self> {
        let config = ConfigService::new()?.get_config().clone();
        let db = Database::new()?;
        Self::new(bank, db, config)
    }

    pub fn bank(&self) -> &'b QuestionBank {
        self.bank
    }

    pub fn config(&self) -> &AssessmentConfig {
        &self.config
    }

    pub fn cache(&self) -> &ProgressCache {
        &self.cache
    }

    pub fn start(&self, owner: &str) -> AppResult<AssessmentFlow<'b>> {
        self.start_at(owner, now_millis())
    }

    /// Resume the owner's cached attempt when it is still valid, otherwise
    /// start fresh. An unusable snapshot is deleted.
    pub fn start_at(&self, owner: &str, now_ms: i64) -> AppResult<AssessmentFlow<'b>> {
        if self.config.resume_enabled {
            if let Some(snapshot) = self.cache.load(owner, now_ms)? {
                match AssessmentFlow::restore(self.bank, snapshot, self.config.calibration_enabled) {
                    Ok(flow) => {
                        info!(
                            owner,
                            attempt_id = flow.attempt_id(),
                            index = flow.current_index(),
                            "Resumed assessment"
                        );
                        return Ok(flow);
                    }
                    Err(e) => {
                        self.cache
                            .discard_with_reason(owner, &DiscardReason::Malformed(e.to_string()))?;
                    }
                }
            }
        }

        let flow = AssessmentFlow::new(self.bank)
            .with_calibration_enabled(self.config.calibration_enabled);
        info!(owner, attempt_id = flow.attempt_id(), "Started assessment");
        Ok(flow)
    }

    pub fn checkpoint(&self, owner: &str, flow: &AssessmentFlow<'_>) -> AppResult<()> {
        self.checkpoint_at(owner, flow, now_millis())
    }

    /// Save the flow as the owner's in-progress snapshot
    pub fn checkpoint_at(
        &self,
        owner: &str,
        flow: &AssessmentFlow<'_>,
        now_ms: i64,
    ) -> AppResult<()> {
        self.cache.save(owner, &flow.snapshot(now_ms))
    }

    /// Merge, classify, and clear the owner's cached progress.
    ///
    /// The cache is only cleared once classification succeeds, so a failed
    /// submission can still be resumed.
    pub fn submit<C>(
        &self,
        owner: &str,
        flow: &AssessmentFlow<'_>,
        classifier: &C,
    ) -> AppResult<C::Output>
    where
        C: ArchetypeClassifier,
    {
        let submission = flow.submission()?;
        debug!(
            attempt_id = flow.attempt_id(),
            merge = ?submission.merge,
            "Built submission payload"
        );

        let output = classifier.classify(&submission.payload, &submission.scores)?;
        self.cache.discard(owner)?;
        info!(owner, attempt_id = flow.attempt_id(), "Submitted assessment");
        Ok(output)
    }

    /// Drop the owner's cached progress; returns whether any existed
    pub fn abandon(&self, owner: &str) -> AppResult<bool> {
        let removed = self.cache.discard(owner)?;
        if removed {
            info!(owner, "Abandoned cached assessment");
        }
        Ok(removed)
    }

    pub fn purge_expired(&self) -> AppResult<usize> {
        self.cache.purge_expired(now_millis())
    }
}
