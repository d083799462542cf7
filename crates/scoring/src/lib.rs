//! Trait Assessment Scoring
//!
//! The pure assessment engine. Everything here is synchronous, side-effect
//! free (apart from `tracing` events) and independent of storage:
//!
//! - `models` - Questions, options, answers, `ResponseStore`, `SubmissionPayload`
//! - `bank` - `QuestionBank` and its explicit validation
//! - `catalog` - The shipped reference questions
//! - `scorer` - `TraitScorer`: responses to normalized scores and exposure
//! - `detector` - `WeakSignalDetector`: thin, floor-valued dimensions
//! - `selector` - `CalibrationSelector`: deterministic priority pick
//! - `merger` - `CalibrationMerger`: fold calibration evidence into a base answer
//!
//! Flow sequencing and progress persistence live in the root crate.

pub mod bank;
pub mod catalog;
pub mod detector;
pub mod merger;
pub mod models;
pub mod scorer;
pub mod selector;

// Re-export model types
pub use models::{
    Answer, Question, QuestionId, QuestionKind, QuestionOption, ResponseStore, SubmissionPayload,
};

// Re-export bank
pub use bank::{
    CalibrationQuestion, QuestionBank, MAX_OPTION_CONTRIBUTION, MERGE_TARGET_ID,
    MIDPOINT_QUESTION_ID, MIN_OPTION_CONTRIBUTION,
};

// Re-export pipeline stages
pub use detector::{weak_signal_ceiling, WeakSignalDetector};
pub use merger::{CalibrationMerger, MergeOutcome, MergeResult};
pub use scorer::{normalize, ScoreReport, TraitAccumulation, TraitScorer, NEUTRAL_SCORE};
pub use selector::{CalibrationSelector, CALIBRATION_PRIORITY};
