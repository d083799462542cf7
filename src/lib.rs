//! Trait Assessment
//!
//! Scenario-based personality assessment backend. It includes:
//! - The attempt flow with one-shot midpoint calibration
//! - Progress persistence (SQLite) and configuration (JSON)
//! - Data models and utilities
//!
//! The scoring engine lives in `trait-assessment-scoring`; dimension and
//! error primitives in `trait-assessment-core`.

pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

// ── Engine ─────────────────────────────────────────────────────────────
pub use trait_assessment_core::{TraitDimension, TraitMap, TraitVector};
pub use trait_assessment_scoring::{
    Answer, MergeOutcome, Question, QuestionBank, QuestionId, QuestionKind, ResponseStore,
    ScoreReport, SubmissionPayload,
};

// ── Services ───────────────────────────────────────────────────────────
pub use services::assessment::{
    AdvanceOutcome, ArchetypeClassifier, AssessmentFlow, AssessmentService, Submission,
};
pub use services::progress::{DiscardReason, ProgressCache};

// ── Models & Storage ───────────────────────────────────────────────────
pub use models::settings::{AssessmentConfig, SettingsUpdate};
pub use models::snapshot::ProgressSnapshot;
pub use storage::{ConfigService, Database};
pub use utils::error::{AppError, AppResult};
