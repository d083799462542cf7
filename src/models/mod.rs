//! Data Models
//!
//! Configuration and persisted-progress types for the root crate. Engine
//! types (questions, answers, scores) live in `trait-assessment-scoring`.

pub mod settings;
pub mod snapshot;

pub use settings::{AssessmentConfig, SettingsUpdate, DEFAULT_CACHE_RETENTION_DAYS};
pub use snapshot::ProgressSnapshot;
