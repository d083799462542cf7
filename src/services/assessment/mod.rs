//! Assessment
//!
//! The per-attempt flow state machine and the service that connects it to
//! progress persistence and classification.

pub mod flow;
pub mod service;

pub use flow::{AdvanceOutcome, AssessmentFlow, Submission};
pub use service::{now_millis, ArchetypeClassifier, AssessmentService};
