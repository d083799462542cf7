//! Progress Persistence
//!
//! Time-boxed snapshots of in-progress attempts for resume.

pub mod cache;

pub use cache::{DiscardReason, ProgressCache, FUTURE_TOLERANCE_MS};
