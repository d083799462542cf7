//! Services
//!
//! - `assessment` - Attempt flow and service orchestration
//! - `progress` - Resumable progress snapshots

pub mod assessment;
pub mod progress;
