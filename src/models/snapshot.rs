//! Progress Snapshot
//!
//! The persisted record of an in-progress attempt. Serialized as camelCase
//! JSON: `{ currentQuestionIndex, answers, calibrationChecked, timestamp }`
//! plus the optional inserted calibration question and attempt id.

use serde::{Deserialize, Serialize};
use trait_assessment_scoring::{QuestionId, ResponseStore};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    /// Position in the question sequence (calibration question included)
    pub current_question_index: usize,
    /// Every answer recorded so far
    pub answers: ResponseStore,
    /// Whether the one-shot midpoint detection already ran
    pub calibration_checked: bool,
    /// Milliseconds since the Unix epoch when the snapshot was taken
    pub timestamp: i64,
    /// Calibration question inserted by the midpoint check, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calibration_question_id: Option<QuestionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempt_id: Option<String>,
}

impl ProgressSnapshot {
    /// Age of the snapshot relative to `now_ms`; `None` when the
    /// difference does not fit in an `i64`
    pub fn age_millis(&self, now_ms: i64) -> Option<i64> {
        now_ms.checked_sub(self.timestamp)
    }
}
