//! Progress Cache
//!
//! Time-boxed persistence of in-progress attempts so a user can resume.
//! A snapshot that fails to parse, has expired, or claims to come from the
//! future is deleted and reported as absent. Those cases are never surfaced
//! as errors; only storage failures are.

use tracing::{debug, warn};

use crate::models::settings::AssessmentConfig;
use crate::models::snapshot::ProgressSnapshot;
use crate::storage::database::Database;
use crate::utils::error::AppResult;

/// Clock skew tolerated before a snapshot counts as "from the future"
pub const FUTURE_TOLERANCE_MS: i64 = 5 * 60 * 1000;

/// Why a cached snapshot was thrown away
#[derive(Debug, Clone, PartialEq)]
pub enum DiscardReason {
    /// Stored payload is not a valid snapshot record
    Malformed(String),
    /// Older than the retention window
    Expired { age_ms: i64 },
    /// Timestamp is ahead of the current clock
    FromFuture { ahead_ms: i64 },
}

impl std::fmt::Display for DiscardReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscardReason::Malformed(e) => write!(f, "malformed snapshot: {}", e),
            DiscardReason::Expired { age_ms } => write!(f, "expired snapshot ({} ms old)", age_ms),
            DiscardReason::FromFuture { ahead_ms } => {
                write!(f, "snapshot timestamp {} ms in the future", ahead_ms)
            }
        }
    }
}

/// SQLite-backed snapshot cache keyed by owner
#[derive(Clone)]
pub struct ProgressCache {
    db: Database,
    retention_ms: i64,
}

impl ProgressCache {
    pub fn new(db: Database, retention_ms: i64) -> Self {
        Self { db, retention_ms }
    }

    pub fn from_config(db: Database, config: &AssessmentConfig) -> Self {
        Self::new(db, config.retention_millis())
    }

    pub fn retention_ms(&self) -> i64 {
        self.retention_ms
    }

    /// Persist `snapshot` as the owner's single in-progress record
    pub fn save(&self, owner: &str, snapshot: &ProgressSnapshot) -> AppResult<()> {
        let payload = serde_json::to_string(snapshot)?;
        self.db.upsert_snapshot(owner, &payload, snapshot.timestamp)?;
        debug!(
            owner,
            index = snapshot.current_question_index,
            answers = snapshot.answers.len(),
            calibration_checked = snapshot.calibration_checked,
            "Saved progress snapshot"
        );
        Ok(())
    }

    /// Load the owner's snapshot if it is still trustworthy at `now_ms`
    pub fn load(&self, owner: &str, now_ms: i64) -> AppResult<Option<ProgressSnapshot>> {
        let Some(row) = self.db.get_snapshot(owner)? else {
            return Ok(None);
        };

        match self.check(&row.payload, now_ms) {
            Ok(snapshot) => {
                debug!(owner, index = snapshot.current_question_index, "Restored progress snapshot");
                Ok(Some(snapshot))
            }
            Err(reason) => {
                self.discard_with_reason(owner, &reason)?;
                Ok(None)
            }
        }
    }

    fn check(&self, payload: &str, now_ms: i64) -> Result<ProgressSnapshot, DiscardReason> {
        let snapshot: ProgressSnapshot = serde_json::from_str(payload)
            .map_err(|e| DiscardReason::Malformed(e.to_string()))?;
        snapshot
            .answers
            .validate()
            .map_err(|e| DiscardReason::Malformed(e.to_string()))?;

        let age_ms = snapshot.age_millis(now_ms).ok_or_else(|| {
            DiscardReason::Malformed(format!("timestamp {} out of range", snapshot.timestamp))
        })?;
        if age_ms > self.retention_ms {
            return Err(DiscardReason::Expired { age_ms });
        }
        let ahead_ms = age_ms.saturating_neg();
        if ahead_ms > FUTURE_TOLERANCE_MS {
            return Err(DiscardReason::FromFuture { ahead_ms });
        }
        Ok(snapshot)
    }

    /// Remove the owner's snapshot, logging why
    pub fn discard_with_reason(&self, owner: &str, reason: &DiscardReason) -> AppResult<()> {
        warn!(owner, reason = %reason, "Discarding cached progress");
        self.db.delete_snapshot(owner)?;
        Ok(())
    }

    /// Remove the owner's snapshot; returns whether one existed
    pub fn discard(&self, owner: &str) -> AppResult<bool> {
        self.db.delete_snapshot(owner)
    }

    /// Delete every snapshot that has outlived the retention window
    pub fn purge_expired(&self, now_ms: i64) -> AppResult<usize> {
        let removed = self.db.delete_snapshots_before(now_ms - self.retention_ms)?;
        if removed > 0 {
            debug!(removed, "Purged expired progress snapshots");
        }
        Ok(removed)
    }
}
