//! Settings Models
//!
//! Assessment configuration and settings data structures.

use serde::{Deserialize, Serialize};

/// Default number of days an in-progress snapshot stays resumable
pub const DEFAULT_CACHE_RETENTION_DAYS: u32 = 7;

/// Assessment configuration stored in config.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentConfig {
    /// Days before a cached in-progress snapshot expires
    #[serde(default = "default_cache_retention_days")]
    pub cache_retention_days: u32,
    /// Insert a calibration question when the midpoint check finds a weak signal
    #[serde(default = "default_true")]
    pub calibration_enabled: bool,
    /// Offer to resume a cached attempt instead of starting fresh
    #[serde(default = "default_true")]
    pub resume_enabled: bool,
}

fn default_cache_retention_days() -> u32 {
    DEFAULT_CACHE_RETENTION_DAYS
}

fn default_true() -> bool {
    true
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            cache_retention_days: DEFAULT_CACHE_RETENTION_DAYS,
            calibration_enabled: true,
            resume_enabled: true,
        }
    }
}

/// Settings update request (partial update)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SettingsUpdate {
    pub cache_retention_days: Option<u32>,
    pub calibration_enabled: Option<bool>,
    pub resume_enabled: Option<bool>,
}

impl AssessmentConfig {
    /// Apply a partial update to the configuration
    pub fn apply_update(&mut self, update: SettingsUpdate) {
        if let Some(days) = update.cache_retention_days {
            self.cache_retention_days = days;
        }
        if let Some(enabled) = update.calibration_enabled {
            self.calibration_enabled = enabled;
        }
        if let Some(enabled) = update.resume_enabled {
            self.resume_enabled = enabled;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.cache_retention_days == 0 {
            return Err("cache_retention_days must be at least 1".to_string());
        }
        if self.cache_retention_days > 365 {
            return Err("cache_retention_days cannot exceed 365".to_string());
        }
        Ok(())
    }

    /// Retention window in milliseconds
    pub fn retention_millis(&self) -> i64 {
        chrono::Duration::days(i64::from(self.cache_retention_days)).num_milliseconds()
    }
}
