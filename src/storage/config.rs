//! JSON Configuration Management
//!
//! Handles reading and writing the assessment configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::models::settings::{AssessmentConfig, SettingsUpdate};
use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::{config_path, ensure_app_dir};

/// Configuration service for managing assessment settings
#[derive(Debug)]
pub struct ConfigService {
    config_path: PathBuf,
    config: AssessmentConfig,
}

impl ConfigService {
    /// Create a new config service, loading existing config or creating defaults
    pub fn new() -> AppResult<Self> {
        ensure_app_dir()?;
        Self::open(config_path()?)
    }

    /// Load the config at `path`, writing defaults there if it does not exist
    pub fn open(config_path: PathBuf) -> AppResult<Self> {
        let config = if config_path.exists() {
            Self::load_from_file(&config_path)?
        } else {
            let default_config = AssessmentConfig::default();
            Self::save_to_file(&config_path, &default_config)?;
            default_config
        };

        debug!(
            path = %config_path.display(),
            retention_days = config.cache_retention_days,
            calibration_enabled = config.calibration_enabled,
            "Loaded assessment config"
        );

        Ok(Self {
            config_path,
            config,
        })
    }

    /// Load configuration from a file
    fn load_from_file(path: &Path) -> AppResult<AssessmentConfig> {
        let content = fs::read_to_string(path)?;
        let config: AssessmentConfig = serde_json::from_str(&content)?;
        config.validate().map_err(AppError::validation)?;
        Ok(config)
    }

    /// Save configuration to a file with pretty formatting
    fn save_to_file(path: &Path, config: &AssessmentConfig) -> AppResult<()> {
        config.validate().map_err(AppError::validation)?;
        let content = serde_json::to_string_pretty(config)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the current configuration
    pub fn get_config(&self) -> &AssessmentConfig {
        &self.config
    }

    /// Update the configuration with a partial update.
    ///
    /// An update that fails validation leaves the current config untouched.
    pub fn update_config(&mut self, update: SettingsUpdate) -> AppResult<AssessmentConfig> {
        let mut candidate = self.config.clone();
        candidate.apply_update(update);
        Self::save_to_file(&self.config_path, &candidate)?;
        self.config = candidate;
        Ok(self.config.clone())
    }

    /// Reload configuration from disk
    pub fn reload(&mut self) -> AppResult<()> {
        self.config = Self::load_from_file(&self.config_path)?;
        Ok(())
    }

    /// Reset configuration to defaults
    pub fn reset(&mut self) -> AppResult<()> {
        self.config = AssessmentConfig::default();
        Self::save_to_file(&self.config_path, &self.config)
    }

    /// Check if the config service is healthy
    pub fn is_healthy(&self) -> bool {
        self.config_path.exists() && self.config.validate().is_ok()
    }
}
