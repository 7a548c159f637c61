//! Deck tuning: thresholds, durations and springs

use crate::animation::{SpringConfig, TimingFunction};
use crate::error::{DeckError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    /// Fraction of the viewport width a release must exceed to commit
    pub swipe_threshold_ratio: f32,
    /// Duration of the off-screen animation
    pub swipe_out_duration_ms: f32,
    pub swipe_easing: TimingFunction,
    /// Vertical offset between stacked cards
    pub stack_offset: f32,
    /// Rotation at the edge of the rotation range
    pub max_rotation_deg: f32,
    /// Rotation saturates at this multiple of the viewport width
    pub rotation_range_ratio: f32,
    /// Spring that returns an uncommitted card to center
    pub reset_spring: SpringConfig,
    /// Spring that moves the stack up after a card leaves
    pub layout_spring: SpringConfig,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            swipe_threshold_ratio: 0.25,
            swipe_out_duration_ms: 250.0,
            swipe_easing: TimingFunction::EaseInOut,
            stack_offset: 10.0,
            max_rotation_deg: 120.0,
            rotation_range_ratio: 1.5,
            reset_spring: SpringConfig::DEFAULT,
            layout_spring: SpringConfig::BOUNCY,
        }
    }
}

impl DeckConfig {
    /// Get the config file path (~/.config/swipedeck/config.json)
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("swipedeck").join("config.json"))
    }

    /// Load config from the default location, or defaults if it doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path().ok_or_else(|| {
            DeckError::ConfigError("Could not determine config directory".to_string())
        })?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            DeckError::ConfigError(format!("Failed to read config file: {}", e))
        })?;

        let config: Self = serde_json::from_str(&contents).map_err(|e| {
            DeckError::ConfigError(format!("Failed to parse config file: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Save to the default location and return the path written
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path().ok_or_else(|| {
            DeckError::ConfigError("Could not determine config directory".to_string())
        })?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                DeckError::ConfigError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            DeckError::ConfigError(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, contents).map_err(|e| {
            DeckError::ConfigError(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.swipe_threshold_ratio.is_finite()
            && self.swipe_threshold_ratio > 0.0
            && self.swipe_threshold_ratio <= 1.0)
        {
            return Err(DeckError::InvalidConfig(format!(
                "swipe_threshold_ratio must be in (0, 1], got {}",
                self.swipe_threshold_ratio
            )));
        }

        if !(self.swipe_out_duration_ms.is_finite() && self.swipe_out_duration_ms >= 0.0) {
            return Err(DeckError::InvalidConfig(format!(
                "swipe_out_duration_ms must be >= 0, got {}",
                self.swipe_out_duration_ms
            )));
        }

        if !(self.stack_offset.is_finite() && self.stack_offset >= 0.0) {
            return Err(DeckError::InvalidConfig(format!(
                "stack_offset must be >= 0, got {}",
                self.stack_offset
            )));
        }

        if !self.max_rotation_deg.is_finite() {
            return Err(DeckError::InvalidConfig(format!(
                "max_rotation_deg must be finite, got {}",
                self.max_rotation_deg
            )));
        }

        if !(self.rotation_range_ratio.is_finite() && self.rotation_range_ratio > 0.0) {
            return Err(DeckError::InvalidConfig(format!(
                "rotation_range_ratio must be > 0, got {}",
                self.rotation_range_ratio
            )));
        }

        self.reset_spring
            .validate()
            .map_err(|e| DeckError::InvalidConfig(format!("reset_spring: {}", e)))?;
        self.layout_spring
            .validate()
            .map_err(|e| DeckError::InvalidConfig(format!("layout_spring: {}", e)))?;

        Ok(())
    }
}
