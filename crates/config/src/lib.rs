//! Configuration management for truecost.
//!
//! This crate provides configuration loading, saving, and validation
//! with support for TOML format and XDG directory conventions.

mod settings;
mod xdg;

pub use settings::{ApiSettings, Config, GeneralSettings, LoggingSettings, PanelSettings};
pub use xdg::{get_cache_dir, get_config_dir};

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

/// Default values as constants
pub mod defaults {
    pub const TICK_INTERVAL_MS: u64 = 16;
    pub const RECENT_CARDS: usize = 3;
    pub const BREAKPOINT_PX: u32 = 768;
    pub const MIN_WIDTH_PX: u32 = 320;
    pub const MAX_WIDTH_PX: u32 = 600;
    pub const DESKTOP_RATIO: f64 = 0.4;
    pub const MOBILE_RATIO: f64 = 0.9;
    pub const EXPAND_DELAY_MS: u64 = 20;
    pub const COLLAPSE_DELAY_MS: u64 = 240;
    pub const CELL_WIDTH_PX: u32 = 8;
    pub const BASE_URL: &str = "http://localhost:3000";
    pub const API_KEY_ENV: &str = "FASTAPI_API_KEY";
    pub const SESSION_COOKIE_ENV: &str = "TRUECOST_SESSION_COOKIE";
    pub const TIMEOUT_SECS: u64 = 30;
    pub const MIN_LOG_LEVEL: &str = "info";
    pub const MAX_LOG_ENTRIES: usize = 500;
}

impl Config {
    /// Load configuration from the XDG config file.
    ///
    /// On first run, creates config file with default values.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load configuration from an explicit path.
    ///
    /// Creates the file with defaults when missing and rewrites it when
    /// keys were missing, so the file on disk always lists every setting.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let original_content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            let config = Self::validate_content(&original_content)?;

            // Serialize back to get normalized content
            let normalized_content = toml::to_string_pretty(&config)?;

            // If content changed, save the updated config
            if original_content != normalized_content {
                config.save_to(config_path)?;
            }

            Ok(config)
        } else {
            // First run - create config file with default values
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    /// Save configuration to the XDG config file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Save configuration to an explicit path.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        Ok(())
    }

    /// Get path to config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(get_config_dir()?.join("config.toml"))
    }

    /// Get default path of the log file.
    pub fn default_log_file_path() -> Result<PathBuf> {
        Ok(get_cache_dir()?.join("truecost.log"))
    }

    /// Parse and validate config content.
    pub fn validate_content(content: &str) -> Result<Config> {
        let config: Config = toml::from_str(content).map_err(|e| anyhow::anyhow!("{}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        let panel = &self.panel;
        if panel.min_width_px > panel.max_width_px {
            bail!(
                "panel.min_width_px ({}) exceeds panel.max_width_px ({})",
                panel.min_width_px,
                panel.max_width_px
            );
        }
        for (name, ratio) in [
            ("desktop_ratio", panel.desktop_ratio),
            ("mobile_ratio", panel.mobile_ratio),
        ] {
            if !(ratio > 0.0 && ratio <= 1.0) {
                bail!("panel.{} must be in (0, 1], got {}", name, ratio);
            }
        }
        if panel.cell_width_px == 0 {
            bail!("panel.cell_width_px must be positive");
        }
        if self.general.tick_interval_ms == 0 {
            bail!("general.tick_interval_ms must be positive");
        }
        Ok(())
    }
}
