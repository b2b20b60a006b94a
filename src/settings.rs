//! Application settings
//!
//! Optional on-disk settings for the studio: bundles to load at startup, the
//! heartbeat interval and the default log filter. Loaded if present, written
//! only on explicit request. Widget configurations never land here.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application-wide settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudioSettings {
    /// Bundle manifests to load at startup
    #[serde(default)]
    pub bundles: Vec<PathBuf>,
    /// Heartbeat interval in milliseconds
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// Log filter used when neither RUST_LOG nor --debug is given
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_tick_interval_ms() -> u64 {
    1000
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for StudioSettings {
    fn default() -> Self {
        Self {
            bundles: Vec::new(),
            tick_interval_ms: default_tick_interval_ms(),
            log_filter: default_log_filter(),
        }
    }
}

impl StudioSettings {
    /// Load settings from disk, falling back to defaults when no file exists
    pub fn load() -> Result<Self> {
        let settings_path = Self::settings_path()?;

        if !settings_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(settings_path)?;
        let settings = serde_json::from_str(&content)?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<()> {
        let settings_path = Self::settings_path()?;

        if let Some(parent) = settings_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(settings_path, content)?;
        Ok(())
    }

    /// Get the settings file path
    fn settings_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("com", "widget-studio", "widget-studio")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("settings.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let settings: StudioSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, StudioSettings::default());
        assert_eq!(settings.tick_interval_ms, 1000);
        assert_eq!(settings.log_filter, "warn");
    }

    #[test]
    fn test_round_trip() {
        let settings = StudioSettings {
            bundles: vec![PathBuf::from("packs/geography.json")],
            tick_interval_ms: 250,
            log_filter: "debug".to_string(),
        };
        let json = serde_json::to_string_pretty(&settings).unwrap();
        let back: StudioSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }
}
