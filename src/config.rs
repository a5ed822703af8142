//! Configuration management for the application.
//!
//! Settings are stored in TOML format under the platform config directory.
//! Everything here has a working default, so the editor runs without a config
//! file at all.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::constants::DEFAULT_DEVICE_ROOT;

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathConfig {
    /// Media root directory on the kiosk device; exported media sources are
    /// rewritten to live under it.
    #[serde(default = "default_device_root")]
    pub device_root: String,
    /// Directory exports are written to. Defaults to the current directory.
    pub export_dir: Option<PathBuf>,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            device_root: default_device_root(),
            export_dir: None,
        }
    }
}

fn default_device_root() -> String {
    DEFAULT_DEVICE_ROOT.to_string()
}

/// UI preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UiConfig {
    /// Show the read-only settings region in the tree pane.
    #[serde(default)]
    pub show_settings_region: bool,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// File system locations.
    #[serde(default)]
    pub paths: PathConfig,
    /// UI preferences.
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if the config file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Gets the platform-specific config directory path.
    ///
    /// - Linux: `~/.config/Menuforge/`
    /// - macOS: `~/Library/Application Support/Menuforge/`
    /// - Windows: `%APPDATA%\Menuforge\`
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(crate::constants::APP_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        Ok(config)
    }

    /// Saves configuration to the config file, creating the config directory
    /// if needed.
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context(format!(
            "Failed to create config directory: {}",
            config_dir.display()
        ))?;

        let config_path = Self::config_file_path()?;
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, content).context(format!(
            "Failed to write config file: {}",
            config_path.display()
        ))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_device_root() {
        let config = Config::new();
        assert_eq!(config.paths.device_root, "/home/pi/qtremote");
        assert!(config.paths.export_dir.is_none());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = Config::new();
        config.paths.device_root = "/opt/kiosk".to_string();
        config.ui.show_settings_region = true;

        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[paths]\ndevice_root = \"/mnt/media\"\n").unwrap();
        assert_eq!(parsed.paths.device_root, "/mnt/media");
        assert!(!parsed.ui.show_settings_region);

        let parsed: Config = toml::from_str("[ui]\nshow_settings_region = true\n").unwrap();
        assert_eq!(parsed.paths.device_root, "/home/pi/qtremote");
        assert!(parsed.ui.show_settings_region);
    }
}
