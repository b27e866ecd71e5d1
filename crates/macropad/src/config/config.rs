//! Configuration management for macropad.
//!
//! Loads and saves the TOML configuration file under the platform config
//! directory, creating it with defaults on first run.

use crate::{
    AppError, AppResult,
    config::{
        APPLICATION, LoggingConfig, MacrosConfig, ORGANIZATION, PlaybackConfig, QUALIFIER,
        RecordingConfig,
    },
};

use std::{
    fs,
    io::Write,
    panic::Location,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

const CONFIG_FILE: &str = "config.toml";

/// Main configuration struct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Macro directory and armed-list locations.
    #[serde(default)]
    pub macros: MacrosConfig,
    /// Playback timing.
    #[serde(default)]
    pub playback: PlaybackConfig,
    /// Recording granularity and stop keys.
    #[serde(default)]
    pub recording: RecordingConfig,
    /// Log filter.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from disk, creating default if not found.
    #[track_caller]
    #[instrument]
    pub fn load() -> AppResult<Self> {
        let proj_dirs = Self::project_dirs()?;
        let defaults = Config {
            macros: MacrosConfig::under(proj_dirs.config_dir(), proj_dirs.data_dir()),
            ..Config::default()
        };

        Self::load_from(&Self::config_path()?, defaults)
    }

    /// Load `path`, or write `defaults` there when it does not exist.
    ///
    /// The macro directory is created if missing.
    #[track_caller]
    pub(crate) fn load_from(path: &Path, defaults: Config) -> AppResult<Self> {
        let config = if path.exists() {
            let contents = fs::read_to_string(path).map_err(|e| AppError::ConfigError {
                reason: format!("Failed to read config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

            let config: Config = toml::from_str(&contents).map_err(|e| AppError::ConfigError {
                reason: format!("Failed to parse config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

            info!(config_path = ?path, "Configuration loaded");
            config
        } else {
            info!(config_path = ?path, "No config found, creating default");
            defaults.save_to(path)?;
            defaults
        };

        if !config.macros.directory.exists() {
            fs::create_dir_all(&config.macros.directory)?;
            debug!(directory = ?config.macros.directory, "Created macro directory");
        }

        Ok(config)
    }

    /// Save configuration using the atomic write pattern: write to a
    /// temporary file first, then rename over `path`.
    #[track_caller]
    pub(crate) fn save_to(&self, path: &Path) -> AppResult<()> {
        let contents = toml::to_string_pretty(self).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let temp_path = path.with_extension("toml.tmp");

        let mut temp_file = fs::File::create(&temp_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to create temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| AppError::ConfigError {
                reason: format!("Failed to write temp config file: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        temp_file.sync_all().map_err(|e| AppError::ConfigError {
            reason: format!("Failed to sync temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        fs::rename(&temp_path, path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to rename temp config to final: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(config_path = ?path, "Configuration saved (atomic write)");

        Ok(())
    }

    #[track_caller]
    fn project_dirs() -> AppResult<ProjectDirs> {
        ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION).ok_or_else(|| {
            AppError::ConfigError {
                reason: "Failed to get project directories".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }

    #[track_caller]
    fn config_path() -> AppResult<PathBuf> {
        let proj_dirs = Self::project_dirs()?;
        let config_dir = proj_dirs.config_dir();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
            debug!(config_dir = ?config_dir, "Created config directory");
        }

        Ok(config_dir.join(CONFIG_FILE))
    }
}
