//! Configuration file support for the pose editor.
//!
//! This module provides serialization and deserialization of editor settings,
//! allowing users to export and import their configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAX_UNDO_HISTORY, DEFAULT_READONLY_SCALE_FACTOR, KEYPOINT_RADIUS};
use crate::keybindings::KeyBindings;
use crate::undo::UndoConfig;

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Get the display name for this log level.
    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Error => "Error",
            LogLevel::Warn => "Warn",
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
            LogLevel::Trace => "Trace",
        }
    }

    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Editor configuration that can be exported and imported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Application name (for identification)
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// User preferences
    #[serde(default)]
    pub preferences: UserPreferences,

    /// Keybinding configuration
    #[serde(default)]
    pub keybindings: KeyBindings,
}

fn default_app_name() -> String {
    "keypose".to_string()
}

/// User preferences section of the config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Keypoint radius in screen pixels
    #[serde(default = "default_keypoint_radius")]
    pub keypoint_radius: f32,

    /// Fraction of the container a template preview occupies
    #[serde(default = "default_readonly_scale_factor")]
    pub readonly_scale_factor: f32,

    /// Undo snapshots kept per editor
    #[serde(default = "default_max_undo_history")]
    pub max_undo_history: usize,
}

fn default_keypoint_radius() -> f32 {
    KEYPOINT_RADIUS
}

fn default_readonly_scale_factor() -> f32 {
    DEFAULT_READONLY_SCALE_FACTOR
}

fn default_max_undo_history() -> usize {
    DEFAULT_MAX_UNDO_HISTORY
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            keypoint_radius: default_keypoint_radius(),
            readonly_scale_factor: default_readonly_scale_factor(),
            max_undo_history: default_max_undo_history(),
        }
    }
}

impl EditorConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            app_name: default_app_name(),
            preferences: UserPreferences::default(),
            keybindings: KeyBindings::default(),
        }
    }

    /// Undo settings for template editors.
    pub fn undo_config(&self) -> UndoConfig {
        UndoConfig {
            max_history: self.preferences.max_undo_history,
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Get the default filename for config export.
    pub fn default_filename() -> &'static str {
        "keypose-config.json"
    }

    /// Get the default config file path for auto-load/save.
    /// Returns None on WASM (no filesystem access).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<std::path::PathBuf> {
        // Try to use XDG config directory, fall back to home directory
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("keypose").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("keypose")
                    .join(Self::default_filename())
            })
        }
    }

    /// Try to load configuration from the default path.
    /// Returns None if the file doesn't exist or can't be read.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return None;
        }

        match std::fs::read_to_string(&path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded configuration from {:?}", path);
                    Some(config)
                }
                Err(e) => {
                    log::warn!("Failed to parse config file {:?}: {}", path, e);
                    None
                }
            },
            Err(e) => {
                log::warn!("Failed to read config file {:?}: {}", path, e);
                None
            }
        }
    }

    /// Save configuration to the default path.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_default_path(&self) -> Result<(), ConfigError> {
        let path = Self::default_path().ok_or_else(|| {
            ConfigError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config directory",
            ))
        })?;

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = self.to_json()?;
        std::fs::write(&path, json)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keybindings::{KeyChord, KeyCode, PoseAction};

    #[test]
    fn test_json_roundtrip() {
        let mut config = EditorConfig::new();
        config.preferences.log_level = LogLevel::Debug;
        config.preferences.max_undo_history = 10;
        config
            .keybindings
            .set_chord(PoseAction::DeleteSelected, KeyChord::key(KeyCode::Backspace));

        let json = config.to_json().unwrap();
        assert_eq!(EditorConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = EditorConfig::from_json(r#"{ "version": 1 }"#).unwrap();

        assert_eq!(config.app_name, "keypose");
        assert_eq!(config.preferences, UserPreferences::default());
        assert_eq!(config.keybindings, KeyBindings::default());
        assert_eq!(config.undo_config().max_history, DEFAULT_MAX_UNDO_HISTORY);
    }

    #[test]
    fn test_newer_version_rejected() {
        let json = format!(r#"{{ "version": {} }}"#, CONFIG_VERSION + 1);
        let err = EditorConfig::from_json(&json).unwrap_err();

        assert!(matches!(err, ConfigError::VersionTooNew { .. }));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            EditorConfig::from_json("not json"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_log_level_names() {
        let json = serde_json::to_string(&LogLevel::Warn).unwrap();
        assert_eq!(json, "\"warn\"");
        assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
        assert_eq!(LogLevel::Debug.name(), "Debug");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_default_path_filename() {
        if let Some(path) = EditorConfig::default_path() {
            assert!(path.ends_with("keypose/keypose-config.json"));
        }
    }
}
