//! DC404 Notes configuration and session state
//!
//! Two documents live under `~/.config/dc404notes/`:
//! - `config.toml`: user preferences (window, font, editor). Read-only at runtime.
//! - `state.toml`: session state written back after every tracked change.
//!
//! Neither file is required. Missing or malformed content falls back to defaults.

pub mod session;

pub use session::{Session, SessionState, SessionStore, StateError, DEFAULT_THEME_NAME};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration directory, relative to the home directory
const CONFIG_DIR: &[&str] = &[".config", "dc404notes"];
/// Configuration file name
const CONFIG_FILE_NAME: &str = "config.toml";

/// Window configuration section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Base window title; the open file name is appended
    pub title: String,
    /// Initial inner width in logical pixels (used when no geometry was saved)
    pub width: u32,
    /// Initial inner height in logical pixels
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "DC404 Notes".to_string(),
            width: 900,
            height: 640,
        }
    }
}

/// Font configuration section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Font size in points
    pub size: f32,
    /// Line height multiplier
    pub line_height: f32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            size: 15.0,
            line_height: 1.4,
        }
    }
}

/// Editor configuration section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Padding around the text area in pixels
    pub padding: u32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self { padding: 12 }
    }
}

/// Complete configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub font: FontConfig,
    pub editor: EditorConfig,
}

impl Config {
    /// Get the config directory path (~/.config/dc404notes)
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| CONFIG_DIR.iter().fold(home, |p, part| p.join(part)))
    }

    /// Get the config file path (~/.config/dc404notes/config.toml)
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join(CONFIG_FILE_NAME))
    }

    /// Load config from the default location, or return defaults
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            log::info!("Could not determine config path, using defaults");
            return Self::default();
        };

        if !path.exists() {
            log::info!("Config file not found at {:?}, using defaults", path);
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                log::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                log::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {0:?}: {1}")]
    Read(PathBuf, #[source] std::io::Error),
    #[error("failed to parse {0:?}: {1}")]
    Parse(PathBuf, #[source] toml::de::Error),
}
