//! Persisted session state
//!
//! The session record is small and flat: window geometry, theme, wrap mode,
//! last opened file and whether the glitch overlay is on. It is stored as
//! TOML and always written whole.
//!
//! Persistence is best-effort in both directions. A missing, unreadable or
//! malformed state file loads as [`SessionState::default`], and a failed
//! write is logged and dropped.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::Config;

/// State file name inside the config directory
const STATE_FILE_NAME: &str = "state.toml";

/// Theme used when the saved record has none
pub const DEFAULT_THEME_NAME: &str = notes_theme::DEFAULT_THEME.name;

/// Session state restored at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionState {
    /// Window placement as `WIDTHxHEIGHT+X+Y`; uninterpreted here
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<String>,

    /// Theme name; unknown names resolve to the default theme on use
    pub theme: String,

    /// Soft-wrap long lines
    pub wrap: bool,

    /// File open when the session last changed files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_file: Option<PathBuf>,

    /// Glitch overlay enabled
    pub glitch_on: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            geometry: None,
            theme: DEFAULT_THEME_NAME.to_string(),
            wrap: true,
            last_file: None,
            glitch_on: false,
        }
    }
}

impl SessionState {
    /// The theme this record selects, with fallback
    pub fn resolved_theme(&self) -> &'static notes_theme::Theme {
        notes_theme::resolve(&self.theme)
    }

    /// `last_file`, but only if it still exists
    pub fn restorable_last_file(&self) -> Option<&Path> {
        self.last_file.as_deref().filter(|p| p.exists())
    }
}

/// Session state errors
///
/// These never reach the user; [`SessionStore::load`] and
/// [`SessionStore::save`] log and swallow them.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("could not determine home directory")]
    NoHomeDirectory,
    #[error("failed to read {0:?}: {1}")]
    Read(PathBuf, #[source] std::io::Error),
    #[error("failed to parse {0:?}: {1}")]
    Parse(PathBuf, #[source] toml::de::Error),
    #[error("failed to serialize session state: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("failed to create {0:?}: {1}")]
    CreateDir(PathBuf, #[source] std::io::Error),
    #[error("failed to write {0:?}: {1}")]
    Write(PathBuf, #[source] std::io::Error),
}

/// Reads and writes the session state file
#[derive(Debug, Clone)]
pub struct SessionStore {
    /// None when no home directory could be found
    path: Option<PathBuf>,
}

impl SessionStore {
    /// Store at the default location (~/.config/dc404notes/state.toml)
    pub fn default_location() -> Self {
        Self {
            path: Config::config_dir().map(|dir| dir.join(STATE_FILE_NAME)),
        }
    }

    /// Store at an explicit path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Load session state, degrading to defaults on any error
    pub fn load(&self) -> SessionState {
        match self.try_load() {
            Ok(state) => state,
            Err(StateError::Read(path, e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No session state at {:?}, starting fresh", path);
                SessionState::default()
            }
            Err(e) => {
                log::warn!("Ignoring session state: {}", e);
                SessionState::default()
            }
        }
    }

    /// Load session state, reporting failures
    pub fn try_load(&self) -> Result<SessionState, StateError> {
        let path = self.path.as_ref().ok_or(StateError::NoHomeDirectory)?;
        let content = fs::read_to_string(path).map_err(|e| StateError::Read(path.clone(), e))?;
        let state = toml::from_str(&content).map_err(|e| StateError::Parse(path.clone(), e))?;
        log::debug!("Loaded session state from {:?}", path);
        Ok(state)
    }

    /// Write the whole record, logging and dropping failures
    pub fn save(&self, state: &SessionState) {
        if let Err(e) = self.try_save(state) {
            log::warn!("Session state not saved: {}", e);
        }
    }

    /// Write the whole record, replacing any previous content
    pub fn try_save(&self, state: &SessionState) -> Result<(), StateError> {
        let path = self.path.as_ref().ok_or(StateError::NoHomeDirectory)?;

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| StateError::CreateDir(dir.to_path_buf(), e))?;
        }

        let content = toml::to_string_pretty(state)?;
        fs::write(path, content).map_err(|e| StateError::Write(path.clone(), e))?;
        log::trace!("Saved session state to {:?}", path);
        Ok(())
    }
}

/// In-memory session state paired with its store
///
/// Every tracked change goes through [`Session::update`], which writes the
/// full record back immediately.
#[derive(Debug)]
pub struct Session {
    state: SessionState,
    store: SessionStore,
}

impl Session {
    /// Load the record from `store`
    pub fn load(store: SessionStore) -> Self {
        let state = store.load();
        Self { state, store }
    }

    /// Current snapshot
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Mutate the record and persist it
    pub fn update(&mut self, f: impl FnOnce(&mut SessionState)) {
        f(&mut self.state);
        self.store.save(&self.state);
    }

    /// Persist the record as-is (used at shutdown)
    pub fn flush(&self) {
        self.store.save(&self.state);
    }
}
