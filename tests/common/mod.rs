//! Common test utilities
//!
//! An isolated state directory plus constructors for an editor wired to a
//! recording overlay surface.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use dc404_notes::NotesApp;
use notes_config::{Session, SessionState, SessionStore};
use notes_overlay::GlitchOverlay;
use notes_overlay::mock::MockSurface;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::TempDir;

pub const SEED: u64 = 0xdc404;

/// Test environment with an isolated state file
pub struct TestEnvironment {
    pub temp_dir: TempDir,
    pub state_path: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let state_path = temp_dir.path().join("dc404notes").join("state.toml");
        Self {
            temp_dir,
            state_path,
        }
    }

    pub fn store(&self) -> SessionStore {
        SessionStore::at(&self.state_path)
    }

    /// Write raw state file content
    pub fn write_state(&self, content: &str) {
        if let Some(parent) = self.state_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create state directory");
        }
        std::fs::write(&self.state_path, content).expect("Failed to write state file");
    }

    /// Save a state record the way the editor would
    pub fn save_state(&self, state: &SessionState) {
        self.store().try_save(state).expect("Failed to save state");
    }

    /// Read back what is on disk
    pub fn stored_state(&self) -> SessionState {
        self.store().try_load().expect("State file should be readable")
    }

    pub fn raw_state(&self) -> String {
        std::fs::read_to_string(&self.state_path).expect("State file should exist")
    }

    /// Write a note file inside the environment
    pub fn write_note(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, content).expect("Failed to write note");
        path
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Editor restored from the current state file, drawing to an 800x600 mock
    pub fn app(&self) -> NotesApp<MockSurface> {
        self.app_with_file(None)
    }

    pub fn app_with_file(&self, file: Option<PathBuf>) -> NotesApp<MockSurface> {
        let overlay = mock_overlay(800, 600);
        NotesApp::new(Session::load(self.store()), overlay, file)
    }
}

impl Default for TestEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

/// Deterministic overlay over a recording surface
pub fn mock_overlay(width: u32, height: u32) -> GlitchOverlay<MockSurface> {
    GlitchOverlay::with_rng(MockSurface::new(width, height), StdRng::seed_from_u64(SEED))
}
