//! DC404 Notes - a plain-text note editor with a glitch overlay
//!
//! The window shell (winit + wgpu) lives in the binary. This library holds
//! everything that can be tested without a GPU:
//! - [`app::NotesApp`] - command execution, session writes, overlay control
//! - [`state`] - document, find and prompt state
//! - [`input`] - key chord to [`input::Command`] mapping
//! - [`templates`] - built-in note templates
//! - [`geometry`] - the persisted window geometry string
//!
//! Themes, configuration/session persistence and the overlay engine are in
//! the `notes-theme`, `notes-config` and `notes-overlay` crates.

pub mod app;
pub mod geometry;
pub mod input;
pub mod state;
pub mod templates;

pub use app::{NotesApp, Outcome};
pub use geometry::WindowGeometry;
pub use input::Command;
