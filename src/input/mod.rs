//! Input handling
//!
//! Keyboard chords become [`Command`]s; nothing here touches editor state.

mod commands;
mod keyboard;

pub use commands::Command;
pub use keyboard::{Modifiers, PAGE_LINES, key_to_command, shortcut_to_command};
