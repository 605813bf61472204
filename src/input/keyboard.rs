//! Pure keyboard input handling
//!
//! Maps winit key presses to [`Command`]s. Side-effect free, so every
//! shortcut is unit tested here.

use winit::keyboard::{Key, NamedKey};

use super::Command;
use crate::state::CaretMove;

/// Lines moved by Page Up / Page Down
pub const PAGE_LINES: i32 = 20;

/// Modifier state for keyboard input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Command/Super key (Cmd on macOS)
    pub command: bool,
    pub control: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn control_only() -> Self {
        Self {
            control: true,
            ..Self::default()
        }
    }

    pub fn control_shift() -> Self {
        Self {
            control: true,
            shift: true,
            ..Self::default()
        }
    }

    /// Ctrl, or Cmd on macOS
    pub fn shortcut(&self) -> bool {
        self.control || self.command
    }
}

/// Convert a key press to a command
///
/// Returns `None` for keys the editor ignores (bare modifiers, unbound
/// shortcuts).
pub fn key_to_command(key: &Key, modifiers: Modifiers) -> Option<Command> {
    if modifiers.shortcut() {
        return shortcut_to_command(key, modifiers);
    }

    match key {
        Key::Named(named) => named_key_to_command(named),
        Key::Character(c) => Some(Command::InsertText(c.to_string())),
        _ => None,
    }
}

fn named_key_to_command(key: &NamedKey) -> Option<Command> {
    let command = match key {
        NamedKey::Enter => Command::Newline,
        NamedKey::Backspace => Command::Backspace,
        NamedKey::Delete => Command::Delete,
        NamedKey::Escape => Command::Cancel,
        NamedKey::Space => Command::InsertText(" ".into()),
        NamedKey::Tab => Command::InsertText("\t".into()),
        NamedKey::ArrowLeft => Command::MoveCaret(CaretMove::Left),
        NamedKey::ArrowRight => Command::MoveCaret(CaretMove::Right),
        NamedKey::ArrowUp => Command::MoveCaret(CaretMove::Up),
        NamedKey::ArrowDown => Command::MoveCaret(CaretMove::Down),
        NamedKey::Home => Command::MoveCaret(CaretMove::LineStart),
        NamedKey::End => Command::MoveCaret(CaretMove::LineEnd),
        NamedKey::PageUp => Command::ScrollLines(-PAGE_LINES),
        NamedKey::PageDown => Command::ScrollLines(PAGE_LINES),
        NamedKey::F3 => Command::FindNext,
        _ => return None,
    };
    Some(command)
}

/// Convert a Ctrl/Cmd chord to a command
pub fn shortcut_to_command(key: &Key, modifiers: Modifiers) -> Option<Command> {
    if !modifiers.shortcut() {
        return None;
    }

    match key {
        Key::Character(c) => match c.to_lowercase().as_str() {
            "n" => Some(Command::NewFile),
            "o" => Some(Command::OpenFile),
            "s" if modifiers.shift => Some(Command::SaveAs),
            "s" => Some(Command::Save),
            "q" => Some(Command::Quit),
            "f" => Some(Command::Find),
            "l" => Some(Command::ToggleWrap),
            "t" => Some(Command::CycleTheme),
            "g" => Some(Command::ToggleGlitch),
            "v" => Some(Command::Paste),
            "1" => Some(Command::InsertTemplate(0)),
            "2" => Some(Command::InsertTemplate(1)),
            "3" => Some(Command::InsertTemplate(2)),
            _ => None,
        },
        Key::Named(NamedKey::Home) => Some(Command::MoveCaret(CaretMove::DocumentStart)),
        Key::Named(NamedKey::End) => Some(Command::MoveCaret(CaretMove::DocumentEnd)),
        Key::Named(NamedKey::F3) => Some(Command::FindNext),
        _ => None,
    }
}
