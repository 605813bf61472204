//! Command enum for testable input handling
//!
//! Commands represent the intent of user input without side effects. The
//! keyboard layer produces them and [`crate::app::NotesApp::execute`] runs
//! them.

use crate::state::CaretMove;

/// Commands that can be produced by input handlers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // === Editing ===
    /// Insert typed text at the caret (or into the prompt)
    InsertText(String),
    /// Enter: newline in the document, submit in the prompt
    Newline,
    /// Delete before the caret
    Backspace,
    /// Delete after the caret
    Delete,
    /// Move the caret
    MoveCaret(CaretMove),
    /// Insert a template by menu position
    InsertTemplate(usize),
    /// Paste from the clipboard (text filled in by the window shell)
    Paste,
    /// Escape: close the prompt and clear the status line
    Cancel,

    // === File ===
    NewFile,
    OpenFile,
    Save,
    SaveAs,
    Quit,

    // === Find ===
    /// Prompt for a query and search from the top
    Find,
    /// Continue from the end of the previous match
    FindNext,

    // === View ===
    ToggleWrap,
    CycleTheme,
    ToggleGlitch,
    /// Scroll by a number of lines (positive = down)
    ScrollLines(i32),
}

impl Command {
    /// Commands that throw away unsaved edits
    pub fn discards_changes(&self) -> bool {
        matches!(self, Command::NewFile | Command::OpenFile | Command::Quit)
    }
}
