//! Editor document
//!
//! A UTF-8 text buffer with a byte-offset caret, the backing file path and a
//! modified flag. No rendering or window dependencies.

use std::fs;
use std::io;
use std::ops::Range;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Document I/O failures
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to open {0:?}: {1}")]
    Open(PathBuf, #[source] io::Error),

    #[error("failed to save {0:?}: {1}")]
    Save(PathBuf, #[source] io::Error),

    #[error("document has no file path")]
    NoPath,
}

/// Caret movements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaretMove {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    DocumentStart,
    DocumentEnd,
}

/// Text being edited
#[derive(Debug, Clone, Default)]
pub struct Document {
    text: String,
    /// Byte offset, always on a char boundary
    caret: usize,
    /// Highlighted range (the last find match)
    highlight: Option<Range<usize>>,
    path: Option<PathBuf>,
    modified: bool,
    /// Char column kept across vertical moves
    goal_column: Option<usize>,
}

impl Document {
    /// Empty, untitled document
    pub fn new() -> Self {
        Self::default()
    }

    /// Document with initial text (unsaved, untitled)
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Read a UTF-8 file; CRLF line endings are normalized to LF
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| DocumentError::Open(path.to_path_buf(), e))?;
        let text = if text.contains("\r\n") {
            log::debug!("Normalizing CRLF line endings in {:?}", path);
            text.replace("\r\n", "\n")
        } else {
            text
        };

        log::info!("Opened {:?} ({} bytes)", path, text.len());
        Ok(Self {
            text,
            path: Some(path.to_path_buf()),
            ..Self::default()
        })
    }

    /// Write to the current path
    pub fn save(&mut self) -> Result<(), DocumentError> {
        let path = self.path.clone().ok_or(DocumentError::NoPath)?;
        self.write_to(&path)
    }

    /// Write to a new path, which becomes the current one on success
    pub fn save_as(&mut self, path: impl Into<PathBuf>) -> Result<(), DocumentError> {
        let path = path.into();
        self.write_to(&path)?;
        self.path = Some(path);
        Ok(())
    }

    fn write_to(&mut self, path: &Path) -> Result<(), DocumentError> {
        fs::write(path, &self.text).map_err(|e| DocumentError::Save(path.to_path_buf(), e))?;
        self.modified = false;
        log::info!("Saved {:?} ({} bytes)", path, self.text.len());
        Ok(())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn highlight(&self) -> Option<Range<usize>> {
        self.highlight.clone()
    }

    /// File name shown in the title bar
    pub fn display_name(&self) -> String {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled".to_string())
    }

    /// Window title: `<app> – <name>`, with `*` while modified
    pub fn title(&self, app_name: &str) -> String {
        let marker = if self.modified { "*" } else { "" };
        format!("{} – {}{}", app_name, self.display_name(), marker)
    }

    /// Insert a character at the caret
    pub fn insert_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.insert_str(c.encode_utf8(&mut buf));
    }

    /// Insert text at the caret and move past it
    pub fn insert_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        self.text.insert_str(self.caret, s);
        self.caret += s.len();
        self.touch();
    }

    /// Delete the character before the caret
    pub fn backspace(&mut self) -> bool {
        let Some(prev) = self.prev_boundary(self.caret) else {
            return false;
        };
        self.text.replace_range(prev..self.caret, "");
        self.caret = prev;
        self.touch();
        true
    }

    /// Delete the character after the caret
    pub fn delete(&mut self) -> bool {
        let Some(next) = self.next_boundary(self.caret) else {
            return false;
        };
        self.text.replace_range(self.caret..next, "");
        self.touch();
        true
    }

    /// Move the caret; returns whether it moved
    pub fn move_caret(&mut self, movement: CaretMove) -> bool {
        let before = self.caret;
        let vertical = matches!(movement, CaretMove::Up | CaretMove::Down);
        if !vertical {
            self.goal_column = None;
        }

        match movement {
            CaretMove::Left => {
                if let Some(prev) = self.prev_boundary(self.caret) {
                    self.caret = prev;
                }
            }
            CaretMove::Right => {
                if let Some(next) = self.next_boundary(self.caret) {
                    self.caret = next;
                }
            }
            CaretMove::LineStart => self.caret = self.line_start(self.caret),
            CaretMove::LineEnd => self.caret = self.line_end(self.caret),
            CaretMove::DocumentStart => self.caret = 0,
            CaretMove::DocumentEnd => self.caret = self.text.len(),
            CaretMove::Up => {
                let start = self.line_start(self.caret);
                if start > 0 {
                    let column = self.goal_column();
                    let prev_start = self.line_start(start - 1);
                    self.caret = self.offset_at_column(prev_start, column);
                }
            }
            CaretMove::Down => {
                let end = self.line_end(self.caret);
                if end < self.text.len() {
                    let column = self.goal_column();
                    self.caret = self.offset_at_column(end + 1, column);
                }
            }
        }

        self.highlight = None;
        self.caret != before
    }

    /// Place the caret at a byte offset (clamped, snapped back to a char boundary)
    pub fn set_caret(&mut self, offset: usize) {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        self.caret = offset;
        self.goal_column = None;
    }

    /// Highlight a range and put the caret at its end
    pub fn select_match(&mut self, range: Range<usize>) {
        self.set_caret(range.end);
        self.highlight = Some(range);
    }

    /// Zero-based (line, byte column) of the caret
    pub fn caret_line_col(&self) -> (usize, usize) {
        let start = self.line_start(self.caret);
        let line = self.text[..start].matches('\n').count();
        (line, self.caret - start)
    }

    /// Number of logical lines (an empty document has one)
    pub fn line_count(&self) -> usize {
        self.text.matches('\n').count() + 1
    }

    fn touch(&mut self) {
        self.modified = true;
        self.highlight = None;
        self.goal_column = None;
    }

    fn goal_column(&mut self) -> usize {
        if let Some(column) = self.goal_column {
            return column;
        }
        let start = self.line_start(self.caret);
        let column = self.text[start..self.caret].chars().count();
        self.goal_column = Some(column);
        column
    }

    fn line_start(&self, offset: usize) -> usize {
        self.text[..offset].rfind('\n').map_or(0, |i| i + 1)
    }

    fn line_end(&self, offset: usize) -> usize {
        self.text[offset..]
            .find('\n')
            .map_or(self.text.len(), |i| offset + i)
    }

    /// Byte offset of `column` chars into the line at `line_start`, clamped to the line end
    fn offset_at_column(&self, line_start: usize, column: usize) -> usize {
        let end = self.line_end(line_start);
        self.text[line_start..end]
            .char_indices()
            .nth(column)
            .map_or(end, |(i, _)| line_start + i)
    }

    fn prev_boundary(&self, offset: usize) -> Option<usize> {
        self.text[..offset].char_indices().next_back().map(|(i, _)| i)
    }

    fn next_boundary(&self, offset: usize) -> Option<usize> {
        self.text[offset..]
            .chars()
            .next()
            .map(|c| offset + c.len_utf8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_is_untitled_and_clean() {
        let doc = Document::new();
        assert_eq!(doc.text(), "");
        assert!(!doc.is_modified());
        assert_eq!(doc.title("DC404 Notes"), "DC404 Notes – Untitled");
    }

    #[test]
    fn test_insert_and_backspace() {
        let mut doc = Document::new();
        doc.insert_str("héllo");
        doc.insert_char('!');
        assert_eq!(doc.text(), "héllo!");
        assert_eq!(doc.caret(), doc.text().len());
        assert!(doc.is_modified());
        assert_eq!(doc.title("DC404 Notes"), "DC404 Notes – Untitled*");

        assert!(doc.backspace());
        assert!(doc.backspace());
        assert_eq!(doc.text(), "héll");
        doc.move_caret(CaretMove::Left);
        doc.move_caret(CaretMove::Left);
        assert!(doc.backspace());
        assert_eq!(doc.text(), "hll");
        assert_eq!(doc.caret(), 1);
    }

    #[test]
    fn test_backspace_and_delete_at_edges() {
        let mut doc = Document::with_text("ab");
        assert!(!doc.backspace());
        assert!(doc.delete());
        assert_eq!(doc.text(), "b");
        doc.move_caret(CaretMove::DocumentEnd);
        assert!(!doc.delete());
    }

    #[test]
    fn test_vertical_movement_keeps_column() {
        let mut doc = Document::with_text("abcdef\nxy\nlonger line");
        doc.set_caret(4);
        doc.move_caret(CaretMove::Down);
        assert_eq!(doc.caret_line_col(), (1, 2));
        doc.move_caret(CaretMove::Down);
        assert_eq!(doc.caret_line_col(), (2, 4));
        doc.move_caret(CaretMove::Up);
        doc.move_caret(CaretMove::Up);
        assert_eq!(doc.caret_line_col(), (0, 4));
    }

    #[test]
    fn test_vertical_movement_at_edges() {
        let mut doc = Document::with_text("one\ntwo");
        assert!(!doc.move_caret(CaretMove::Up));
        doc.move_caret(CaretMove::DocumentEnd);
        assert!(!doc.move_caret(CaretMove::Down));
    }

    #[test]
    fn test_line_start_end() {
        let mut doc = Document::with_text("first\nsecond");
        doc.set_caret(9);
        doc.move_caret(CaretMove::LineStart);
        assert_eq!(doc.caret(), 6);
        doc.move_caret(CaretMove::LineEnd);
        assert_eq!(doc.caret(), 12);
        assert_eq!(doc.line_count(), 2);
    }

    #[test]
    fn test_set_caret_snaps_to_char_boundary() {
        let mut doc = Document::with_text("aé");
        doc.set_caret(2);
        assert_eq!(doc.caret(), 1);
        doc.set_caret(100);
        assert_eq!(doc.caret(), 3);
    }

    #[test]
    fn test_select_match_highlights_until_edit() {
        let mut doc = Document::with_text("find me");
        doc.select_match(5..7);
        assert_eq!(doc.highlight(), Some(5..7));
        assert_eq!(doc.caret(), 7);
        doc.insert_char('x');
        assert_eq!(doc.highlight(), None);
    }

    #[test]
    fn test_open_save_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.md");
        fs::write(&path, "line one\r\nline two\r\n").unwrap();

        let mut doc = Document::open(&path).unwrap();
        assert_eq!(doc.text(), "line one\nline two\n");
        assert_eq!(doc.display_name(), "notes.md");
        assert!(!doc.is_modified());

        doc.move_caret(CaretMove::DocumentEnd);
        doc.insert_str("three\n");
        doc.save().unwrap();
        assert!(!doc.is_modified());
        assert_eq!(fs::read_to_string(&path).unwrap(), "line one\nline two\nthree\n");
    }

    #[test]
    fn test_save_without_path_fails() {
        let mut doc = Document::with_text("x");
        assert!(matches!(doc.save(), Err(DocumentError::NoPath)));
    }

    #[test]
    fn test_save_as_sets_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        let mut doc = Document::with_text("data");
        doc.save_as(&path).unwrap();
        assert_eq!(doc.path(), Some(path.as_path()));
        assert_eq!(doc.title("DC404 Notes"), "DC404 Notes – out.txt");
    }

    #[test]
    fn test_open_missing_file_errors() {
        let dir = TempDir::new().unwrap();
        let err = Document::open(dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, DocumentError::Open(..)));
    }

    #[test]
    fn test_save_as_failure_keeps_old_path() {
        let dir = TempDir::new().unwrap();
        let mut doc = Document::with_text("data");
        let bad = dir.path().join("no_such_dir").join("out.txt");
        assert!(doc.save_as(&bad).is_err());
        assert!(doc.path().is_none());
    }
}
