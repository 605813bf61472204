//! Editor controller
//!
//! [`NotesApp`] ties the document, find state and prompt line to the session
//! record and the glitch overlay. Every [`Command`] goes through
//! [`NotesApp::execute`]; the window shell only translates input, reads the
//! clipboard and draws.
//!
//! Session writes happen at the points the user changes something tracked:
//! theme, wrap, glitch toggle, the opened or saved-as file, and window
//! geometry at shutdown.

use std::path::{Path, PathBuf};
use std::time::Instant;

use notes_config::Session;
use notes_overlay::{GlitchOverlay, OverlaySurface};
use notes_theme::Theme;
use rand::Rng;
use rand::rngs::StdRng;

use crate::input::Command;
use crate::state::{Document, DocumentError, FindState, NOT_FOUND, Prompt, PromptKind};
use crate::templates;

/// What the window shell should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing visible changed
    Idle,
    /// Repaint
    Redraw,
    /// Close the window (call [`NotesApp::shutdown`] first)
    Quit,
}

const UNSAVED_WARNING: &str = "Unsaved changes. Repeat to discard, or Ctrl+S to save.";

/// The editor and everything it drives
pub struct NotesApp<S, R = StdRng> {
    document: Document,
    find: FindState,
    prompt: Option<Prompt>,
    status: Option<String>,
    /// Discarding command waiting for a repeat
    confirm: Option<Command>,
    /// Lines to scroll, consumed by the renderer
    pending_scroll: i32,
    /// Caret moved or text changed; the view should bring the caret into view
    follow_caret: bool,
    session: Session,
    overlay: GlitchOverlay<S, R>,
}

impl<S: OverlaySurface, R: Rng> NotesApp<S, R> {
    /// Restore the session
    ///
    /// `file` (from the command line) wins over the remembered last file.
    /// Theme and overlay state come from the session record.
    pub fn new(session: Session, overlay: GlitchOverlay<S, R>, file: Option<PathBuf>) -> Self {
        let mut app = Self {
            document: Document::new(),
            find: FindState::new(),
            prompt: None,
            status: None,
            confirm: None,
            pending_scroll: 0,
            follow_caret: true,
            session,
            overlay,
        };

        let state = app.session.state();
        app.overlay.set_theme(&state.theme);
        let glitch_on = state.glitch_on;

        match file {
            Some(path) => {
                app.open_path(&path);
            }
            None => {
                if let Some(last) = app.session.state().restorable_last_file() {
                    let last = last.to_path_buf();
                    match Document::open(&last) {
                        Ok(document) => app.document = document,
                        Err(e) => log::warn!("Could not reopen last file: {}", e),
                    }
                }
            }
        }

        app.overlay.set_enabled(glitch_on);
        log::info!(
            "Session restored (theme {}, wrap {}, glitch {})",
            app.overlay.theme().name,
            app.wrap(),
            glitch_on
        );
        app
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn overlay(&self) -> &GlitchOverlay<S, R> {
        &self.overlay
    }

    pub fn overlay_mut(&mut self) -> &mut GlitchOverlay<S, R> {
        &mut self.overlay
    }

    /// Active theme (unknown persisted names resolve to the default)
    pub fn theme(&self) -> &'static Theme {
        self.overlay.theme()
    }

    pub fn wrap(&self) -> bool {
        self.session.state().wrap
    }

    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    /// Text for the status line: the open prompt, else the last message
    pub fn status_line(&self) -> Option<String> {
        match &self.prompt {
            Some(prompt) => Some(prompt.display()),
            None => self.status.clone(),
        }
    }

    /// Window title for the current document
    pub fn title(&self, app_name: &str) -> String {
        self.document.title(app_name)
    }

    /// Lines the user asked to scroll since the last frame
    pub fn take_scroll(&mut self) -> i32 {
        std::mem::take(&mut self.pending_scroll)
    }

    /// Whether the view should scroll the caret into view
    pub fn take_follow_caret(&mut self) -> bool {
        std::mem::take(&mut self.follow_caret)
    }

    /// Drive the overlay timer; returns whether a frame was drawn
    pub fn poll(&mut self, now: Instant) -> bool {
        self.overlay.poll(now)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.overlay.next_deadline()
    }

    /// Run one command
    pub fn execute(&mut self, command: Command) -> Outcome {
        let confirmed = self.confirm.take().is_some_and(|pending| pending == command);

        if self.prompt.is_some() {
            if let Some(outcome) = self.prompt_input(&command) {
                return outcome;
            }
        }

        if command.discards_changes() && self.document.is_modified() && !confirmed {
            self.status = Some(UNSAVED_WARNING.to_string());
            self.confirm = Some(command);
            return Outcome::Redraw;
        }

        match command {
            Command::InsertText(text) => self.edit(|doc| doc.insert_str(&text)),
            Command::Newline => self.edit(|doc| doc.insert_char('\n')),
            Command::Backspace => self.edit(|doc| {
                doc.backspace();
            }),
            Command::Delete => self.edit(|doc| {
                doc.delete();
            }),
            Command::MoveCaret(movement) => {
                self.document.move_caret(movement);
                self.follow_caret = true;
                Outcome::Redraw
            }
            Command::InsertTemplate(index) => match templates::by_index(index) {
                Some(template) => self.edit(|doc| doc.insert_str(template.body)),
                None => Outcome::Idle,
            },
            Command::Paste => {
                log::debug!("Paste reached the editor without clipboard text");
                Outcome::Idle
            }
            Command::Cancel => {
                self.status = None;
                Outcome::Redraw
            }

            Command::NewFile => {
                self.document = Document::new();
                self.find.reset();
                self.status = None;
                self.follow_caret = true;
                Outcome::Redraw
            }
            Command::OpenFile => {
                let dir = self
                    .document
                    .path()
                    .and_then(Path::parent)
                    .map(|p| format!("{}/", p.display()))
                    .unwrap_or_default();
                self.open_prompt(Prompt::with_input(PromptKind::Open, dir))
            }
            Command::Save => self.save(),
            Command::SaveAs => self.open_save_as_prompt(),
            Command::Quit => Outcome::Quit,

            Command::Find => {
                let query = self.find.query().to_string();
                self.open_prompt(Prompt::with_input(PromptKind::Find, query))
            }
            Command::FindNext => {
                if !self.find.has_query() {
                    return self.execute(Command::Find);
                }
                let found = self.find.find_next(self.document.text());
                self.show_find_result(found)
            }

            Command::ToggleWrap => {
                self.session.update(|s| s.wrap = !s.wrap);
                self.follow_caret = true;
                Outcome::Redraw
            }
            Command::CycleTheme => {
                let next = notes_theme::next_theme(&self.session.state().theme);
                self.set_theme(next);
                Outcome::Redraw
            }
            Command::ToggleGlitch => {
                let on = !self.session.state().glitch_on;
                self.set_glitch(on);
                Outcome::Redraw
            }
            Command::ScrollLines(lines) => {
                self.pending_scroll += lines;
                Outcome::Redraw
            }
        }
    }

    /// Activate a theme by name and remember it
    pub fn set_theme(&mut self, name: &str) {
        self.session.update(|s| s.theme = name.to_string());
        self.overlay.set_theme(name);
        self.status = Some(format!("Theme: {}", self.overlay.theme().name));
        log::info!("Theme changed to {}", name);
    }

    /// Turn the overlay on or off; the choice is persisted before the
    /// animation changes
    pub fn set_glitch(&mut self, on: bool) {
        self.session.update(|s| s.glitch_on = on);
        self.overlay.set_enabled(on);
    }

    /// Record the window geometry, flush the session and stop the overlay
    pub fn shutdown(&mut self, geometry: Option<String>) {
        if let Some(geometry) = geometry {
            self.session.update(|s| s.geometry = Some(geometry));
        } else {
            self.session.flush();
        }
        self.overlay.stop();
        log::info!("Session saved");
    }

    fn edit(&mut self, f: impl FnOnce(&mut Document)) -> Outcome {
        f(&mut self.document);
        self.status = None;
        self.follow_caret = true;
        Outcome::Redraw
    }

    fn open_prompt(&mut self, prompt: Prompt) -> Outcome {
        self.prompt = Some(prompt);
        Outcome::Redraw
    }

    fn open_save_as_prompt(&mut self) -> Outcome {
        let current = self
            .document
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        self.open_prompt(Prompt::with_input(PromptKind::SaveAs, current))
    }

    /// Route a command to the open prompt
    ///
    /// Returns `None` for commands the prompt does not consume (shortcuts
    /// such as the glitch toggle still work while it is open).
    fn prompt_input(&mut self, command: &Command) -> Option<Outcome> {
        let prompt = self.prompt.as_mut()?;
        match command {
            Command::InsertText(text) => prompt.push_str(text),
            Command::Backspace => prompt.pop(),
            Command::Cancel => self.prompt = None,
            Command::Newline => {
                let prompt = self.prompt.take()?;
                return Some(self.submit(prompt));
            }
            Command::Delete | Command::MoveCaret(_) | Command::ScrollLines(_) => {}
            _ => return None,
        }
        Some(Outcome::Redraw)
    }

    fn submit(&mut self, prompt: Prompt) -> Outcome {
        let input = prompt.input().trim();
        if input.is_empty() {
            return Outcome::Redraw;
        }

        match prompt.kind {
            PromptKind::Find => {
                let found = self.find.find_first(self.document.text(), input);
                self.show_find_result(found)
            }
            PromptKind::Open => {
                let path = expand_home(input);
                self.open_path(&path);
                Outcome::Redraw
            }
            PromptKind::SaveAs => {
                let path = expand_home(input);
                let result = self.document.save_as(&path);
                self.report_save(result);
                if self.document.path() == Some(path.as_path()) {
                    self.session.update(|s| s.last_file = Some(path));
                }
                Outcome::Redraw
            }
        }
    }

    fn save(&mut self) -> Outcome {
        if self.document.path().is_none() {
            return self.open_save_as_prompt();
        }
        let result = self.document.save();
        self.report_save(result);
        Outcome::Redraw
    }

    fn report_save(&mut self, result: Result<(), DocumentError>) {
        self.status = Some(match result {
            Ok(()) => format!("Saved {}", self.document.display_name()),
            Err(e) => {
                log::error!("{}", e);
                format!("Save failed: {}", e)
            }
        });
    }

    /// Replace the document with a file and remember it
    fn open_path(&mut self, path: &Path) -> bool {
        match Document::open(path) {
            Ok(document) => {
                self.document = document;
                self.find.reset();
                self.follow_caret = true;
                self.status = Some(format!("Opened {}", self.document.display_name()));
                let path = path.to_path_buf();
                self.session.update(|s| s.last_file = Some(path));
                true
            }
            Err(e) => {
                log::error!("{}", e);
                self.status = Some(format!("Open failed: {}", e));
                false
            }
        }
    }

    fn show_find_result(&mut self, found: Option<std::ops::Range<usize>>) -> Outcome {
        match found {
            Some(range) => {
                self.document.select_match(range);
                self.status = None;
                self.follow_caret = true;
            }
            None => self.status = Some(NOT_FOUND.to_string()),
        }
        Outcome::Redraw
    }
}

/// Expand a leading `~/` to the home directory
fn expand_home(input: &str) -> PathBuf {
    match input.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(input)),
        None => PathBuf::from(input),
    }
}
