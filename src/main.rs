//! DC404 Notes
//!
//! Plain-text note editor with a randomized glitch overlay. The editor logic
//! lives in the library; this binary owns the window, GPU and event loop.
//!
//! The event loop sleeps until input arrives or the overlay's next tick is
//! due (`ControlFlow::WaitUntil`), so an idle editor with the overlay off
//! uses no CPU.

mod gpu;
mod render;
mod window;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use dc404_notes::input::{self, Command};
use dc404_notes::{NotesApp, Outcome, WindowGeometry};
use notes_config::{Config, Session, SessionStore};
use notes_overlay::{GlitchOverlay, SceneSurface};

use gpu::SharedGpuState;
use render::render_frame;
use window::WindowState;

use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalPosition, PhysicalSize},
    event::{ElementState, Modifiers, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::Key,
    window::{Window, WindowId},
};

/// Lines scrolled per mouse wheel notch
const WHEEL_LINES: f32 = 3.0;

#[derive(Parser, Debug)]
#[command(name = "dc404-notes", version, about = "Plain-text notes with a glitch overlay")]
struct Cli {
    /// File to open instead of the last one
    file: Option<PathBuf>,

    /// Session state file (default: ~/.config/dc404notes/state.toml)
    #[arg(long, value_name = "PATH")]
    state: Option<PathBuf>,
}

struct App {
    config: Config,
    notes: NotesApp<SceneSurface>,
    window: Option<WindowState>,
    shared_gpu: Option<SharedGpuState>,
    modifiers: Modifiers,
    clipboard: Option<arboard::Clipboard>,
    /// Set when the window could not be created
    startup_error: Option<anyhow::Error>,
}

impl App {
    fn new(config: Config, notes: NotesApp<SceneSurface>) -> Self {
        let clipboard = arboard::Clipboard::new()
            .inspect_err(|e| log::warn!("Clipboard unavailable: {}", e))
            .ok();

        Self {
            config,
            notes,
            window: None,
            shared_gpu: None,
            modifiers: Modifiers::default(),
            clipboard,
            startup_error: None,
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        if self.shared_gpu.is_none() {
            self.shared_gpu = Some(SharedGpuState::new()?);
        }
        let Some(shared) = self.shared_gpu.as_ref() else {
            return Ok(());
        };

        let mut attrs = Window::default_attributes()
            .with_title(self.notes.title(&self.config.window.title));

        let saved = self
            .notes
            .session()
            .state()
            .geometry
            .as_deref()
            .and_then(|g| g.parse::<WindowGeometry>().ok());
        attrs = match saved {
            Some(g) => {
                log::debug!("Restoring window geometry {}", g);
                attrs
                    .with_inner_size(PhysicalSize::new(g.width, g.height))
                    .with_position(PhysicalPosition::new(g.x, g.y))
            }
            None => attrs.with_inner_size(LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            )),
        };

        let window = Arc::new(event_loop.create_window(attrs)?);
        let state = WindowState::new(shared, window, &self.config.font)?;

        let (width, height) = state.gpu.size();
        self.notes.overlay_mut().surface_mut().resize(width, height);
        state.window.request_redraw();
        self.window = Some(state);
        Ok(())
    }

    fn request_redraw(&self) {
        if let Some(state) = &self.window {
            state.window.request_redraw();
        }
    }

    fn handle_command(&mut self, command: Command, event_loop: &ActiveEventLoop) {
        let command = match command {
            Command::Paste => match self.clipboard.as_mut().map(|c| c.get_text()) {
                Some(Ok(text)) => Command::InsertText(text),
                Some(Err(e)) => {
                    log::debug!("Nothing to paste: {}", e);
                    return;
                }
                None => return,
            },
            other => other,
        };

        match self.notes.execute(command) {
            Outcome::Idle => {}
            Outcome::Redraw => {
                let title = self.notes.title(&self.config.window.title);
                if let Some(state) = &mut self.window {
                    state.set_title(title);
                    state.window.request_redraw();
                }
            }
            Outcome::Quit => {
                self.shutdown();
                event_loop.exit();
            }
        }
    }

    fn shutdown(&mut self) {
        let geometry = self
            .window
            .as_ref()
            .and_then(WindowState::geometry)
            .map(|g| g.to_string());
        self.notes.shutdown(geometry);
        self.window = None;
    }

    fn modifier_state(&self) -> input::Modifiers {
        let state = self.modifiers.state();
        input::Modifiers {
            command: state.super_key(),
            control: state.control_key(),
            shift: state.shift_key(),
            alt: state.alt_key(),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.create_window(event_loop) {
            log::error!("Failed to create window: {:#}", e);
            self.startup_error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.handle_command(Command::Quit, event_loop),
            WindowEvent::ModifiersChanged(m) => self.modifiers = m,
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                let modifiers = self.modifier_state();
                let Some(command) = input::key_to_command(&event.logical_key, modifiers) else {
                    return;
                };
                // Prefer the composed text (dead keys, IME) for plain characters
                let command = match (command, &event.logical_key, &event.text) {
                    (Command::InsertText(_), Key::Character(_), Some(text)) => {
                        Command::InsertText(text.to_string())
                    }
                    (command, _, _) => command,
                };
                self.handle_command(command, event_loop);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -y * WHEEL_LINES,
                    MouseScrollDelta::PixelDelta(p) => {
                        let line_height = self
                            .window
                            .as_ref()
                            .map_or(20.0, |s| s.gpu.text.line_height());
                        -(p.y as f32) / line_height
                    }
                };
                let lines = lines.round() as i32;
                if lines != 0 {
                    self.handle_command(Command::ScrollLines(lines), event_loop);
                }
            }
            WindowEvent::Resized(size) => {
                if let (Some(state), Some(shared)) = (&mut self.window, &self.shared_gpu) {
                    state.gpu.resize(&shared.device, size.width, size.height);
                    state.window.request_redraw();
                }
                self.notes
                    .overlay_mut()
                    .surface_mut()
                    .resize(size.width, size.height);
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(state) = &mut self.window {
                    state.set_scale_factor(scale_factor as f32, &self.config.font);
                    state.window.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => {
                if let (Some(state), Some(shared)) = (&mut self.window, &self.shared_gpu) {
                    render_frame(state, shared, &mut self.notes, &self.config);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.notes.poll(Instant::now()) {
            self.request_redraw();
        }

        match self.notes.next_deadline() {
            Some(deadline) => event_loop.set_control_flow(ControlFlow::WaitUntil(deadline)),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn,dc404_notes=info"))
        .init();
    let cli = Cli::parse();
    log::info!("DC404 Notes starting");

    let config = Config::load();
    let store = match cli.state {
        Some(path) => SessionStore::at(path),
        None => SessionStore::default_location(),
    };
    let session = Session::load(store);
    let overlay = GlitchOverlay::new(SceneSurface::default());
    let notes = NotesApp::new(session, overlay, cli.file);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);
    let mut app = App::new(config, notes);
    event_loop.run_app(&mut app)?;

    match app.startup_error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
