//! Window state management
//!
//! The editor window with its GPU resources and view state (scroll, scale).

use std::sync::Arc;

use dc404_notes::WindowGeometry;
use glyphon::Metrics;
use notes_config::FontConfig;
use winit::window::Window;

use crate::gpu::{SharedGpuState, WindowGpuState};

pub struct WindowState {
    pub window: Arc<Window>,
    pub gpu: WindowGpuState,
    /// Document scroll offset in physical pixels
    pub scroll_y: f32,
    pub scale_factor: f32,
    /// Title last sent to the window system
    title: String,
}

impl WindowState {
    pub fn new(
        shared: &SharedGpuState,
        window: Arc<Window>,
        font: &FontConfig,
    ) -> anyhow::Result<Self> {
        let scale_factor = window.scale_factor() as f32;
        let gpu = WindowGpuState::new(shared, window.clone(), font_metrics(font, scale_factor))?;
        Ok(Self {
            window,
            gpu,
            scroll_y: 0.0,
            scale_factor,
            title: String::new(),
        })
    }

    pub fn set_scale_factor(&mut self, scale_factor: f32, font: &FontConfig) {
        self.scale_factor = scale_factor;
        self.gpu.text.set_metrics(font_metrics(font, scale_factor));
    }

    /// Update the title bar only when the text changes
    pub fn set_title(&mut self, title: String) {
        if self.title != title {
            self.window.set_title(&title);
            self.title = title;
        }
    }

    /// Current placement, for the session record
    pub fn geometry(&self) -> Option<WindowGeometry> {
        let size = self.window.inner_size();
        let position = self.window.outer_position().ok()?;
        Some(WindowGeometry {
            width: size.width,
            height: size.height,
            x: position.x,
            y: position.y,
        })
    }
}

/// Font metrics in physical pixels
pub fn font_metrics(font: &FontConfig, scale_factor: f32) -> Metrics {
    let size = font.size * scale_factor;
    Metrics::new(size, (size * font.line_height).ceil())
}
