//! Drawing surface abstraction for the overlay
//!
//! The engine only needs to know the surface size, clear it, fill
//! rectangles and move the surface above or below the text. Keeping that
//! behind a trait lets the engine run against a recording mock in tests.

use crate::frame::{GlitchFrame, Primitive};

/// Stacking position of the overlay relative to the text surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayLayer {
    /// Above the text; visible
    Raised,
    /// Below the text; hidden and never receives input
    #[default]
    Lowered,
}

/// A surface the overlay engine can draw on
pub trait OverlaySurface {
    /// Current size in pixels as `(width, height)`
    fn size(&self) -> (u32, u32);

    /// Remove everything drawn so far
    fn clear(&mut self);

    /// Fill one primitive on top of what is already drawn
    fn draw(&mut self, primitive: &Primitive);

    /// Move the surface above or below the text
    fn set_layer(&mut self, layer: OverlayLayer);

    /// Current stacking position
    fn layer(&self) -> OverlayLayer;

    /// Replace the surface contents with `frame`, back to front
    fn present(&mut self, frame: &GlitchFrame) {
        self.clear();
        for primitive in frame.primitives() {
            self.draw(primitive);
        }
    }
}
