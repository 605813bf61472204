//! Mock surface for testing
//!
//! Provides a MockSurface that implements `OverlaySurface` and records
//! every call for test assertions, without requiring a GPU context.

use crate::frame::{Primitive, PrimitiveKind};
use crate::surface::{OverlayLayer, OverlaySurface};

/// Record of a surface call for test inspection
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    Clear,
    Draw(Primitive),
    SetLayer(OverlayLayer),
}

/// A surface that records calls and keeps the currently drawn primitives
#[derive(Debug, Default)]
pub struct MockSurface {
    /// All calls made to this surface
    pub calls: Vec<SurfaceCall>,
    /// Primitives drawn since the last clear
    pub drawn: Vec<Primitive>,
    pub width: u32,
    pub height: u32,
    layer: OverlayLayer,
}

impl MockSurface {
    /// Create a mock surface with the given size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Change the reported size, like a window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Clear all recorded calls (keeps drawn state)
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Number of `draw` calls ever made
    pub fn total_draws(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, SurfaceCall::Draw(_)))
            .count()
    }

    /// Number of currently drawn primitives of a kind
    pub fn drawn_count(&self, kind: PrimitiveKind) -> usize {
        self.drawn.iter().filter(|p| p.kind == kind).count()
    }

    pub fn is_raised(&self) -> bool {
        self.layer == OverlayLayer::Raised
    }
}

impl OverlaySurface for MockSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.calls.push(SurfaceCall::Clear);
        self.drawn.clear();
    }

    fn draw(&mut self, primitive: &Primitive) {
        self.calls.push(SurfaceCall::Draw(*primitive));
        self.drawn.push(*primitive);
    }

    fn set_layer(&mut self, layer: OverlayLayer) {
        self.calls.push(SurfaceCall::SetLayer(layer));
        self.layer = layer;
    }

    fn layer(&self) -> OverlayLayer {
        self.layer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{GlitchFrame, PixelRect, Stipple};
    use notes_theme::Rgba;

    #[test]
    fn test_present_replaces_contents() {
        let mut surface = MockSurface::new(100, 100);
        let mut frame = GlitchFrame::new();
        let c = Rgba::hex(0x00e5ff);
        frame.push(PrimitiveKind::Block, PixelRect::new(0, 0, 5, 5), c, Stipple::Gray25);
        frame.push(PrimitiveKind::Block, PixelRect::new(1, 1, 5, 5), c, Stipple::Gray25);

        surface.present(&frame);
        surface.present(&frame);

        assert_eq!(surface.drawn.len(), 2);
        assert_eq!(surface.total_draws(), 4);
        assert_eq!(surface.calls[0], SurfaceCall::Clear);
    }

    #[test]
    fn test_starts_lowered() {
        let surface = MockSurface::new(10, 10);
        assert_eq!(surface.layer(), OverlayLayer::Lowered);
        assert!(!surface.is_raised());
    }
}
