//! Vello scene surface
//!
//! Records overlay primitives into a `vello::Scene`. The host renders the
//! scene to a texture and composites it above the text while the surface is
//! raised. Stipple density becomes fill alpha; vello blends real alpha, so
//! there is no need to emulate half-tone patterns pixel by pixel.

use vello::Scene;
use vello::kurbo::{Affine, Rect};
use vello::peniko::{Brush, Color, Fill};

use crate::frame::Primitive;
use crate::surface::{OverlayLayer, OverlaySurface};

/// Overlay surface backed by a vello scene
pub struct SceneSurface {
    scene: Scene,
    width: u32,
    height: u32,
    layer: OverlayLayer,
    /// Set whenever the scene changes; cleared by the renderer
    dirty: bool,
}

impl Default for SceneSurface {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl SceneSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            scene: Scene::new(),
            width,
            height,
            layer: OverlayLayer::Lowered,
            dirty: true,
        }
    }

    /// Track the window's inner size
    pub fn resize(&mut self, width: u32, height: u32) {
        if (self.width, self.height) != (width, height) {
            self.width = width;
            self.height = height;
            self.dirty = true;
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Whether the overlay should be composited this frame
    pub fn is_visible(&self) -> bool {
        self.layer == OverlayLayer::Raised
    }

    /// Return and reset the change flag
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

impl OverlaySurface for SceneSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.scene.reset();
        self.dirty = true;
    }

    fn draw(&mut self, primitive: &Primitive) {
        let r = primitive.rect;
        if r.width == 0 || r.height == 0 {
            return;
        }

        let rect = Rect::new(r.x as f64, r.y as f64, r.right() as f64, r.bottom() as f64);
        let alpha = (primitive.stipple.coverage() * primitive.color.a as f32).round() as u8;
        let c = primitive.color;
        let brush = Brush::Solid(Color::from_rgba8(c.r, c.g, c.b, alpha));

        self.scene
            .fill(Fill::NonZero, Affine::IDENTITY, &brush, None, &rect);
        self.dirty = true;
    }

    fn set_layer(&mut self, layer: OverlayLayer) {
        if self.layer != layer {
            log::trace!("Overlay layer -> {:?}", layer);
            self.layer = layer;
            self.dirty = true;
        }
    }

    fn layer(&self) -> OverlayLayer {
        self.layer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{PixelRect, PrimitiveKind, Stipple};
    use notes_theme::Rgba;

    #[test]
    fn test_layer_controls_visibility() {
        let mut surface = SceneSurface::new(100, 100);
        assert!(!surface.is_visible());
        surface.set_layer(OverlayLayer::Raised);
        assert!(surface.is_visible());
    }

    #[test]
    fn test_draw_marks_dirty() {
        let mut surface = SceneSurface::new(100, 100);
        surface.take_dirty();
        surface.draw(&Primitive {
            layer: 0,
            kind: PrimitiveKind::Block,
            rect: PixelRect::new(-5, 10, 40, 8),
            color: Rgba::hex(0xffd400),
            stipple: Stipple::Gray25,
        });
        assert!(surface.take_dirty());
        assert!(!surface.take_dirty());
    }

    #[test]
    fn test_resize_reports_new_size() {
        let mut surface = SceneSurface::default();
        assert_eq!(surface.size(), (0, 0));
        surface.resize(1280, 720);
        assert_eq!(surface.size(), (1280, 720));
    }
}
