//! Frame model: an ordered list of filled rectangles
//!
//! A frame is rebuilt from scratch every tick and never diffed. Each
//! primitive carries the layer index it was pushed at; surfaces draw in that
//! order, so later primitives end up on top.

use notes_theme::Rgba;

/// Half-tone density used to fake partial transparency
///
/// The GPU surface renders the coverage fraction as alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stipple {
    /// Every other pixel
    Gray50,
    /// One pixel in four
    Gray25,
    /// One pixel in eight; used for full-surface flashes
    Gray12,
}

impl Stipple {
    /// Fraction of pixels covered
    pub fn coverage(self) -> f32 {
        match self {
            Stipple::Gray50 => 0.5,
            Stipple::Gray25 => 0.25,
            Stipple::Gray12 => 0.125,
        }
    }
}

/// What a primitive represents in the composition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// Full-width horizontal line, 1-3px tall
    Scanline,
    /// Dimmer copy of a scanline shifted sideways
    ParallaxEcho,
    /// Rectangular block
    Block,
    /// Offset copy of a block in another color (channel misregistration)
    ChromaticSplit,
    /// Whole-surface wash
    Flash,
}

/// Axis-aligned rectangle in surface pixels
///
/// `x` and `y` may be negative; blocks are allowed to hang off the edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Same size, moved by `(dx, dy)`
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }
}

/// One filled rectangle in a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primitive {
    /// Draw order within the frame, starting at 0
    pub layer: usize,
    pub kind: PrimitiveKind,
    pub rect: PixelRect,
    pub color: Rgba,
    pub stipple: Stipple,
}

/// A complete overlay composition for one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlitchFrame {
    primitives: Vec<Primitive>,
}

impl GlitchFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a primitive on top of everything pushed so far
    pub fn push(&mut self, kind: PrimitiveKind, rect: PixelRect, color: Rgba, stipple: Stipple) {
        let layer = self.primitives.len();
        self.primitives.push(Primitive {
            layer,
            kind,
            rect,
            color,
            stipple,
        });
    }

    /// Primitives back to front
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Number of primitives of the given kind
    pub fn count(&self, kind: PrimitiveKind) -> usize {
        self.primitives.iter().filter(|p| p.kind == kind).count()
    }

    pub fn has_flash(&self) -> bool {
        self.count(PrimitiveKind::Flash) > 0
    }

    pub fn summary(&self) -> FrameSummary {
        FrameSummary {
            scanlines: self.count(PrimitiveKind::Scanline),
            echoes: self.count(PrimitiveKind::ParallaxEcho),
            blocks: self.count(PrimitiveKind::Block),
            splits: self.count(PrimitiveKind::ChromaticSplit),
            flash: self.has_flash(),
        }
    }
}

/// Primitive counts for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameSummary {
    pub scanlines: usize,
    pub echoes: usize,
    pub blocks: usize,
    pub splits: usize,
    pub flash: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_assigns_layers_in_order() {
        let mut frame = GlitchFrame::new();
        let red = Rgba::hex(0xff0000);
        frame.push(PrimitiveKind::Scanline, PixelRect::new(0, 0, 10, 1), red, Stipple::Gray50);
        frame.push(PrimitiveKind::Block, PixelRect::new(2, 2, 4, 4), red, Stipple::Gray25);

        let layers: Vec<usize> = frame.primitives().iter().map(|p| p.layer).collect();
        assert_eq!(layers, vec![0, 1]);
        assert_eq!(frame.count(PrimitiveKind::Block), 1);
        assert!(!frame.has_flash());
    }

    #[test]
    fn test_stipple_coverage_ordering() {
        assert!(Stipple::Gray50.coverage() > Stipple::Gray25.coverage());
        assert!(Stipple::Gray25.coverage() > Stipple::Gray12.coverage());
    }

    #[test]
    fn test_rect_offset() {
        let r = PixelRect::new(-10, 5, 30, 8).offset(6, -2);
        assert_eq!(r, PixelRect::new(-4, 3, 30, 8));
        assert_eq!(r.right(), 26);
        assert_eq!(r.bottom(), 11);
    }
}
