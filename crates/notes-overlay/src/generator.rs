//! Randomized glitch composition
//!
//! Each call builds a fresh frame of scanlines, blocks and an occasional
//! flash. Nothing carries over between frames; the effect is noise, not
//! motion, so there is no interpolation state to keep.

use rand::Rng;
use rand::seq::IndexedRandom;

use notes_theme::Rgba;

use crate::frame::{GlitchFrame, PixelRect, PrimitiveKind, Stipple};

/// Surfaces at or below this size in either dimension are not laid out yet
pub const MIN_SURFACE_EXTENT: u32 = 2;

/// Horizontal shifts for chromatic split copies
const SPLIT_DX: [i32; 4] = [-6, -3, 3, 6];
/// Vertical shifts for chromatic split copies
const SPLIT_DY: [i32; 4] = [-2, -1, 1, 2];

/// Tuning knobs for frame generation
#[derive(Debug, Clone, PartialEq)]
pub struct GlitchParams {
    /// Scanlines per frame (inclusive)
    pub scanlines: (u32, u32),
    /// Scanline height in pixels (inclusive)
    pub scanline_height: (u32, u32),
    /// Chance a scanline gets a parallax echo
    pub echo_chance: f64,
    /// Max sideways shift of an echo, either direction
    pub echo_shift: i32,
    /// Blocks per frame (inclusive)
    pub blocks: (u32, u32),
    /// Block height in pixels (inclusive)
    pub block_height: (u32, u32),
    /// How far blocks may hang past either side
    pub block_overhang: i32,
    /// Chance a block gets a chromatic split copy
    pub split_chance: f64,
    /// Chance of a full-surface flash
    pub flash_chance: f64,
}

impl Default for GlitchParams {
    fn default() -> Self {
        Self {
            scanlines: (6, 12),
            scanline_height: (1, 3),
            echo_chance: 0.6,
            echo_shift: 6,
            blocks: (2, 5),
            block_height: (8, 24),
            block_overhang: 10,
            split_chance: 0.7,
            flash_chance: 0.08,
        }
    }
}

/// Whether a surface is big enough to draw on
pub fn is_drawable(width: u32, height: u32) -> bool {
    width > MIN_SURFACE_EXTENT && height > MIN_SURFACE_EXTENT
}

/// Build one frame for a `width` x `height` surface
///
/// Returns `None` when the surface is degenerate or `palette` is empty.
pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    params: &GlitchParams,
    palette: &[Rgba],
    width: u32,
    height: u32,
) -> Option<GlitchFrame> {
    if !is_drawable(width, height) || palette.is_empty() {
        return None;
    }

    let mut frame = GlitchFrame::new();
    scanlines(&mut frame, rng, params, palette, width, height);
    blocks(&mut frame, rng, params, palette, width, height);

    if rng.random_bool(params.flash_chance) {
        let color = pick(rng, palette);
        frame.push(
            PrimitiveKind::Flash,
            PixelRect::new(0, 0, width, height),
            color,
            Stipple::Gray12,
        );
    }

    Some(frame)
}

fn scanlines<R: Rng + ?Sized>(
    frame: &mut GlitchFrame,
    rng: &mut R,
    params: &GlitchParams,
    palette: &[Rgba],
    width: u32,
    height: u32,
) {
    let (min, max) = params.scanlines;
    let (min_h, max_h) = params.scanline_height;
    let max_y = (height - 2).max(1) as i32;

    for _ in 0..rng.random_range(min..=max) {
        let y = rng.random_range(0..=max_y);
        let line_height = rng.random_range(min_h..=max_h);
        let color = pick(rng, palette);
        let rect = PixelRect::new(0, y, width, line_height);

        frame.push(PrimitiveKind::Scanline, rect, color, Stipple::Gray50);

        if rng.random_bool(params.echo_chance) {
            let shift = rng.random_range(-params.echo_shift..=params.echo_shift);
            frame.push(
                PrimitiveKind::ParallaxEcho,
                rect.offset(shift, 1),
                color,
                Stipple::Gray25,
            );
        }
    }
}

fn blocks<R: Rng + ?Sized>(
    frame: &mut GlitchFrame,
    rng: &mut R,
    params: &GlitchParams,
    palette: &[Rgba],
    width: u32,
    height: u32,
) {
    let (min, max) = params.blocks;
    let (min_h, max_h) = params.block_height;
    let overhang = params.block_overhang;

    // Width scales with the surface: 10%..25%, floored at 20..50px
    let min_w = (width / 10).max(20);
    let max_w = (width / 4).max(50);

    for _ in 0..rng.random_range(min..=max) {
        let block_w = rng.random_range(min_w..=max_w);
        let block_h = rng.random_range(min_h..=max_h);

        // Narrow surfaces can leave no room; pin to the left overhang then
        let max_x = (width as i32 - block_w as i32 + overhang).max(-overhang);
        let x = rng.random_range(-overhang..=max_x);
        let max_y = (height as i32 - block_h as i32).max(1);
        let y = rng.random_range(0..=max_y);

        let color = pick(rng, palette);
        let rect = PixelRect::new(x, y, block_w, block_h);
        frame.push(PrimitiveKind::Block, rect, color, Stipple::Gray25);

        if rng.random_bool(params.split_chance) {
            let dx = *SPLIT_DX.choose(rng).unwrap_or(&3);
            let dy = *SPLIT_DY.choose(rng).unwrap_or(&1);
            let split_color = pick(rng, palette);
            frame.push(
                PrimitiveKind::ChromaticSplit,
                rect.offset(dx, dy),
                split_color,
                Stipple::Gray50,
            );
        }
    }
}

/// Uniform pick from a non-empty palette
fn pick<R: Rng + ?Sized>(rng: &mut R, palette: &[Rgba]) -> Rgba {
    palette.choose(rng).copied().unwrap_or(Rgba::hex(0xffffff))
}
