//! Text layout and rendering via glyphon (cosmic-text + wgpu)
//!
//! One buffer holds the whole document; scrolling moves the text area and
//! the bounds clip it to the editor region. A second single-line buffer
//! holds the status line.

use std::ops::Range;

use glyphon::{
    Attrs, Buffer, Cache, Color, ColorMode, Family, FontSystem, Metrics, Resolution, Shaping,
    SwashCache, TextArea, TextAtlas, TextBounds, TextRenderer, Viewport, Wrap,
};
use notes_theme::Rgba;

/// Caret or highlight box in buffer coordinates (y measured from the text top)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Where and in which colors to draw text this frame
pub struct TextFrame<'a> {
    pub resolution: (u32, u32),
    /// Document origin on screen (scroll already applied)
    pub document_origin: (f32, f32),
    /// Clip box for the document: left, top, right, bottom
    pub document_clip: (i32, i32, i32, i32),
    pub document_color: Rgba,
    pub status_origin: (f32, f32),
    pub status_color: Rgba,
    pub status: Option<&'a str>,
}

pub struct TextView {
    font_system: FontSystem,
    swash_cache: SwashCache,
    viewport: Viewport,
    atlas: TextAtlas,
    renderer: TextRenderer,
    document: Buffer,
    status: Buffer,
    metrics: Metrics,
    /// Text currently laid out in `document`
    shown_text: String,
    wrap: bool,
    /// Byte offset of each line start in `shown_text`
    line_starts: Vec<usize>,
}

impl TextView {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        format: wgpu::TextureFormat,
        metrics: Metrics,
    ) -> Self {
        let mut font_system = FontSystem::new();
        let swash_cache = SwashCache::new();
        let cache = Cache::new(device);
        let viewport = Viewport::new(device, &cache);

        let color_mode = if format.is_srgb() {
            ColorMode::Accurate
        } else {
            ColorMode::Web
        };
        let mut atlas = TextAtlas::with_color_mode(device, queue, &cache, format, color_mode);
        let renderer = TextRenderer::new(&mut atlas, device, wgpu::MultisampleState::default(), None);

        let mut document = Buffer::new(&mut font_system, metrics);
        document.set_wrap(&mut font_system, Wrap::WordOrGlyph);
        let status = Buffer::new(&mut font_system, metrics);

        Self {
            font_system,
            swash_cache,
            viewport,
            atlas,
            renderer,
            document,
            status,
            metrics,
            shown_text: String::new(),
            wrap: true,
            line_starts: vec![0],
        }
    }

    pub fn line_height(&self) -> f32 {
        self.metrics.line_height
    }

    /// Change font metrics (scale factor change)
    pub fn set_metrics(&mut self, metrics: Metrics) {
        if self.metrics == metrics {
            return;
        }
        self.metrics = metrics;
        self.document.set_metrics(&mut self.font_system, metrics);
        self.status.set_metrics(&mut self.font_system, metrics);
    }

    /// Lay out the document for `width` pixels
    ///
    /// Text is only re-shaped when it, the wrap mode or the width changed.
    pub fn layout_document(&mut self, text: &str, wrap: bool, width: f32) {
        if self.wrap != wrap {
            let mode = if wrap { Wrap::WordOrGlyph } else { Wrap::None };
            self.document.set_wrap(&mut self.font_system, mode);
            self.wrap = wrap;
        }
        self.document.set_size(&mut self.font_system, Some(width), None);

        if self.shown_text != text {
            self.document.set_text(
                &mut self.font_system,
                text,
                &Attrs::new().family(Family::Monospace),
                Shaping::Advanced,
                None,
            );
            self.shown_text.clear();
            self.shown_text.push_str(text);
            self.line_starts = line_starts(text);
        }
        self.document.shape_until_scroll(&mut self.font_system, false);
    }

    pub fn layout_status(&mut self, status: &str, width: f32) {
        self.status.set_size(&mut self.font_system, Some(width), Some(self.metrics.line_height));
        self.status.set_text(
            &mut self.font_system,
            status,
            &Attrs::new().family(Family::Monospace),
            Shaping::Advanced,
            None,
        );
        self.status.shape_until_scroll(&mut self.font_system, false);
    }

    /// Height of the laid-out document
    pub fn content_height(&self) -> f32 {
        self.document.layout_runs().count() as f32 * self.metrics.line_height
    }

    /// Caret box for a (line, byte column) position
    pub fn caret_rect(&self, line: usize, column: usize) -> Option<TextRect> {
        let line_height = self.metrics.line_height;
        let mut found = None;

        for run in self.document.layout_runs().filter(|r| r.line_i == line) {
            if let Some(glyph) = run.glyphs.iter().find(|g| g.start <= column && column < g.end) {
                return Some(TextRect {
                    x: glyph.x,
                    y: run.line_top,
                    width: 2.0,
                    height: line_height,
                });
            }
            // Past the last glyph of this run: end of line (or of a wrapped segment)
            let x = run.glyphs.last().map_or(0.0, |g| g.x + g.w);
            found = Some(TextRect {
                x,
                y: run.line_top,
                width: 2.0,
                height: line_height,
            });
        }
        found
    }

    /// Boxes covering a byte range of the document (one per visual line)
    pub fn range_rects(&self, range: Range<usize>) -> Vec<TextRect> {
        let mut rects = Vec::new();
        for run in self.document.layout_runs() {
            let Some(&line_start) = self.line_starts.get(run.line_i) else {
                continue;
            };
            let mut span: Option<(f32, f32)> = None;
            for glyph in run.glyphs {
                let offset = line_start + glyph.start;
                if range.contains(&offset) {
                    let (left, right) = span.get_or_insert((glyph.x, glyph.x + glyph.w));
                    *left = left.min(glyph.x);
                    *right = right.max(glyph.x + glyph.w);
                }
            }
            if let Some((left, right)) = span {
                rects.push(TextRect {
                    x: left,
                    y: run.line_top,
                    width: right - left,
                    height: self.metrics.line_height,
                });
            }
        }
        rects
    }

    /// Upload glyphs for this frame
    pub fn prepare(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, frame: &TextFrame<'_>) {
        let (width, height) = frame.resolution;
        self.viewport.update(queue, Resolution { width, height });

        let (left, top, right, bottom) = frame.document_clip;
        let mut areas = vec![TextArea {
            buffer: &self.document,
            left: frame.document_origin.0,
            top: frame.document_origin.1,
            scale: 1.0,
            bounds: TextBounds {
                left,
                top,
                right,
                bottom,
            },
            default_color: to_glyphon(frame.document_color),
            custom_glyphs: &[],
        }];
        if frame.status.is_some() {
            areas.push(TextArea {
                buffer: &self.status,
                left: frame.status_origin.0,
                top: frame.status_origin.1,
                scale: 1.0,
                bounds: TextBounds {
                    left: 0,
                    top: frame.status_origin.1 as i32,
                    right: width as i32,
                    bottom: height as i32,
                },
                default_color: to_glyphon(frame.status_color),
                custom_glyphs: &[],
            });
        }

        if let Err(e) = self.renderer.prepare(
            device,
            queue,
            &mut self.font_system,
            &mut self.atlas,
            &self.viewport,
            areas,
            &mut self.swash_cache,
        ) {
            log::error!("Failed to prepare text: {:?}", e);
        }
    }

    pub fn render(&self, pass: &mut wgpu::RenderPass<'_>) {
        if let Err(e) = self.renderer.render(&self.atlas, &self.viewport, pass) {
            log::error!("Failed to render text: {:?}", e);
        }
    }

    /// Drop unused glyphs from the atlas after the frame is submitted
    pub fn trim(&mut self) {
        self.atlas.trim();
    }
}

fn to_glyphon(c: Rgba) -> Color {
    Color::rgba(c.r, c.g, c.b, c.a)
}

fn line_starts(text: &str) -> Vec<usize> {
    std::iter::once(0)
        .chain(text.match_indices('\n').map(|(i, _)| i + 1))
        .collect()
}
