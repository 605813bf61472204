//! Rendering logic
//!
//! Four passes per frame, back to front:
//! 1. clear to the theme background
//! 2. chrome layer (vello): text area, find highlight, caret, status bar
//! 3. document and status text (glyphon)
//! 4. glitch overlay (vello), only while the overlay is raised

pub mod layer;
pub mod text;

use dc404_notes::NotesApp;
use notes_config::Config;
use notes_overlay::SceneSurface;
use notes_theme::{Rgba, Theme};
use vello::Scene;
use vello::kurbo::{Affine, Rect};
use vello::peniko::{Brush, Color, Fill};

use crate::gpu::SharedGpuState;
use crate::window::WindowState;
use text::TextFrame;

/// Caret width in logical pixels
const CARET_WIDTH: f32 = 2.0;

/// Scroll offset that keeps a caret line inside the visible band
fn follow_caret(scroll: f32, caret_top: f32, caret_height: f32, view_height: f32) -> f32 {
    if caret_top < scroll {
        caret_top
    } else if caret_top + caret_height > scroll + view_height {
        caret_top + caret_height - view_height
    } else {
        scroll
    }
}

fn fill(scene: &mut Scene, rect: Rect, color: Rgba) {
    let brush = Brush::Solid(Color::from_rgba8(color.r, color.g, color.b, color.a));
    scene.fill(Fill::NonZero, Affine::IDENTITY, &brush, None, &rect);
}

fn status_text(app: &NotesApp<SceneSurface>, theme: &Theme) -> String {
    if let Some(status) = app.status_line() {
        return status;
    }
    let (line, _) = app.document().caret_line_col();
    let glitch = if app.overlay().is_running() { "on" } else { "off" };
    let wrap = if app.wrap() { "on" } else { "off" };
    format!(
        "Ln {}   {}   wrap {}   glitch {}",
        line + 1,
        theme.name,
        wrap,
        glitch
    )
}

/// Render a single frame
pub fn render_frame(
    state: &mut WindowState,
    shared: &SharedGpuState,
    app: &mut NotesApp<SceneSurface>,
    config: &Config,
) {
    let (width, height) = state.gpu.size();
    if width == 0 || height == 0 {
        return;
    }

    let theme = app.theme();
    let scale = state.scale_factor;
    let padding = config.editor.padding as f32 * scale;
    let line_height = state.gpu.text.line_height();
    let status_height = line_height + padding;
    let editor_bottom = (height as f32 - status_height).max(0.0);
    let view_height = (editor_bottom - padding * 2.0).max(line_height);

    // Layout
    let gpu = &mut state.gpu;
    let text_width = (width as f32 - padding * 2.0).max(1.0);
    gpu.text
        .layout_document(app.document().text(), app.wrap(), text_width);
    let status = status_text(app, theme);
    gpu.text.layout_status(&status, text_width);

    // Scroll
    let (line, column) = app.document().caret_line_col();
    let caret = gpu.text.caret_rect(line, column);
    state.scroll_y += app.take_scroll() as f32 * line_height;
    if app.take_follow_caret() {
        if let Some(caret) = caret {
            state.scroll_y = follow_caret(state.scroll_y, caret.y, caret.height, view_height);
        }
    }
    let max_scroll = (gpu.text.content_height() - view_height).max(0.0);
    state.scroll_y = state.scroll_y.clamp(0.0, max_scroll);
    let origin = (padding, padding - state.scroll_y);

    // Chrome scene
    let scene = &mut gpu.chrome_scene;
    scene.reset();
    fill(
        scene,
        Rect::new(0.0, 0.0, width as f64, editor_bottom as f64),
        theme.text_background,
    );
    if let Some(range) = app.document().highlight() {
        for r in gpu.text.range_rects(range) {
            let x = (origin.0 + r.x) as f64;
            let y = (origin.1 + r.y) as f64;
            fill(
                scene,
                Rect::new(x, y, x + r.width as f64, y + r.height as f64),
                theme.selection_background,
            );
        }
    }
    if app.prompt().is_none() {
        if let Some(caret) = caret {
            let x = (origin.0 + caret.x) as f64;
            let y = (origin.1 + caret.y) as f64;
            let w = (CARET_WIDTH * scale) as f64;
            fill(
                scene,
                Rect::new(x, y, x + w, y + caret.height as f64),
                theme.caret,
            );
        }
    }
    fill(
        scene,
        Rect::new(0.0, editor_bottom as f64, width as f64, height as f64),
        theme.background,
    );
    fill(
        scene,
        Rect::new(
            0.0,
            editor_bottom as f64,
            width as f64,
            (editor_bottom + scale.max(1.0)) as f64,
        ),
        theme.accent,
    );

    let chrome_view = gpu.chrome.render(
        &mut gpu.vello,
        &shared.device,
        &shared.queue,
        &gpu.chrome_scene,
        (width, height),
    );

    // Overlay scene, re-rendered only when it changed
    let surface = app.overlay_mut().surface_mut();
    let overlay_view = if surface.is_visible() {
        if surface.take_dirty() {
            gpu.overlay.render(
                &mut gpu.vello,
                &shared.device,
                &shared.queue,
                surface.scene(),
                (width, height),
            )
        } else {
            gpu.overlay.view()
        }
    } else {
        None
    };

    // Text
    let status_color = if app.prompt().is_some() {
        theme.accent
    } else {
        theme.foreground
    };
    gpu.text.prepare(
        &shared.device,
        &shared.queue,
        &TextFrame {
            resolution: (width, height),
            document_origin: origin,
            document_clip: (0, 0, width as i32, editor_bottom as i32),
            document_color: theme.foreground,
            status_origin: (padding, editor_bottom + padding / 2.0),
            status_color,
            status: Some(&status),
        },
    );

    let frame = match gpu.surface.get_current_texture() {
        Ok(frame) => frame,
        Err(e) => {
            log::warn!("Failed to acquire frame: {:?}", e);
            gpu.surface.configure(&shared.device, &gpu.config);
            return;
        }
    };
    let view = frame.texture.create_view(&Default::default());
    let mut encoder = shared.device.create_command_encoder(&Default::default());

    // Pass 1: clear
    {
        let [r, g, b, a] = theme.background.to_f64_array();
        let _pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Background Clear Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
    }

    // Pass 2: chrome
    if let Some(chrome) = chrome_view {
        gpu.blitter.copy(&shared.device, &mut encoder, chrome, &view);
    }

    // Pass 3: text
    {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Text Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
        gpu.text.render(&mut pass);
    }

    // Pass 4: glitch overlay
    if let Some(overlay) = overlay_view {
        gpu.blitter.copy(&shared.device, &mut encoder, overlay, &view);
    }

    shared.queue.submit(std::iter::once(encoder.finish()));
    frame.present();
    gpu.text.trim();
}
