//! GPU state management
//!
//! The device is created once; the surface and the renderers that depend on
//! its format belong to the window.

use std::sync::Arc;

use anyhow::{Context, anyhow};
use glyphon::Metrics;
use vello::{Renderer, RendererOptions, Scene};
use winit::window::Window;

use crate::render::layer::LayerTarget;
use crate::render::text::TextView;

/// Device-level resources
pub struct SharedGpuState {
    pub instance: wgpu::Instance,
    pub adapter: wgpu::Adapter,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

impl SharedGpuState {
    pub fn new() -> anyhow::Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: None,
            force_fallback_adapter: false,
        }))
        .context("Failed to find a suitable GPU adapter")?;

        let (device, queue) =
            pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor::default()))
                .context("Failed to create GPU device")?;

        log::info!("Using GPU adapter: {}", adapter.get_info().name);
        Ok(Self {
            instance,
            adapter,
            device,
            queue,
        })
    }
}

/// Per-window GPU state
pub struct WindowGpuState {
    pub surface: wgpu::Surface<'static>,
    pub config: wgpu::SurfaceConfiguration,

    pub vello: Renderer,
    /// Caret, find highlight and status bar
    pub chrome: LayerTarget,
    pub chrome_scene: Scene,
    /// Glitch overlay
    pub overlay: LayerTarget,
    /// Alpha-blends layer textures onto the frame
    pub blitter: wgpu::util::TextureBlitter,

    pub text: TextView,
}

impl WindowGpuState {
    pub fn new(
        shared: &SharedGpuState,
        window: Arc<Window>,
        metrics: Metrics,
    ) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let surface = shared
            .instance
            .create_surface(window)
            .context("Failed to create window surface")?;

        // Layers are Rgba8Unorm; a linear surface keeps their colors as authored
        let caps = surface.get_capabilities(&shared.adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow!("Surface reports no supported formats"))?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&shared.device, &config);

        let vello = Renderer::new(
            &shared.device,
            RendererOptions {
                pipeline_cache: None,
                ..Default::default()
            },
        )
        .map_err(|e| anyhow!("Failed to create vello renderer: {:?}", e))?;

        let blitter = wgpu::util::TextureBlitterBuilder::new(&shared.device, format)
            .blend_state(wgpu::BlendState::ALPHA_BLENDING)
            .build();

        let text = TextView::new(&shared.device, &shared.queue, format, metrics);

        log::debug!("Surface configured: {}x{} {:?}", config.width, config.height, format);
        Ok(Self {
            surface,
            config,
            vello,
            chrome: LayerTarget::new("Chrome Layer"),
            chrome_scene: Scene::new(),
            overlay: LayerTarget::new("Glitch Overlay Layer"),
            blitter,
            text,
        })
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(device, &self.config);
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }
}
