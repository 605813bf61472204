//! Offscreen vello layer
//!
//! A scene rendered to a cached `Rgba8Unorm` texture, later alpha-blended
//! onto the frame. Used for the editor chrome (caret, find highlight, status
//! bar) and for the glitch overlay.

use vello::{AaConfig, RenderParams, Renderer, Scene, peniko};

pub struct LayerTarget {
    label: &'static str,
    texture: Option<wgpu::Texture>,
    view: Option<wgpu::TextureView>,
    size: (u32, u32),
}

impl LayerTarget {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            texture: None,
            view: None,
            size: (0, 0),
        }
    }

    /// Reallocate the texture when the frame size changes
    fn ensure(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if self.size == (width, height) && self.texture.is_some() {
            return;
        }

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(self.label),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::STORAGE_BINDING,
            view_formats: &[],
        });
        self.view = Some(texture.create_view(&Default::default()));
        self.texture = Some(texture);
        self.size = (width, height);
    }

    /// Render `scene` into the texture and return its view
    ///
    /// Returns `None` for an empty frame or when vello fails; the caller
    /// skips compositing the layer for that frame.
    pub fn render(
        &mut self,
        renderer: &mut Renderer,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        scene: &Scene,
        size: (u32, u32),
    ) -> Option<&wgpu::TextureView> {
        let (width, height) = size;
        if width == 0 || height == 0 {
            return None;
        }
        self.ensure(device, width, height);
        let view = self.view.as_ref()?;

        let params = RenderParams {
            base_color: peniko::Color::TRANSPARENT,
            width,
            height,
            antialiasing_method: AaConfig::Area,
        };
        if let Err(e) = renderer.render_to_texture(device, queue, scene, view, &params) {
            log::error!("Failed to render {}: {:?}", self.label, e);
            return None;
        }
        Some(view)
    }

    /// Last rendered view, without re-rendering
    pub fn view(&self) -> Option<&wgpu::TextureView> {
        self.view.as_ref()
    }
}
