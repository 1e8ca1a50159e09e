//! wgpu implementation of [`RenderBackend`].

pub mod camera;
mod geometry;
mod material;
mod sprite;

use std::sync::Arc;

use glam::Vec3;
use winit::window::Window;

pub use geometry::{GeometryBuffers, PointMesh};
pub use material::TunnelMaterial;
pub use sprite::SpriteTexture;

use crate::backend::{MaterialDesc, RenderBackend};
use crate::error::GpuError;
use crate::shader::QUAD_VERTICES;
use crate::spawn::ParticleField;
use crate::textures::TextureConfig;
use crate::uniforms::Uniforms;
use crate::viewport::PhysicalSize;

/// A configured output surface and the device that renders into it.
pub struct GpuSurface {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
}

impl GpuSurface {
    fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Acquire the next frame, clear it to `clear`, record `record` and present.
    ///
    /// Lost or outdated surfaces are reconfigured and the frame is skipped,
    /// as is a timeout.
    fn present_pass<F>(&self, clear: wgpu::Color, record: F) -> Result<(), GpuError>
    where
        F: FnOnce(&mut wgpu::RenderPass<'_>),
    {
        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::trace!("surface timeout, skipping frame");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Starfield Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Starfield Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            record(&mut render_pass);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

/// Opaque clear colour from an RGB triple.
pub(crate) fn to_wgpu_color(color: Vec3) -> wgpu::Color {
    wgpu::Color {
        r: color.x as f64,
        g: color.y as f64,
        b: color.z as f64,
        a: 1.0,
    }
}

/// Renders into a winit window through wgpu.
pub struct WgpuBackend {
    instance: wgpu::Instance,
    window: Arc<Window>,
}

impl WgpuBackend {
    /// Create a backend targeting `window`. No GPU work happens until
    /// [`RenderBackend::create_surface`].
    pub fn new(window: Arc<Window>) -> Self {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY | wgpu::Backends::GL,
            ..Default::default()
        });
        Self { instance, window }
    }

    async fn create_surface_async(&self, size: PhysicalSize) -> Result<GpuSurface, GpuError> {
        let surface = self.instance.create_surface(Arc::clone(&self.window))?;

        let adapter = self
            .instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GpuError::NoAdapter)?;

        log::debug!("using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Starfield Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::MemoryUsage,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or(GpuError::NoAdapter)?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        Ok(GpuSurface {
            surface,
            device,
            queue,
            config,
        })
    }
}

impl RenderBackend for WgpuBackend {
    type Surface = GpuSurface;
    type Geometry = GeometryBuffers;
    type Sprite = SpriteTexture;
    type Material = TunnelMaterial;
    type Mesh = PointMesh;

    fn create_surface(&mut self, size: PhysicalSize) -> Result<GpuSurface, GpuError> {
        pollster::block_on(self.create_surface_async(size))
    }

    fn resize_surface(&mut self, surface: &mut GpuSurface, size: PhysicalSize) {
        if size.width > 0 && size.height > 0 {
            surface.config.width = size.width;
            surface.config.height = size.height;
            surface.reconfigure();
        }
    }

    fn create_geometry(&mut self, surface: &GpuSurface, field: &ParticleField) -> GeometryBuffers {
        GeometryBuffers::new(&surface.device, field)
    }

    fn create_sprite(&mut self, surface: &GpuSurface, sprite: &TextureConfig) -> SpriteTexture {
        SpriteTexture::new(&surface.device, &surface.queue, sprite)
    }

    fn create_material(
        &mut self,
        surface: &GpuSurface,
        sprite: &SpriteTexture,
        desc: &MaterialDesc,
    ) -> TunnelMaterial {
        TunnelMaterial::new(&surface.device, surface.config.format, sprite, desc)
    }

    fn create_mesh(&mut self, geometry: &GeometryBuffers, _material: &TunnelMaterial) -> PointMesh {
        PointMesh {
            vertices_per_instance: QUAD_VERTICES,
            instance_count: geometry.count,
        }
    }

    fn draw(
        &mut self,
        surface: &mut GpuSurface,
        geometry: &GeometryBuffers,
        material: &TunnelMaterial,
        mesh: &PointMesh,
        uniforms: &Uniforms,
    ) -> Result<(), GpuError> {
        material.write_uniforms(&surface.queue, uniforms);
        surface.present_pass(material.clear_color, |render_pass| {
            render_pass.set_pipeline(&material.pipeline);
            render_pass.set_bind_group(0, &material.bind_group, &[]);
            render_pass.set_vertex_buffer(0, geometry.positions.slice(..));
            render_pass.set_vertex_buffer(1, geometry.colors.slice(..));
            render_pass.set_vertex_buffer(2, geometry.sizes.slice(..));
            render_pass.draw(0..mesh.vertices_per_instance, 0..mesh.instance_count);
        })
    }

    fn clear_surface(&mut self, surface: &mut GpuSurface, color: Vec3) -> Result<(), GpuError> {
        surface.present_pass(to_wgpu_color(color), |_| {})
    }

    fn dispose_mesh(&mut self, _mesh: PointMesh) {}

    fn dispose_material(&mut self, material: TunnelMaterial) {
        material.destroy();
    }

    fn dispose_sprite(&mut self, sprite: SpriteTexture) {
        sprite.destroy();
    }

    fn dispose_geometry(&mut self, geometry: GeometryBuffers) {
        geometry.destroy();
    }

    fn dispose_surface(&mut self, surface: GpuSurface) {
        let GpuSurface {
            surface,
            device,
            queue,
            ..
        } = surface;
        // The surface must go before the device that configured it.
        drop(surface);
        drop(queue);
        device.destroy();
    }
}
