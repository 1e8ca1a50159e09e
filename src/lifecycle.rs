//! Scoped acquisition and release of every resource a starfield owns.
//!
//! # Order
//!
//! | Step | Acquire | Release (reverse) |
//! |------|---------|-------------------|
//! | 1 | rendering surface | detach from container, if still attached |
//! | 2 | attach to container | clear and dispose surface |
//! | 3 | geometry buffers | dispose geometry |
//! | 4 | sprite texture | dispose sprite |
//! | 5 | material | dispose material |
//! | 6 | mesh | dispose mesh |
//! | 7 | clock | |
//! | 8 | resize listener | remove listener |
//! | 9 | frame loop | stop frame loop |
//!
//! Every slot is an `Option` that release `take`s, so releasing twice, or
//! releasing a set whose acquisition stopped halfway, only touches what is
//! still owned.

use std::time::Instant;

use glam::Vec3;

use crate::backend::RenderBackend;
use crate::config::StarfieldConfig;
use crate::error::GpuError;
use crate::frame_loop::{FrameLoop, StopHandle};
use crate::gpu::camera::Camera;
use crate::host::{Host, ListenerId};
use crate::spawn::{self, field_rng};
use crate::textures::TextureConfig;
use crate::uniforms::Uniforms;
use crate::viewport::{PhysicalSize, Viewport};

/// Why [`ResourceSet::acquire`] gave up. Whatever was acquired before the
/// failure has already been released.
#[derive(Debug)]
pub enum AcquireError {
    /// The GPU could not provide a surface.
    Gpu(GpuError),
    /// The container disappeared before the surface could be attached.
    Detached,
}

impl std::fmt::Display for AcquireError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AcquireError::Gpu(e) => write!(f, "GPU unavailable: {}", e),
            AcquireError::Detached => write!(f, "container removed before the surface was attached"),
        }
    }
}

impl std::error::Error for AcquireError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AcquireError::Gpu(e) => Some(e),
            AcquireError::Detached => None,
        }
    }
}

impl From<GpuError> for AcquireError {
    fn from(e: GpuError) -> Self {
        AcquireError::Gpu(e)
    }
}

/// Per-frame constants copied out of the config at acquisition.
#[derive(Debug, Clone, Copy)]
struct FrameParams {
    half_depth: f32,
    size_attenuation: f32,
    max_point_size: f32,
    speed: f32,
    background: Vec3,
}

/// Every GPU and host resource of one mounted starfield.
pub struct ResourceSet<B: RenderBackend> {
    surface: Option<B::Surface>,
    attached: bool,
    geometry: Option<B::Geometry>,
    sprite: Option<B::Sprite>,
    material: Option<B::Material>,
    mesh: Option<B::Mesh>,
    clock: Option<Instant>,
    listener: Option<ListenerId>,
    frame_loop: Option<FrameLoop>,
    camera: Camera,
    viewport: Viewport,
    params: FrameParams,
    last_uniforms: Option<Uniforms>,
}

impl<B: RenderBackend> ResourceSet<B> {
    fn empty(config: &StarfieldConfig) -> Self {
        Self {
            surface: None,
            attached: false,
            geometry: None,
            sprite: None,
            material: None,
            mesh: None,
            clock: None,
            listener: None,
            frame_loop: None,
            camera: config.camera(),
            viewport: Viewport::new(config.max_pixel_ratio),
            params: FrameParams {
                half_depth: config.half_depth,
                size_attenuation: config.size_attenuation,
                max_point_size: config.max_point_size,
                speed: config.speed,
                background: config.background,
            },
            last_uniforms: None,
        }
    }

    /// Acquire everything in order and start the frame loop.
    ///
    /// On failure the partially acquired set is released before returning.
    pub fn acquire<H: Host + ?Sized>(
        config: &StarfieldConfig,
        backend: &mut B,
        host: &mut H,
    ) -> Result<Self, AcquireError> {
        let mut set = Self::empty(config);
        match set.acquire_steps(config, backend, host) {
            Ok(()) => {
                log::info!("starfield mounted with {} stars", config.particle_count);
                Ok(set)
            }
            Err(e) => {
                log::warn!("starfield acquisition interrupted: {}", e);
                set.release(backend, host);
                Err(e)
            }
        }
    }

    fn acquire_steps<H: Host + ?Sized>(
        &mut self,
        config: &StarfieldConfig,
        backend: &mut B,
        host: &mut H,
    ) -> Result<(), AcquireError> {
        let (width, height) = host.container_size();
        let ratio = host.device_pixel_ratio().clamp(1.0, config.max_pixel_ratio.max(1.0));
        let initial = PhysicalSize::new(
            ((width as f64 * ratio).round() as u32).max(1),
            ((height as f64 * ratio).round() as u32).max(1),
        );

        log::debug!("acquire: surface {}x{}", initial.width, initial.height);
        let surface = self.surface.insert(backend.create_surface(initial)?);

        if !host.attach_surface() {
            return Err(AcquireError::Detached);
        }
        self.attached = true;

        let field = spawn::generate(
            &config.field_params(),
            config.palette.colors(),
            &mut field_rng(config.seed),
        );
        log::debug!("acquire: geometry ({} stars)", field.len());
        let geometry = self.geometry.insert(backend.create_geometry(surface, &field));

        log::debug!("acquire: sprite {}px", config.sprite_size);
        let sprite = self
            .sprite
            .insert(backend.create_sprite(surface, &TextureConfig::radial_sprite(config.sprite_size)));

        log::debug!("acquire: material");
        let material = self
            .material
            .insert(backend.create_material(surface, sprite, &config.material_desc()));

        self.mesh = Some(backend.create_mesh(geometry, material));

        let mounted_at = *self.clock.insert(Instant::now());

        self.listener = Some(host.add_resize_listener());

        self.resize(width, height, backend, host.device_pixel_ratio());

        self.frame_loop = Some(FrameLoop::start_at(host, mounted_at, self.params.speed));
        Ok(())
    }

    /// Release everything still owned, in reverse acquisition order.
    ///
    /// Safe to call any number of times.
    pub fn release<H: Host + ?Sized>(&mut self, backend: &mut B, host: &mut H) {
        if let Some(mut frame_loop) = self.frame_loop.take() {
            frame_loop.stop(host);
        }
        if let Some(id) = self.listener.take() {
            host.remove_resize_listener(id);
        }
        self.clock = None;
        if let Some(mesh) = self.mesh.take() {
            backend.dispose_mesh(mesh);
        }
        if let Some(material) = self.material.take() {
            backend.dispose_material(material);
        }
        if let Some(sprite) = self.sprite.take() {
            backend.dispose_sprite(sprite);
        }
        if let Some(geometry) = self.geometry.take() {
            backend.dispose_geometry(geometry);
        }
        if let Some(mut surface) = self.surface.take() {
            // The window outlives the surface; leave it blank, not frozen.
            if self.attached {
                if let Err(e) = backend.clear_surface(&mut surface, self.params.background) {
                    log::warn!("release: final clear failed: {}", e);
                }
            }
            backend.dispose_surface(surface);
            log::debug!("release: surface disposed");
        }
        if self.attached {
            self.attached = false;
            if host.is_surface_attached() {
                host.detach_surface();
            }
        }
    }

    /// Apply a container size. Zero dimensions are ignored.
    pub fn resize(&mut self, width: u32, height: u32, backend: &mut B, device_pixel_ratio: f64) {
        let Some(size) = self.viewport.resize(&mut self.camera, width, height, device_pixel_ratio) else {
            return;
        };
        if let Some(surface) = self.surface.as_mut() {
            backend.resize_surface(surface, size);
        }
    }

    /// Produce one frame if the loop is running.
    ///
    /// Returns whether a frame was produced. A frame before the first
    /// non-degenerate resize advances the clock but draws nothing.
    pub fn frame<H: Host + ?Sized>(
        &mut self,
        now: Instant,
        backend: &mut B,
        host: &mut H,
    ) -> Result<bool, GpuError> {
        let (Some(frame_loop), Some(surface), Some(geometry), Some(material), Some(mesh)) = (
            self.frame_loop.as_mut(),
            self.surface.as_mut(),
            self.geometry.as_ref(),
            self.material.as_ref(),
            self.mesh.as_ref(),
        ) else {
            return Ok(false);
        };

        let camera = &self.camera;
        let viewport = &self.viewport;
        let params = self.params;
        let last_uniforms = &mut self.last_uniforms;
        let mut result = Ok(());

        let produced = frame_loop.advance(now, host, |ft| {
            let Some(size) = viewport.physical_size() else {
                return;
            };
            let uniforms = Uniforms::new(
                camera.view_matrix(),
                camera.projection_matrix(),
                [size.width as f32, size.height as f32],
                ft.scaled,
                params.half_depth,
                params.size_attenuation,
                params.max_point_size,
            );
            *last_uniforms = Some(uniforms);
            result = backend.draw(surface, geometry, material, mesh, &uniforms);
        });

        result.map(|()| produced)
    }

    /// A handle that stops this set's frame loop.
    pub fn stop_handle(&self) -> Option<StopHandle> {
        self.frame_loop.as_ref().map(FrameLoop::handle)
    }

    /// Whether frames are still being produced.
    pub fn is_running(&self) -> bool {
        self.frame_loop.as_ref().is_some_and(FrameLoop::is_running)
    }

    /// Whether a resize listener is registered.
    pub fn is_listening(&self) -> bool {
        self.listener.is_some()
    }

    /// Whether nothing is held any more.
    pub fn is_released(&self) -> bool {
        self.surface.is_none()
            && !self.attached
            && self.geometry.is_none()
            && self.sprite.is_none()
            && self.material.is_none()
            && self.mesh.is_none()
            && self.clock.is_none()
            && self.listener.is_none()
            && self.frame_loop.is_none()
    }

    /// The camera.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The resize handler state.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Uniforms uploaded by the most recent drawn frame.
    pub fn last_uniforms(&self) -> Option<&Uniforms> {
        self.last_uniforms.as_ref()
    }
}

impl<B: RenderBackend> Drop for ResourceSet<B> {
    fn drop(&mut self) {
        if !self.is_released() {
            log::warn!("starfield resources dropped without release");
        }
    }
}
