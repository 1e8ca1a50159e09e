//! The seam between resource lifecycle and the graphics API.
//!
//! [`ResourceSet`](crate::lifecycle::ResourceSet) only talks to this trait, so
//! the acquire/release discipline can be exercised without a GPU. The
//! production implementation is [`WgpuBackend`](crate::gpu::WgpuBackend).

use glam::Vec3;

use crate::error::GpuError;
use crate::spawn::ParticleField;
use crate::textures::TextureConfig;
use crate::uniforms::Uniforms;
use crate::viewport::PhysicalSize;
use crate::visuals::BlendMode;

/// Everything needed to build the tunnel material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialDesc {
    /// How overlapping stars combine.
    pub blend: BlendMode,
    /// Colour the surface is cleared to before drawing.
    pub clear_color: Vec3,
}

/// Creates, drives and disposes the GPU objects of one starfield.
///
/// Every `create_*` has a matching `dispose_*` that consumes the handle, so a
/// handle can be disposed at most once.
pub trait RenderBackend {
    /// Output surface together with the device that renders into it.
    type Surface;
    /// Position, colour and size attribute buffers.
    type Geometry;
    /// Uploaded sprite texture and its sampler.
    type Sprite;
    /// Shader program, uniform block and bindings.
    type Material;
    /// Draw description tying geometry to material.
    type Mesh;

    /// Acquire the output surface. Failure means no usable GPU.
    fn create_surface(&mut self, size: PhysicalSize) -> Result<Self::Surface, GpuError>;

    /// Reconfigure the surface to a new pixel size.
    fn resize_surface(&mut self, surface: &mut Self::Surface, size: PhysicalSize);

    /// Upload the particle attribute arrays.
    fn create_geometry(&mut self, surface: &Self::Surface, field: &ParticleField) -> Self::Geometry;

    /// Upload the sprite raster.
    fn create_sprite(&mut self, surface: &Self::Surface, sprite: &TextureConfig) -> Self::Sprite;

    /// Compile the shader pair and bind the sprite.
    fn create_material(
        &mut self,
        surface: &Self::Surface,
        sprite: &Self::Sprite,
        desc: &MaterialDesc,
    ) -> Self::Material;

    /// Describe the instanced draw.
    fn create_mesh(&mut self, geometry: &Self::Geometry, material: &Self::Material) -> Self::Mesh;

    /// Upload `uniforms` and draw one frame.
    fn draw(
        &mut self,
        surface: &mut Self::Surface,
        geometry: &Self::Geometry,
        material: &Self::Material,
        mesh: &Self::Mesh,
        uniforms: &Uniforms,
    ) -> Result<(), GpuError>;

    /// Present one frame of plain `color`, so nothing of the field stays
    /// on screen once the surface is gone.
    fn clear_surface(&mut self, surface: &mut Self::Surface, color: Vec3) -> Result<(), GpuError>;

    fn dispose_mesh(&mut self, mesh: Self::Mesh);
    fn dispose_material(&mut self, material: Self::Material);
    fn dispose_sprite(&mut self, sprite: Self::Sprite);
    fn dispose_geometry(&mut self, geometry: Self::Geometry);
    fn dispose_surface(&mut self, surface: Self::Surface);
}
