//! The per-frame uniform block shared by both shader stages.
//!
//! Layout matches `struct Uniforms` in `shaders/starfield.wgsl` under WGSL
//! uniform address-space rules. Every write is a full overwrite.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// GPU uniform block.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Uniforms {
    /// World-to-view (model-view, the model being identity).
    pub view: [[f32; 4]; 4],
    /// View-to-clip projection.
    pub proj: [[f32; 4]; 4],
    /// Output surface size in physical pixels.
    pub viewport: [f32; 2],
    /// Scaled time driving the depth wrap.
    pub time: f32,
    /// Half-depth `D` of the wrap band.
    pub half_depth: f32,
    /// Size attenuation constant `k`.
    pub size_attenuation: f32,
    /// Upper bound for on-screen point size in pixels.
    pub max_point_size: f32,
    pub _padding: [f32; 2],
}

impl Uniforms {
    /// Size of the block in bytes.
    pub const SIZE: usize = std::mem::size_of::<Uniforms>();

    /// Assemble a block from camera matrices and per-frame values.
    pub fn new(
        view: Mat4,
        proj: Mat4,
        viewport: [f32; 2],
        time: f32,
        half_depth: f32,
        size_attenuation: f32,
        max_point_size: f32,
    ) -> Self {
        Self {
            view: view.to_cols_array_2d(),
            proj: proj.to_cols_array_2d(),
            viewport,
            time,
            half_depth,
            size_attenuation,
            max_point_size,
            _padding: [0.0; 2],
        }
    }

    /// Raw bytes for upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
