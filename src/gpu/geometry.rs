//! Particle attribute buffers.

use wgpu::util::DeviceExt;

use crate::spawn::ParticleField;

/// The three per-instance vertex buffers, uploaded once and never rewritten.
pub struct GeometryBuffers {
    /// `vec3<f32>` base position per particle.
    pub positions: wgpu::Buffer,
    /// `vec3<f32>` colour per particle.
    pub colors: wgpu::Buffer,
    /// `f32` base size per particle.
    pub sizes: wgpu::Buffer,
    /// Number of particles.
    pub count: u32,
}

impl GeometryBuffers {
    /// Upload a generated field.
    pub fn new(device: &wgpu::Device, field: &ParticleField) -> Self {
        // Zero-sized vertex buffers are invalid; an empty field still gets
        // one placeholder element and draws zero instances.
        let positions = create_attribute_buffer(device, "Star Positions", &field.positions, 3);
        let colors = create_attribute_buffer(device, "Star Colors", &field.colors, 3);
        let sizes = create_attribute_buffer(device, "Star Sizes", &field.sizes, 1);

        Self {
            positions,
            colors,
            sizes,
            count: field.len() as u32,
        }
    }

    /// Vertex buffer layouts matching `vs_main`'s inputs.
    pub fn layouts() -> [wgpu::VertexBufferLayout<'static>; 3] {
        const POSITION: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
        const COLOR: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x3];
        const SIZE: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![2 => Float32];

        [
            wgpu::VertexBufferLayout {
                array_stride: 12,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &POSITION,
            },
            wgpu::VertexBufferLayout {
                array_stride: 12,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &COLOR,
            },
            wgpu::VertexBufferLayout {
                array_stride: 4,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &SIZE,
            },
        ]
    }

    /// Free the GPU memory now rather than when the last reference drops.
    pub fn destroy(self) {
        self.positions.destroy();
        self.colors.destroy();
        self.sizes.destroy();
    }
}

fn create_attribute_buffer(device: &wgpu::Device, label: &str, data: &[f32], components: usize) -> wgpu::Buffer {
    let placeholder = vec![0.0f32; components];
    let contents: &[f32] = if data.is_empty() { &placeholder } else { data };
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(contents),
        usage: wgpu::BufferUsages::VERTEX,
    })
}

/// The instanced draw: six quad vertices per particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointMesh {
    pub vertices_per_instance: u32,
    pub instance_count: u32,
}
