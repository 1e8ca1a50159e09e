//! GPU copy of the shared star sprite.

use wgpu::util::DeviceExt;

use crate::textures::TextureConfig;

/// Uploaded sprite texture plus the sampler the fragment stage reads it with.
pub struct SpriteTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl SpriteTexture {
    /// Upload a sprite raster.
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, config: &TextureConfig) -> Self {
        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some("Star Sprite"),
                size: wgpu::Extent3d {
                    width: config.width,
                    height: config.height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                // Alpha is coverage, not colour: keep it linear.
                format: wgpu::TextureFormat::Rgba8Unorm,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            &config.data,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let address_mode = config.address_mode.to_wgpu();
        let filter = config.filter.to_wgpu();
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Star Sprite Sampler"),
            address_mode_u: address_mode,
            address_mode_v: address_mode,
            address_mode_w: address_mode,
            mag_filter: filter,
            min_filter: filter,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
        }
    }

    /// Free the texture memory now.
    pub fn destroy(self) {
        self.texture.destroy();
    }
}
