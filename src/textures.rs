//! Procedural sprite textures.
//!
//! Every star samples the same small raster: a white disc whose alpha falls
//! off radially, so points read as soft glowing dots instead of hard squares.
//!
//! # Quick Start
//!
//! ```ignore
//! let sprite = TextureConfig::radial_sprite(64);
//! assert_eq!(sprite.width, 64);
//! ```
//!
//! In the tunnel shader the sprite is bound as `sprite_tex` / `sprite_sampler`.

/// Filter mode for texture sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Smooth linear filtering (default). Good for gradients.
    #[default]
    Linear,
    /// Sharp nearest-neighbor filtering.
    Nearest,
}

impl FilterMode {
    pub(crate) fn to_wgpu(self) -> wgpu::FilterMode {
        match self {
            FilterMode::Linear => wgpu::FilterMode::Linear,
            FilterMode::Nearest => wgpu::FilterMode::Nearest,
        }
    }
}

/// Address mode for texture wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressMode {
    /// Clamp to edge color (default). Coordinates outside 0-1 use edge pixels.
    #[default]
    ClampToEdge,
    /// Repeat/tile the texture. Coordinates wrap around.
    Repeat,
}

impl AddressMode {
    pub(crate) fn to_wgpu(self) -> wgpu::AddressMode {
        match self {
            AddressMode::ClampToEdge => wgpu::AddressMode::ClampToEdge,
            AddressMode::Repeat => wgpu::AddressMode::Repeat,
        }
    }
}

/// One stop of a radial alpha gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Normalized distance from the centre (0.0 = centre, 1.0 = edge).
    pub offset: f32,
    /// Opacity at this distance.
    pub alpha: f32,
}

/// Default falloff: opaque core, bright halo, transparent rim.
pub const SPRITE_STOPS: [GradientStop; 4] = [
    GradientStop { offset: 0.0, alpha: 1.0 },
    GradientStop { offset: 0.2, alpha: 0.8 },
    GradientStop { offset: 0.45, alpha: 0.25 },
    GradientStop { offset: 1.0, alpha: 0.0 },
];

/// Largest sprite edge, in pixels. Larger requests are clamped.
pub const MAX_SPRITE_SIZE: u32 = 1024;

/// Configuration for a single texture.
#[derive(Debug, Clone)]
pub struct TextureConfig {
    /// Raw RGBA pixel data (width * height * 4 bytes).
    pub data: Vec<u8>,
    /// Texture width in pixels.
    pub width: u32,
    /// Texture height in pixels.
    pub height: u32,
    /// Filter mode for magnification/minification.
    pub filter: FilterMode,
    /// Address mode for UV coordinates outside 0-1.
    pub address_mode: AddressMode,
}

impl TextureConfig {
    /// Create a texture configuration from raw RGBA data.
    ///
    /// # Panics
    ///
    /// Panics if `data` is not exactly `width * height * 4` bytes.
    pub fn from_rgba(data: Vec<u8>, width: u32, height: u32) -> Self {
        assert_eq!(
            data.len(),
            width as usize * height as usize * 4,
            "RGBA data size mismatch"
        );
        Self {
            data,
            width,
            height,
            filter: FilterMode::Linear,
            address_mode: AddressMode::ClampToEdge,
        }
    }

    /// Rasterize the shared star sprite with [`SPRITE_STOPS`].
    pub fn radial_sprite(size: u32) -> Self {
        Self::radial_gradient(size, &SPRITE_STOPS)
    }

    /// Rasterize a white square texture whose alpha follows `stops` from the
    /// centre outwards. Pixels beyond the inscribed circle are transparent.
    ///
    /// `stops` must be sorted by offset. `size` is clamped to
    /// `1..=MAX_SPRITE_SIZE`.
    pub fn radial_gradient(size: u32, stops: &[GradientStop]) -> Self {
        let size = size.clamp(1, MAX_SPRITE_SIZE);
        let mut data = Vec::with_capacity(size as usize * size as usize * 4);
        let radius = size as f32 * 0.5;

        for y in 0..size {
            for x in 0..size {
                let dx = x as f32 + 0.5 - radius;
                let dy = y as f32 + 0.5 - radius;
                let dist = (dx * dx + dy * dy).sqrt() / radius;
                let alpha = gradient_alpha(stops, dist);
                data.extend_from_slice(&[255, 255, 255, (alpha * 255.0).round() as u8]);
            }
        }

        Self::from_rgba(data, size, size)
    }

    /// Alpha byte of the pixel at `(x, y)`.
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        self.data[(y as usize * self.width as usize + x as usize) * 4 + 3]
    }
}

/// Piecewise-linear alpha for a normalized distance.
fn gradient_alpha(stops: &[GradientStop], dist: f32) -> f32 {
    let (first, last) = match (stops.first(), stops.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return 0.0,
    };
    if dist > 1.0 {
        return 0.0;
    }
    if dist <= first.offset {
        return first.alpha;
    }
    if dist >= last.offset {
        return last.alpha;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if dist <= b.offset {
            let span = (b.offset - a.offset).max(f32::EPSILON);
            let t = (dist - a.offset) / span;
            return a.alpha + (b.alpha - a.alpha) * t;
        }
    }
    last.alpha
}
