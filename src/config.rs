//! Starfield configuration builder.
//!
//! Every knob has a reference default, so `StarfieldConfig::new()` alone
//! produces the standard field.
//!
//! ```ignore
//! let config = StarfieldConfig::new()
//!     .with_particle_count(8_000)
//!     .with_palette(Palette::Ice)
//!     .with_seed(42)
//!     .with_visible(playful_mode);
//! ```

use std::ops::Range;

use glam::Vec3;

use crate::backend::MaterialDesc;
use crate::gpu::camera::Camera;
use crate::spawn::FieldParams;
use crate::textures::MAX_SPRITE_SIZE;
use crate::visuals::{BlendMode, Palette};

/// Configuration for one starfield instance.
#[derive(Debug, Clone, PartialEq)]
pub struct StarfieldConfig {
    /// Number of stars.
    pub particle_count: u32,
    /// Half-width `W` of the x/y spawn square.
    pub half_width: f32,
    /// Half-depth `D` of the wrap band.
    pub half_depth: f32,
    /// Base point size range.
    pub size_range: Range<f32>,
    /// Star colours.
    pub palette: Palette,
    /// Multiplier from wall-clock seconds to shader time.
    pub speed: f32,
    /// Size attenuation constant `k`.
    pub size_attenuation: f32,
    /// Largest on-screen point size in pixels.
    pub max_point_size: f32,
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Near clip distance.
    pub near: f32,
    /// Far clip distance.
    pub far: f32,
    /// Fixed eye position.
    pub eye: Vec3,
    /// Side length of the sprite raster.
    pub sprite_size: u32,
    /// Cap on device pixel ratio.
    pub max_pixel_ratio: f64,
    /// Compositing of overlapping stars.
    pub blend_mode: BlendMode,
    /// Clear colour behind the stars.
    pub background: Vec3,
    /// Seed for a reproducible field; `None` draws from entropy.
    pub seed: Option<u64>,
    /// Whether the renderer should exist at all (the playful-mode toggle).
    pub visible: bool,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 20_000,
            half_width: 200.0,
            half_depth: 150.0,
            size_range: 8.0..26.0,
            palette: Palette::Starlight,
            speed: 4.0,
            size_attenuation: 70.0,
            max_point_size: 256.0,
            fov_y_degrees: 50.0,
            near: 0.1,
            far: 1000.0,
            eye: Vec3::new(0.0, 0.0, 1.0),
            sprite_size: 64,
            max_pixel_ratio: 2.0,
            blend_mode: BlendMode::Additive,
            background: Vec3::new(0.0, 0.0, 0.02),
            seed: None,
            visible: true,
        }
    }
}

impl StarfieldConfig {
    /// Create a configuration with reference defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of stars.
    pub fn with_particle_count(mut self, count: u32) -> Self {
        self.particle_count = count;
        self
    }

    /// Set the spawn volume: x/y half-width and z half-depth.
    pub fn with_bounds(mut self, half_width: f32, half_depth: f32) -> Self {
        self.half_width = half_width;
        self.half_depth = half_depth;
        self
    }

    /// Set the base point size range.
    pub fn with_size_range(mut self, range: Range<f32>) -> Self {
        self.size_range = range;
        self
    }

    /// Set the colour palette.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Set the travel speed multiplier.
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Set the size attenuation constant.
    pub fn with_size_attenuation(mut self, k: f32) -> Self {
        self.size_attenuation = k;
        self
    }

    /// Set the blend mode.
    pub fn with_blend_mode(mut self, mode: BlendMode) -> Self {
        self.blend_mode = mode;
        self
    }

    /// Set the background colour.
    pub fn with_background(mut self, color: Vec3) -> Self {
        self.background = color;
        self
    }

    /// Set the device pixel ratio cap.
    pub fn with_max_pixel_ratio(mut self, ratio: f64) -> Self {
        self.max_pixel_ratio = ratio;
        self
    }

    /// Use a fixed RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set whether the renderer is mounted.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Replace nonsensical values with usable ones.
    pub fn validate(mut self) -> Self {
        let defaults = Self::default();

        if !(self.half_depth.is_finite() && self.half_depth > 0.0) {
            log::warn!("half_depth {} invalid, using {}", self.half_depth, defaults.half_depth);
            self.half_depth = defaults.half_depth;
        }
        if !(self.half_width.is_finite() && self.half_width >= 0.0) {
            log::warn!("half_width {} invalid, using {}", self.half_width, defaults.half_width);
            self.half_width = defaults.half_width;
        }
        let r = &self.size_range;
        if !(r.start.is_finite() && r.end.is_finite() && r.start >= 0.0 && r.start <= r.end) {
            log::warn!("size range {:?} invalid, using {:?}", self.size_range, defaults.size_range);
            self.size_range = defaults.size_range.clone();
        }
        if !(self.speed.is_finite() && self.speed >= 0.0) {
            log::warn!("speed {} invalid, using {}", self.speed, defaults.speed);
            self.speed = defaults.speed;
        }
        if !(self.near > 0.0 && self.far > self.near) {
            log::warn!("clip range {}..{} invalid, using defaults", self.near, self.far);
            self.near = defaults.near;
            self.far = defaults.far;
        }
        if !(self.fov_y_degrees > 0.0 && self.fov_y_degrees < 180.0) {
            log::warn!("fov {} invalid, using {}", self.fov_y_degrees, defaults.fov_y_degrees);
            self.fov_y_degrees = defaults.fov_y_degrees;
        }
        if !(self.size_attenuation.is_finite() && self.size_attenuation >= 0.0) {
            log::warn!("size_attenuation {} invalid, using {}", self.size_attenuation, defaults.size_attenuation);
            self.size_attenuation = defaults.size_attenuation;
        }
        if !(self.max_point_size.is_finite() && self.max_point_size > 0.0) {
            log::warn!("max_point_size {} invalid, using {}", self.max_point_size, defaults.max_point_size);
            self.max_point_size = defaults.max_point_size;
        }
        if !(self.max_pixel_ratio.is_finite() && self.max_pixel_ratio >= 1.0) {
            log::warn!("max_pixel_ratio {} invalid, using {}", self.max_pixel_ratio, defaults.max_pixel_ratio);
            self.max_pixel_ratio = defaults.max_pixel_ratio;
        }
        if !self.eye.is_finite() {
            log::warn!("eye {} invalid, using {}", self.eye, defaults.eye);
            self.eye = defaults.eye;
        }
        if !self.background.is_finite() {
            log::warn!("background {} invalid, using {}", self.background, defaults.background);
            self.background = defaults.background;
        }
        if self.sprite_size == 0 {
            self.sprite_size = defaults.sprite_size;
        } else if self.sprite_size > MAX_SPRITE_SIZE {
            log::warn!("sprite_size {} too large, clamping to {}", self.sprite_size, MAX_SPRITE_SIZE);
            self.sprite_size = MAX_SPRITE_SIZE;
        }
        self
    }

    pub(crate) fn field_params(&self) -> FieldParams {
        FieldParams {
            count: self.particle_count,
            half_width: self.half_width,
            half_depth: self.half_depth,
            size_range: self.size_range.clone(),
        }
    }

    pub(crate) fn camera(&self) -> Camera {
        Camera::new(self.fov_y_degrees, self.near, self.far, self.eye)
    }

    pub(crate) fn material_desc(&self) -> MaterialDesc {
        MaterialDesc {
            blend: self.blend_mode,
            clear_color: self.background,
        }
    }
}
