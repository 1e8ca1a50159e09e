//! Visual configuration for the starfield.
//!
//! Controls how particles look (palette, blending) separately from how they
//! move, which is fixed by the tunnel shader.
//!
//! # Usage
//!
//! ```ignore
//! StarfieldConfig::new()
//!     .with_palette(Palette::Ember)
//!     .with_blend_mode(BlendMode::Alpha);
//! ```

use glam::Vec3;

/// Star colour palettes.
///
/// Each particle picks one entry uniformly at random; colours are never
/// interpolated between entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Palette {
    /// Warm and near-white stellar tones (default).
    #[default]
    Starlight,

    /// Amber, orange and pale gold.
    Ember,

    /// Cold blue-whites.
    Ice,
}

const STARLIGHT: [Vec3; 6] = [
    Vec3::new(1.0, 1.0, 1.0),    // White
    Vec3::new(1.0, 0.96, 0.88),  // Warm white
    Vec3::new(1.0, 0.89, 0.71),  // Pale gold
    Vec3::new(1.0, 0.82, 0.60),  // Soft amber
    Vec3::new(0.98, 0.92, 0.84), // Linen
    Vec3::new(1.0, 0.78, 0.55),  // Peach
];

const EMBER: [Vec3; 5] = [
    Vec3::new(1.0, 0.85, 0.55), // Pale gold
    Vec3::new(1.0, 0.70, 0.35), // Amber
    Vec3::new(1.0, 0.55, 0.25), // Orange
    Vec3::new(0.95, 0.45, 0.20), // Deep orange
    Vec3::new(1.0, 0.95, 0.85), // Hot white
];

const ICE: [Vec3; 5] = [
    Vec3::new(1.0, 1.0, 1.0),   // White
    Vec3::new(0.85, 0.92, 1.0), // Frost
    Vec3::new(0.70, 0.82, 1.0), // Light blue
    Vec3::new(0.60, 0.75, 1.0), // Blue
    Vec3::new(0.90, 0.95, 1.0), // Blue-white
];

impl Palette {
    /// The discrete colour entries of this palette.
    pub fn colors(&self) -> &'static [Vec3] {
        match self {
            Palette::Starlight => &STARLIGHT,
            Palette::Ember => &EMBER,
            Palette::Ice => &ICE,
        }
    }
}

/// Blend mode for particle rendering.
///
/// Controls how overlapping particles combine with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Additive blending (default).
    ///
    /// Overlapping particles sum their colour, so dense regions brighten
    /// into a glowing light field.
    #[default]
    Additive,

    /// Standard alpha blending.
    ///
    /// The sprite alpha acts as plain opacity and nearer particles occlude
    /// farther ones.
    Alpha,
}

impl BlendMode {
    /// The wgpu blend state for this mode.
    pub fn to_blend_state(self) -> wgpu::BlendState {
        match self {
            BlendMode::Additive => wgpu::BlendState {
                color: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::SrcAlpha,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                },
                alpha: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::One,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                },
            },
            BlendMode::Alpha => wgpu::BlendState::ALPHA_BLENDING,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palettes_have_at_least_five_entries() {
        for palette in [Palette::Starlight, Palette::Ember, Palette::Ice] {
            assert!(palette.colors().len() >= 5, "{palette:?} too small");
        }
    }

    #[test]
    fn test_palette_colors_in_unit_range() {
        for palette in [Palette::Starlight, Palette::Ember, Palette::Ice] {
            for c in palette.colors() {
                assert!(c.min_element() >= 0.0 && c.max_element() <= 1.0);
            }
        }
    }

    #[test]
    fn test_starlight_is_warm() {
        // Red never falls below blue in a warm palette.
        for c in Palette::Starlight.colors() {
            assert!(c.x >= c.z);
        }
    }

    #[test]
    fn test_additive_blend_adds_destination() {
        let state = BlendMode::Additive.to_blend_state();
        assert_eq!(state.color.dst_factor, wgpu::BlendFactor::One);
        assert_eq!(state.color.operation, wgpu::BlendOperation::Add);
        assert_eq!(BlendMode::default(), BlendMode::Additive);
    }
}
