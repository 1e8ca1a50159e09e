//! Particle field generation.
//!
//! The field is generated exactly once per mounted instance and uploaded to
//! the GPU as three flat attribute arrays. Nothing on the CPU touches it again:
//! the per-frame depth is derived in the vertex stage.

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;

/// Parameters that shape a generated field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldParams {
    /// Number of particles.
    pub count: u32,
    /// Half-width `W` of the square the x/y coordinates are drawn from.
    pub half_width: f32,
    /// Half-depth `D` of the band base depths are drawn from.
    pub half_depth: f32,
    /// Range of base point sizes, in pixels before attenuation.
    pub size_range: Range<f32>,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            count: 20_000,
            half_width: 200.0,
            half_depth: 150.0,
            size_range: 8.0..26.0,
        }
    }
}

/// Immutable per-particle base data, laid out as flat GPU attribute arrays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleField {
    /// `x, y, z` per particle; `z` is the base depth.
    pub positions: Vec<f32>,
    /// `r, g, b` per particle.
    pub colors: Vec<f32>,
    /// Base point size per particle.
    pub sizes: Vec<f32>,
}

impl ParticleField {
    /// Number of particles in the field.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Whether the field holds no particles.
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Base position of particle `index`.
    pub fn position(&self, index: usize) -> Vec3 {
        Vec3::from_slice(&self.positions[index * 3..index * 3 + 3])
    }

    /// Colour of particle `index`.
    pub fn color(&self, index: usize) -> Vec3 {
        Vec3::from_slice(&self.colors[index * 3..index * 3 + 3])
    }
}

/// Build the RNG for a field: reproducible when seeded, entropy otherwise.
pub fn field_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    }
}

/// Generate a particle field.
///
/// Output lengths are always `3 * count`, `3 * count` and `count`. A zero
/// count yields empty arrays. An empty palette falls back to white.
pub fn generate<R: Rng + ?Sized>(params: &FieldParams, palette: &[Vec3], rng: &mut R) -> ParticleField {
    let n = params.count as usize;
    let mut positions = Vec::with_capacity(n * 3);
    let mut colors = Vec::with_capacity(n * 3);
    let mut sizes = Vec::with_capacity(n);

    let w = params.half_width;
    let d = params.half_depth;

    for _ in 0..n {
        positions.push(uniform(rng, -w, w));
        positions.push(uniform(rng, -w, w));
        positions.push(uniform(rng, -d, d));

        let color = if palette.is_empty() {
            Vec3::ONE
        } else {
            palette[rng.gen_range(0..palette.len())]
        };
        colors.extend_from_slice(&color.to_array());

        sizes.push(uniform(rng, params.size_range.start, params.size_range.end));
    }

    ParticleField {
        positions,
        colors,
        sizes,
    }
}

// gen_range panics on empty ranges; degenerate bounds collapse to `lo` instead.
fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    lo + rng.gen::<f32>() * (hi - lo)
}
