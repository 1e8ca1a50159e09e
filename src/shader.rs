//! The tunnel shader pair and its CPU reference math.
//!
//! The WGSL source lives in `shaders/starfield.wgsl`. The functions here
//! mirror the vertex-stage math exactly so the depth-wrap and size
//! attenuation invariants can be checked without a GPU.

/// Vertex + fragment source for the starfield.
pub const STARFIELD_SHADER: &str = include_str!("shaders/starfield.wgsl");

/// Vertex entry point in [`STARFIELD_SHADER`].
pub const VERTEX_ENTRY: &str = "vs_main";

/// Fragment entry point in [`STARFIELD_SHADER`].
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// Vertices per instanced point quad.
pub const QUAD_VERTICES: u32 = 6;

/// Wrap a base depth `z` at time `t` into `[-half_depth, half_depth)`.
///
/// `z' = -D + ((z + t) mod 2D)`, with a floored modulo so negative inputs
/// wrap the same way as positive ones. Time is folded into one period before
/// it meets `z`; otherwise a large `t` swallows `z` and every star collapses
/// onto the same depth. Non-finite time counts as zero.
#[inline]
pub fn wrap_depth(z: f32, t: f32, half_depth: f32) -> f32 {
    let span = 2.0 * half_depth;
    let t = if t.is_finite() { t.rem_euclid(span) } else { 0.0 };
    let mut r = (z + t).rem_euclid(span);
    // rem_euclid can round up to exactly `span`; NaN from a bad `z` lands here too.
    if !(r >= 0.0 && r < span) {
        r = 0.0;
    }
    -half_depth + r
}

/// On-screen point size in pixels: `base · k / -view_z`, capped at `max`.
///
/// Returns `None` when the point is at or behind the eye.
#[inline]
pub fn attenuated_size(base: f32, attenuation: f32, view_z: f32, max: f32) -> Option<f32> {
    let depth = -view_z;
    if depth <= 0.0 {
        return None;
    }
    Some((base * (attenuation / depth)).min(max))
}

#[cfg(test)]
mod tests {
    use super::*;

    const D: f32 = 150.0;

    #[test]
    fn test_wrap_depth_reference_value() {
        // -150 + ((100 + 300) mod 300) = -50
        assert!((wrap_depth(100.0, 300.0, D) - -50.0).abs() < 1e-4);
    }

    #[test]
    fn test_wrap_depth_at_zero_time_shifts_half_band() {
        // -D + (z mod 2D): the back half moves forward by D, the front half back by D.
        for (z, expected) in [(-150.0, 0.0), (-75.5, 74.5), (0.0, -150.0), (42.0, -108.0), (149.0, -1.0)] {
            assert!((wrap_depth(z, 0.0, D) - expected).abs() < 1e-4, "z={z}");
        }
    }

    #[test]
    fn test_wrap_depth_stays_in_band() {
        let depths = [-150.0, -149.999, -10.0, 0.0, 0.001, 99.9, 149.999, 150.0];
        let times = [
            -f32::MAX, -3.0e38, -1.0e6, -301.0, -0.5, 0.0, 1.0e-3, 0.5, 299.999, 300.0, 12_345.678,
            1.0e6, 3.4e7, 1.0e30, 1.0e37, 3.0e38, f32::MAX, f32::INFINITY, f32::NAN,
        ];
        for &z in &depths {
            for &t in &times {
                let w = wrap_depth(z, t, D);
                assert!((-D..D).contains(&w), "z={z} t={t} -> {w}");
            }
        }
    }

    #[test]
    fn test_wrap_depth_increases_until_wrap() {
        // z = -100 starts at 50 and reaches the near edge as z + t nears 0.
        let mut prev = wrap_depth(-100.0, 0.0, D);
        for step in 1..100 {
            let w = wrap_depth(-100.0, step as f32, D);
            assert!(w > prev, "t={step}");
            prev = w;
        }
        // z + t crosses a multiple of 2D and the star reappears at the far edge.
        assert!((wrap_depth(-100.0, 100.0, D) - -D).abs() < 1e-4);
        assert!(wrap_depth(-100.0, 101.0, D) < -140.0);
    }

    #[test]
    fn test_wrap_depth_keeps_phase_at_huge_time() {
        for t in [1.0e30, 1.0e37, 3.0e38, f32::MAX] {
            let a = wrap_depth(-100.0, t, D);
            let b = wrap_depth(0.0, t, D);
            let gap = (b - a).rem_euclid(2.0 * D);
            assert!((gap - 100.0).abs() < 1e-2, "t={t}: {a} vs {b}");
        }
    }

    #[test]
    fn test_wrap_depth_is_periodic() {
        let a = wrap_depth(12.0, 40.0, D);
        let b = wrap_depth(12.0, 40.0 + 2.0 * D, D);
        assert!((a - b).abs() < 1e-3);
    }

    #[test]
    fn test_attenuated_size() {
        // 10 * 70 / 35 = 20
        assert_eq!(attenuated_size(10.0, 70.0, -35.0, 256.0), Some(20.0));
        // closer means bigger
        let near = attenuated_size(10.0, 70.0, -5.0, 256.0).unwrap_or(0.0);
        let far = attenuated_size(10.0, 70.0, -50.0, 256.0).unwrap_or(0.0);
        assert!(near > far);
    }

    #[test]
    fn test_attenuated_size_capped_and_culled() {
        assert_eq!(attenuated_size(26.0, 70.0, -0.01, 256.0), Some(256.0));
        assert_eq!(attenuated_size(26.0, 70.0, 0.0, 256.0), None);
        assert_eq!(attenuated_size(26.0, 70.0, 3.0, 256.0), None);
    }

    #[test]
    fn test_shader_declares_entry_points() {
        assert!(STARFIELD_SHADER.contains(&format!("fn {VERTEX_ENTRY}(")));
        assert!(STARFIELD_SHADER.contains(&format!("fn {FRAGMENT_ENTRY}(")));
    }
}
