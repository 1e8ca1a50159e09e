//! Fixed-eye perspective camera for the flythrough.

use glam::{Mat4, Vec3};

/// Perspective camera looking down -Z from a fixed eye.
///
/// Only the aspect ratio changes after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Near clip distance.
    pub near: f32,
    /// Far clip distance.
    pub far: f32,
    /// Eye position.
    pub eye: Vec3,
    aspect: f32,
    projection: Mat4,
}

impl Camera {
    /// Create a camera with a square aspect ratio.
    pub fn new(fov_y_degrees: f32, near: f32, far: f32, eye: Vec3) -> Self {
        let mut camera = Self {
            fov_y_degrees,
            near,
            far,
            eye,
            aspect: 1.0,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection();
        camera
    }

    /// Current aspect ratio (width / height).
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Set the aspect ratio and recompute the projection.
    ///
    /// Non-finite or non-positive ratios are ignored.
    pub fn set_aspect(&mut self, aspect: f32) {
        if !aspect.is_finite() || aspect <= 0.0 {
            return;
        }
        self.aspect = aspect;
        self.update_projection();
    }

    /// The cached projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// The view matrix for rendering.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.eye, Vec3::NEG_Z, Vec3::Y)
    }

    fn update_projection(&mut self) {
        self.projection =
            Mat4::perspective_rh(self.fov_y_degrees.to_radians(), self.aspect, self.near, self.far);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(50.0, 0.1, 1000.0, Vec3::new(0.0, 0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_aspect_updates_projection() {
        let mut camera = Camera::default();
        let before = camera.projection_matrix();
        camera.set_aspect(800.0 / 600.0);
        assert!((camera.aspect() - 1.3333).abs() < 1e-3);
        assert_ne!(camera.projection_matrix(), before);
        assert!(camera.projection_matrix().is_finite());
    }

    #[test]
    fn test_degenerate_aspect_ignored() {
        let mut camera = Camera::default();
        camera.set_aspect(2.0);
        let before = camera.projection_matrix();
        camera.set_aspect(0.0);
        camera.set_aspect(f32::NAN);
        camera.set_aspect(f32::INFINITY);
        assert_eq!(camera.aspect(), 2.0);
        assert_eq!(camera.projection_matrix(), before);
    }

    #[test]
    fn test_view_looks_down_negative_z() {
        let camera = Camera::default();
        let p = camera.view_matrix().transform_point3(Vec3::new(0.0, 0.0, -49.0));
        // 50 units in front of an eye at z = 1
        assert!((p.z - -50.0).abs() < 1e-4);
    }
}
