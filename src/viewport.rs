//! Keeps the output surface and camera in step with the container size.

use crate::gpu::camera::Camera;

/// Surface size in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicalSize {
    pub width: u32,
    pub height: u32,
}

impl PhysicalSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Resize handler state.
#[derive(Debug, Clone)]
pub struct Viewport {
    max_pixel_ratio: f64,
    logical: Option<(u32, u32)>,
    physical: Option<PhysicalSize>,
}

impl Viewport {
    /// Create a viewport that never renders above `max_pixel_ratio`.
    pub fn new(max_pixel_ratio: f64) -> Self {
        Self {
            max_pixel_ratio: max_pixel_ratio.max(1.0),
            logical: None,
            physical: None,
        }
    }

    /// Apply a container size (logical pixels) at the given device pixel ratio.
    ///
    /// Updates the camera aspect and returns the new surface size. A zero
    /// dimension means the container is not laid out yet: nothing changes and
    /// `None` is returned.
    pub fn resize(
        &mut self,
        camera: &mut Camera,
        width: u32,
        height: u32,
        device_pixel_ratio: f64,
    ) -> Option<PhysicalSize> {
        if width == 0 || height == 0 {
            log::trace!("ignoring degenerate resize {}x{}", width, height);
            return None;
        }

        let ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio.min(self.max_pixel_ratio)
        } else {
            1.0
        };
        let physical = PhysicalSize::new(
            ((width as f64 * ratio).round() as u32).max(1),
            ((height as f64 * ratio).round() as u32).max(1),
        );

        camera.set_aspect(width as f32 / height as f32);
        self.logical = Some((width, height));
        self.physical = Some(physical);
        log::debug!("viewport {}x{} -> {}x{} px", width, height, physical.width, physical.height);
        Some(physical)
    }

    /// Last applied surface size, if any resize has succeeded.
    pub fn physical_size(&self) -> Option<PhysicalSize> {
        self.physical
    }

    /// Last applied container size in logical pixels.
    pub fn logical_size(&self) -> Option<(u32, u32)> {
        self.logical
    }
}
