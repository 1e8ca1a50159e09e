//! Error types for the starfield renderer.
//!
//! Graphics failures are never fatal to the host: the component catches
//! [`GpuError`] at mount time and degrades to rendering nothing. Only the
//! standalone binary surfaces [`StarfieldError`] to the user.

use std::fmt;

/// Errors that can occur while acquiring or driving the GPU.
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
    /// The surface refused to hand out a frame.
    Surface(wgpu::SurfaceError),
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter => write!(f, "No compatible GPU adapter found"),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
            GpuError::Surface(e) => write!(f, "Failed to acquire surface frame: {}", e),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            GpuError::Surface(e) => Some(e),
            GpuError::NoAdapter => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

impl From<wgpu::SurfaceError> for GpuError {
    fn from(e: wgpu::SurfaceError) -> Self {
        GpuError::Surface(e)
    }
}

/// Errors that can occur when running the standalone viewer.
#[derive(Debug)]
pub enum StarfieldError {
    /// Failed to create event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create window.
    Window(winit::error::OsError),
    /// GPU initialization failed.
    Gpu(GpuError),
}

impl fmt::Display for StarfieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StarfieldError::EventLoop(e) => write!(f, "Failed to create event loop: {}", e),
            StarfieldError::Window(e) => write!(f, "Failed to create window: {}", e),
            StarfieldError::Gpu(e) => write!(f, "GPU error: {}", e),
        }
    }
}

impl std::error::Error for StarfieldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StarfieldError::EventLoop(e) => Some(e),
            StarfieldError::Window(e) => Some(e),
            StarfieldError::Gpu(e) => Some(e),
        }
    }
}

impl From<winit::error::EventLoopError> for StarfieldError {
    fn from(e: winit::error::EventLoopError) -> Self {
        StarfieldError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for StarfieldError {
    fn from(e: winit::error::OsError) -> Self {
        StarfieldError::Window(e)
    }
}

impl From<GpuError> for StarfieldError {
    fn from(e: GpuError) -> Self {
        StarfieldError::Gpu(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_no_adapter_has_no_source() {
        let err = GpuError::NoAdapter;
        assert!(err.source().is_none());
        assert!(err.to_string().contains("adapter"));
    }

    #[test]
    fn test_gpu_error_wraps_into_starfield_error() {
        let err: StarfieldError = GpuError::NoAdapter.into();
        assert!(matches!(err, StarfieldError::Gpu(GpuError::NoAdapter)));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_surface_error_converts() {
        let err: GpuError = wgpu::SurfaceError::Timeout.into();
        assert!(matches!(err, GpuError::Surface(wgpu::SurfaceError::Timeout)));
    }
}
