//! # Starfield
//!
//! A GPU starfield: thousands of soft, warm-tinted points streaming toward a
//! fixed camera, producing the feeling of endless travel through space.
//!
//! The field is generated once and never reallocated. Motion lives entirely
//! in the vertex shader: every star's depth is wrapped back into a fixed band
//! with a modulo, and its on-screen size grows as it approaches the eye.
//!
//! ## Quick Start
//!
//! ```ignore
//! use starfield::prelude::*;
//!
//! fn main() -> Result<(), StarfieldError> {
//!     init_logging(LoggingConfig::default());
//!     run(StarfieldConfig::new().with_palette(Palette::Starlight))
//! }
//! ```
//!
//! ## Embedding
//!
//! [`Starfield`] is generic over a [`RenderBackend`] and a [`Host`]. It
//! holds its GPU resources exactly while visible and releases all of them,
//! in reverse order, when hidden or dropped:
//!
//! ```ignore
//! let mut field = Starfield::new(config.with_visible(playful), backend, host);
//!
//! // host callbacks
//! field.on_resize(width, height);
//! field.on_frame(Instant::now());
//!
//! // mode toggle
//! field.set_visible(false);
//! ```
//!
//! If the GPU is unavailable the component logs a warning and renders
//! nothing ([`MountState::Degraded`]); it never takes the host down.
//!
//! ## Reference Parameters
//!
//! | Parameter | Default |
//! |-----------|---------|
//! | Stars | 20 000 |
//! | Spawn volume | x, y in [-200, 200], z in [-150, 150] |
//! | Point size | [8, 26) before attenuation |
//! | Attenuation `k` | 70 |
//! | Speed | 4 units of shader time per second |
//! | Camera | 50° fov, near 0.1, far 1000, eye (0, 0, 1) looking down -Z |
//! | Pixel ratio cap | 2 |

pub mod backend;
pub mod config;
pub mod error;
pub mod frame_loop;
pub mod gpu;
pub mod host;
pub mod lifecycle;
pub mod logging;
pub mod shader;
pub mod spawn;
pub mod starfield;
pub mod textures;
pub mod time;
pub mod uniforms;
pub mod viewport;
pub mod visuals;
pub mod window;

pub use bytemuck;
pub use glam::{Vec2, Vec3, Vec4};

pub use backend::{MaterialDesc, RenderBackend};
pub use config::StarfieldConfig;
pub use error::{GpuError, StarfieldError};
pub use frame_loop::{FrameLoop, FrameTime, StopHandle};
pub use gpu::camera::Camera;
pub use gpu::WgpuBackend;
pub use host::{FrameScheduler, Host, ListenerId};
pub use lifecycle::{AcquireError, ResourceSet};
pub use logging::{init_logging, LoggingConfig};
pub use spawn::{FieldParams, ParticleField};
pub use starfield::{MountState, Starfield};
pub use textures::{AddressMode, FilterMode, TextureConfig, MAX_SPRITE_SIZE};
pub use time::Time;
pub use uniforms::Uniforms;
pub use viewport::{PhysicalSize, Viewport};
pub use visuals::{BlendMode, Palette};
pub use window::{run, WinitHost};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use starfield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::StarfieldConfig;
    pub use crate::error::{GpuError, StarfieldError};
    pub use crate::logging::{init_logging, LoggingConfig};
    pub use crate::starfield::{MountState, Starfield};
    pub use crate::visuals::{BlendMode, Palette};
    pub use crate::window::run;
    pub use crate::{Vec2, Vec3, Vec4};
}
