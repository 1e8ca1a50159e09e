//! The mountable starfield component.
//!
//! `Starfield` owns a backend, a host and a configuration, and holds a
//! [`ResourceSet`] exactly while it is visible. Visibility comes in as a
//! plain flag; the component never looks anything up on its own.
//!
//! ```ignore
//! let mut field = Starfield::new(config, backend, host);
//! field.on_resize(800, 600);
//! field.on_frame(Instant::now());
//! field.set_visible(false); // everything released
//! ```

use std::time::Instant;

use crate::backend::RenderBackend;
use crate::config::StarfieldConfig;
use crate::host::Host;
use crate::lifecycle::{AcquireError, ResourceSet};

/// What the component currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountState {
    /// Not visible; nothing is held.
    Hidden,
    /// Mounted and drawing.
    Running,
    /// Visible, but graphics are unavailable. Renders nothing.
    Degraded,
}

/// A starfield bound to one backend and one host.
pub struct Starfield<B: RenderBackend, H: Host> {
    backend: B,
    host: H,
    config: StarfieldConfig,
    resources: Option<ResourceSet<B>>,
    state: MountState,
}

impl<B: RenderBackend, H: Host> Starfield<B, H> {
    /// Create the component, mounting immediately when `config.visible`.
    pub fn new(config: StarfieldConfig, backend: B, host: H) -> Self {
        let config = config.validate();
        let visible = config.visible;
        let mut field = Self {
            backend,
            host,
            config,
            resources: None,
            state: MountState::Hidden,
        };
        if visible {
            field.mount();
        }
        field
    }

    fn mount(&mut self) {
        match ResourceSet::acquire(&self.config, &mut self.backend, &mut self.host) {
            Ok(set) => {
                self.resources = Some(set);
                self.state = MountState::Running;
            }
            Err(AcquireError::Detached) => {
                log::warn!("starfield container gone, staying hidden");
                self.state = MountState::Hidden;
            }
            Err(AcquireError::Gpu(e)) => {
                log::warn!("graphics unavailable, starfield disabled: {}", e);
                self.state = MountState::Degraded;
            }
        }
    }

    fn unmount(&mut self) {
        if let Some(mut set) = self.resources.take() {
            set.release(&mut self.backend, &mut self.host);
            log::info!("starfield unmounted");
        }
        self.state = MountState::Hidden;
    }

    /// Mount or unmount. Repeating the current value does nothing.
    pub fn set_visible(&mut self, visible: bool) {
        self.config.visible = visible;
        match (visible, self.state) {
            (true, MountState::Hidden) => self.mount(),
            (false, MountState::Running | MountState::Degraded) => self.unmount(),
            _ => {}
        }
    }

    /// Toggle visibility and return the new value.
    pub fn toggle(&mut self) -> bool {
        let visible = !self.config.visible;
        self.set_visible(visible);
        visible
    }

    /// Forward a container resize (logical pixels).
    pub fn on_resize(&mut self, width: u32, height: u32) {
        let ratio = self.host.device_pixel_ratio();
        if let Some(set) = self.resources.as_mut() {
            set.resize(width, height, &mut self.backend, ratio);
        }
    }

    /// Produce the frame for a display refresh at `now`.
    ///
    /// A draw failure other than a recoverable surface loss releases
    /// everything and leaves the component degraded.
    pub fn on_frame(&mut self, now: Instant) -> bool {
        let Some(set) = self.resources.as_mut() else {
            return false;
        };
        match set.frame(now, &mut self.backend, &mut self.host) {
            Ok(produced) => produced,
            Err(e) => {
                log::error!("starfield draw failed: {}", e);
                set.release(&mut self.backend, &mut self.host);
                self.resources = None;
                self.state = MountState::Degraded;
                false
            }
        }
    }

    /// Current mount state.
    pub fn state(&self) -> MountState {
        self.state
    }

    /// Whether the component is meant to be shown.
    pub fn is_visible(&self) -> bool {
        self.config.visible
    }

    /// The active configuration.
    pub fn config(&self) -> &StarfieldConfig {
        &self.config
    }

    /// The mounted resources, if any.
    pub fn resources(&self) -> Option<&ResourceSet<B>> {
        self.resources.as_ref()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<B: RenderBackend, H: Host> Drop for Starfield<B, H> {
    fn drop(&mut self) {
        self.unmount();
    }
}
