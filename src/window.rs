//! Native host: a winit window and the application handler that drives it.

use std::sync::Arc;
use std::time::Instant;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

use crate::config::StarfieldConfig;
use crate::error::StarfieldError;
use crate::gpu::WgpuBackend;
use crate::host::{FrameScheduler, Host, ListenerId};
use crate::starfield::{MountState, Starfield};

/// [`Host`] over a winit window.
///
/// Frames are requested with `Window::request_redraw`. winit cannot withdraw
/// a redraw request, so cancelling clears a pending flag and the stray
/// `RedrawRequested` is dropped by [`WinitHost::take_frame_request`].
pub struct WinitHost {
    window: Arc<Window>,
    attached: bool,
    closing: bool,
    frame_pending: bool,
    listeners: Vec<ListenerId>,
    next_listener: u64,
}

impl WinitHost {
    pub fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            attached: false,
            closing: false,
            frame_pending: false,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Consume the pending frame request, if any.
    pub fn take_frame_request(&mut self) -> bool {
        std::mem::take(&mut self.frame_pending)
    }

    /// Whether anyone is listening for resizes.
    pub fn is_listening(&self) -> bool {
        !self.listeners.is_empty()
    }

    /// Mark the window as going away. Later attach attempts fail.
    pub fn mark_closing(&mut self) {
        self.closing = true;
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }
}

impl FrameScheduler for WinitHost {
    fn request_frame(&mut self) {
        self.frame_pending = true;
        self.window.request_redraw();
    }

    fn cancel_frame(&mut self) {
        self.frame_pending = false;
    }
}

impl Host for WinitHost {
    fn container_size(&self) -> (u32, u32) {
        let logical = self
            .window
            .inner_size()
            .to_logical::<u32>(self.window.scale_factor());
        (logical.width, logical.height)
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.window.scale_factor()
    }

    fn attach_surface(&mut self) -> bool {
        if self.closing {
            return false;
        }
        self.attached = true;
        true
    }

    fn detach_surface(&mut self) {
        self.attached = false;
    }

    fn is_surface_attached(&self) -> bool {
        self.attached
    }

    fn add_resize_listener(&mut self) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push(id);
        id
    }

    fn remove_resize_listener(&mut self, id: ListenerId) {
        self.listeners.retain(|l| *l != id);
    }
}

/// The standalone viewer.
pub struct App {
    config: StarfieldConfig,
    window: Option<Arc<Window>>,
    starfield: Option<Starfield<WgpuBackend, WinitHost>>,
    error: Option<StarfieldError>,
}

impl App {
    pub fn new(config: StarfieldConfig) -> Self {
        Self {
            config,
            window: None,
            starfield: None,
            error: None,
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        if event.state != ElementState::Pressed || event.repeat {
            return;
        }
        match &event.logical_key {
            Key::Named(NamedKey::Escape) => event_loop.exit(),
            Key::Named(NamedKey::Space) => self.toggle_playful_mode(),
            Key::Character(c) if c.eq_ignore_ascii_case("p") => self.toggle_playful_mode(),
            _ => {}
        }
    }

    fn toggle_playful_mode(&mut self) {
        if let Some(starfield) = &mut self.starfield {
            let visible = starfield.toggle();
            log::info!("playful mode {}", if visible { "on" } else { "off" });
            if starfield.state() == MountState::Degraded {
                log::warn!("graphics unavailable, nothing to show");
            }
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title("Starfield")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.error = Some(e.into());
                event_loop.exit();
                return;
            }
        };
        self.window = Some(Arc::clone(&window));

        let backend = WgpuBackend::new(Arc::clone(&window));
        let host = WinitHost::new(window);
        self.starfield = Some(Starfield::new(self.config.clone(), backend, host));
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                if let Some(starfield) = &mut self.starfield {
                    starfield.host_mut().mark_closing();
                }
                // Release GPU resources while the window still exists.
                self.starfield = None;
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(starfield) = &mut self.starfield {
                    if !starfield.host().is_listening() {
                        return;
                    }
                    let scale = starfield.host().device_pixel_ratio();
                    let logical = physical_size.to_logical::<u32>(scale);
                    starfield.on_resize(logical.width, logical.height);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_key(event_loop, &event);
            }
            WindowEvent::RedrawRequested => {
                if let Some(starfield) = &mut self.starfield {
                    if starfield.host_mut().take_frame_request() {
                        starfield.on_frame(Instant::now());
                    }
                }
            }
            _ => {}
        }
    }
}

/// Open a window and run the starfield until it is closed.
pub fn run(config: StarfieldConfig) -> Result<(), StarfieldError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
