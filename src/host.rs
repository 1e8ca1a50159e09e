//! The environment the starfield is mounted into.
//!
//! A host owns the visible container, delivers resize notifications and
//! schedules display refreshes. The native implementation is
//! [`WinitHost`](crate::window::WinitHost); tests supply their own.

/// Identifier of a registered resize listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Schedules the next display refresh.
///
/// The frame loop asks for exactly one refresh after each produced frame.
pub trait FrameScheduler {
    /// Request one more frame callback.
    fn request_frame(&mut self);

    /// Withdraw a pending request. Harmless if none is pending.
    fn cancel_frame(&mut self);
}

/// The container a starfield renders into.
pub trait Host: FrameScheduler {
    /// Current container size in logical pixels.
    fn container_size(&self) -> (u32, u32);

    /// Physical pixels per logical pixel.
    fn device_pixel_ratio(&self) -> f64;

    /// Make the rendering surface part of the container.
    ///
    /// Returns `false` if the container no longer exists.
    fn attach_surface(&mut self) -> bool;

    /// Remove the rendering surface from the container.
    fn detach_surface(&mut self);

    /// Whether the rendering surface is currently attached.
    fn is_surface_attached(&self) -> bool;

    /// Start delivering resize notifications.
    fn add_resize_listener(&mut self) -> ListenerId;

    /// Stop delivering resize notifications for `id`.
    fn remove_resize_listener(&mut self, id: ListenerId);
}
