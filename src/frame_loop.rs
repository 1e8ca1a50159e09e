//! The render clock.
//!
//! A single cooperative loop: the host calls [`FrameLoop::advance`] when the
//! display refreshes, the loop produces at most one frame and asks the
//! scheduler for the next refresh. Nothing blocks; between frames control is
//! back with the host's event loop.
//!
//! ```ignore
//! let mut frames = FrameLoop::start(&mut host, 4.0);
//!
//! // On every display refresh:
//! frames.advance(Instant::now(), &mut host, |ft| draw(ft.scaled));
//!
//! // On unmount (any number of times):
//! frames.stop(&mut host);
//! ```

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use crate::host::FrameScheduler;
use crate::time::Time;

/// Timing snapshot handed to the frame callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Wall-clock seconds since the loop started.
    pub elapsed: f32,
    /// Wall-clock seconds since the previous frame.
    pub delta: f32,
    /// `elapsed` multiplied by the speed factor.
    pub scaled: f32,
    /// Index of this frame, starting at 1.
    pub frame: u64,
}

/// Cancels a running [`FrameLoop`].
///
/// Cloneable and idempotent: stopping twice, or before the first frame, is
/// harmless.
#[derive(Debug, Clone)]
pub struct StopHandle(Rc<Cell<bool>>);

impl StopHandle {
    /// Guarantee no further frames are produced.
    pub fn stop(&self) {
        self.0.set(true);
    }

    /// Whether the loop has been stopped.
    pub fn is_stopped(&self) -> bool {
        self.0.get()
    }
}

/// Self-rescheduling frame loop.
#[derive(Debug)]
pub struct FrameLoop {
    time: Time,
    stopped: Rc<Cell<bool>>,
}

impl FrameLoop {
    /// Start the loop and request its first frame.
    pub fn start<S: FrameScheduler + ?Sized>(scheduler: &mut S, time_scale: f32) -> Self {
        Self::start_at(scheduler, Instant::now(), time_scale)
    }

    /// Start the loop with an explicit start instant.
    pub fn start_at<S: FrameScheduler + ?Sized>(scheduler: &mut S, start: Instant, time_scale: f32) -> Self {
        scheduler.request_frame();
        Self {
            time: Time::starting_at(start, time_scale),
            stopped: Rc::new(Cell::new(false)),
        }
    }

    /// A handle that can stop this loop.
    pub fn handle(&self) -> StopHandle {
        StopHandle(Rc::clone(&self.stopped))
    }

    /// Whether the loop will still produce frames.
    pub fn is_running(&self) -> bool {
        !self.stopped.get()
    }

    /// Produce one frame, if still running, and schedule the next.
    ///
    /// Returns whether `on_frame` was called.
    pub fn advance<S, F>(&mut self, now: Instant, scheduler: &mut S, on_frame: F) -> bool
    where
        S: FrameScheduler + ?Sized,
        F: FnOnce(&FrameTime),
    {
        if self.stopped.get() {
            return false;
        }

        let (scaled, delta) = self.time.update_at(now);
        let frame_time = FrameTime {
            elapsed: self.time.elapsed(),
            delta,
            scaled,
            frame: self.time.frame(),
        };
        on_frame(&frame_time);

        // The callback may have stopped us through a handle.
        if !self.stopped.get() {
            scheduler.request_frame();
        }
        true
    }

    /// Stop the loop and withdraw any pending frame request.
    pub fn stop<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if !self.stopped.replace(true) {
            log::debug!("frame loop stopped after {} frames", self.time.frame());
        }
        scheduler.cancel_frame();
    }

    /// Timing state of the loop.
    pub fn time(&self) -> &Time {
        &self.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[derive(Default)]
    struct CountingScheduler {
        requested: u32,
        cancelled: u32,
    }

    impl FrameScheduler for CountingScheduler {
        fn request_frame(&mut self) {
            self.requested += 1;
        }

        fn cancel_frame(&mut self) {
            self.cancelled += 1;
        }
    }

    #[test]
    fn test_start_requests_first_frame() {
        let mut sched = CountingScheduler::default();
        let frames = FrameLoop::start(&mut sched, 4.0);
        assert!(frames.is_running());
        assert_eq!(sched.requested, 1);
    }

    #[test]
    fn test_advance_reschedules_once_per_frame() {
        let mut sched = CountingScheduler::default();
        let start = Instant::now();
        let mut frames = FrameLoop::start_at(&mut sched, start, 4.0);

        let mut calls = 0;
        for i in 1..=3 {
            assert!(frames.advance(start + Duration::from_millis(16 * i), &mut sched, |_| calls += 1));
        }
        assert_eq!(calls, 3);
        assert_eq!(sched.requested, 4);
    }

    #[test]
    fn test_frame_time_is_scaled() {
        let mut sched = CountingScheduler::default();
        let start = Instant::now();
        let mut frames = FrameLoop::start_at(&mut sched, start, 4.0);

        let mut seen = None;
        frames.advance(start + Duration::from_millis(2500), &mut sched, |ft| seen = Some(*ft));
        let ft = seen.unwrap_or_else(|| panic!("no frame produced"));
        assert!((ft.elapsed - 2.5).abs() < 1e-5);
        assert!((ft.scaled - 10.0).abs() < 1e-4);
        assert_eq!(ft.frame, 1);
    }

    #[test]
    fn test_stop_before_first_frame() {
        let mut sched = CountingScheduler::default();
        let mut frames = FrameLoop::start(&mut sched, 4.0);
        frames.stop(&mut sched);

        let produced = frames.advance(Instant::now(), &mut sched, |_| panic!("frame after stop"));
        assert!(!produced);
        assert!(!frames.is_running());
        assert_eq!(sched.requested, 1);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut sched = CountingScheduler::default();
        let mut frames = FrameLoop::start(&mut sched, 4.0);
        frames.stop(&mut sched);
        frames.stop(&mut sched);
        frames.handle().stop();
        assert!(!frames.is_running());
        assert_eq!(sched.requested, 1);
    }

    #[test]
    fn test_handle_stop_from_inside_callback() {
        let mut sched = CountingScheduler::default();
        let mut frames = FrameLoop::start(&mut sched, 4.0);
        let handle = frames.handle();

        assert!(frames.advance(Instant::now(), &mut sched, |_| handle.stop()));
        // No reschedule after the callback stopped the loop.
        assert_eq!(sched.requested, 1);
        assert!(handle.is_stopped());
        assert!(!frames.advance(Instant::now(), &mut sched, |_| panic!("frame after stop")));
    }
}
