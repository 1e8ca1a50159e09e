//! Time facilities for the frame loop.
//!
//! A [`Time`] starts at mount and is advanced once per produced frame. The
//! shader never sees wall-clock seconds directly: it receives
//! [`Time::scaled`], the elapsed time multiplied by the configured speed.
//!
//! # Example
//!
//! ```ignore
//! use starfield::time::Time;
//!
//! let mut time = Time::new(4.0);
//!
//! // In the frame callback:
//! time.update();
//!
//! log::trace!("scaled: {:.2}, fps: {:.1}", time.scaled(), time.fps());
//! ```

use std::time::{Duration, Instant};

/// Time tracking for the render clock.
#[derive(Debug, Clone)]
pub struct Time {
    /// When the timer was created.
    start: Instant,
    /// When the last frame occurred.
    last_frame: Instant,
    /// Wall-clock seconds since start (cached for fast access).
    elapsed_secs: f32,
    /// Wall-clock seconds since the last frame.
    delta_secs: f32,
    /// Total frames since start.
    frame_count: u64,
    /// Calculated FPS (updated periodically).
    fps: f32,
    /// Frame count at last FPS update.
    fps_frame_count: u64,
    /// Time of last FPS calculation.
    fps_update_time: Instant,
    /// How often to update FPS calculation.
    fps_update_interval: Duration,
    /// Multiplier applied to elapsed time before it reaches the shader.
    time_scale: f32,
}

impl Time {
    /// Create a new time tracker starting from now.
    pub fn new(time_scale: f32) -> Self {
        Self::starting_at(Instant::now(), time_scale)
    }

    /// Create a time tracker with an explicit start instant.
    pub fn starting_at(start: Instant, time_scale: f32) -> Self {
        Self {
            start,
            last_frame: start,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: start,
            fps_update_interval: Duration::from_millis(500),
            time_scale: time_scale.max(0.0),
        }
    }

    /// Update timing values. Call once per frame.
    ///
    /// Returns `(scaled_time, delta_time)` for convenience.
    pub fn update(&mut self) -> (f32, f32) {
        self.update_at(Instant::now())
    }

    /// Update timing values as of `now`.
    ///
    /// Instants earlier than the previous frame are treated as no time passing,
    /// so elapsed time never decreases.
    pub fn update_at(&mut self, now: Instant) -> (f32, f32) {
        self.delta_secs = now.saturating_duration_since(self.last_frame).as_secs_f32();
        self.last_frame = self.last_frame.max(now);

        self.elapsed_secs = self
            .last_frame
            .saturating_duration_since(self.start)
            .as_secs_f32();

        self.frame_count += 1;

        let fps_elapsed = self.last_frame.saturating_duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = self.last_frame;
            log::trace!("starfield fps: {:.1}", self.fps);
        }

        (self.scaled(), self.delta_secs)
    }

    /// Wall-clock seconds since start.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Elapsed time multiplied by the speed factor; the shader's `time`.
    #[inline]
    pub fn scaled(&self) -> f32 {
        self.elapsed_secs * self.time_scale
    }

    /// Time since last frame in seconds (delta time).
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Total frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Calculated frames per second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Current time scale multiplier.
    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Get the raw start instant.
    #[inline]
    pub fn start_instant(&self) -> Instant {
        self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_new() {
        let time = Time::new(4.0);
        assert_eq!(time.frame(), 0);
        assert_eq!(time.elapsed(), 0.0);
        assert_eq!(time.time_scale(), 4.0);
    }

    #[test]
    fn test_scaled_time_is_speed_times_elapsed() {
        let start = Instant::now();
        let mut time = Time::starting_at(start, 4.0);
        let (scaled, _) = time.update_at(start + Duration::from_millis(1500));

        assert!((time.elapsed() - 1.5).abs() < 1e-5);
        assert!((scaled - 6.0).abs() < 1e-5);
        assert_eq!(time.frame(), 1);
    }

    #[test]
    fn test_delta_between_frames() {
        let start = Instant::now();
        let mut time = Time::starting_at(start, 1.0);
        time.update_at(start + Duration::from_millis(100));
        let (_, delta) = time.update_at(start + Duration::from_millis(116));
        assert!((delta - 0.016).abs() < 1e-5);
    }

    #[test]
    fn test_time_never_runs_backwards() {
        let start = Instant::now();
        let mut time = Time::starting_at(start, 4.0);
        time.update_at(start + Duration::from_secs(2));
        let before = time.scaled();
        time.update_at(start + Duration::from_secs(1));
        assert_eq!(time.scaled(), before);
        assert_eq!(time.delta(), 0.0);
    }

    #[test]
    fn test_fps_sampled() {
        let start = Instant::now();
        let mut time = Time::starting_at(start, 1.0);
        for i in 1..=30 {
            time.update_at(start + Duration::from_millis(i * 20));
        }
        // 25 frames in the first 500 ms window.
        assert!((time.fps() - 50.0).abs() < 1.0);
    }

    #[test]
    fn test_negative_scale_clamps() {
        let time = Time::new(-1.0);
        assert_eq!(time.time_scale(), 0.0);
    }
}
