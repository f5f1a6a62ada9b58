//! Frame timing for animators.
//!
//! Animations advance one step per frame rather than by wall-clock delta,
//! so all this tracks is the frame count, total elapsed time, and a
//! periodically refreshed FPS estimate for logging.

use std::time::{Duration, Instant};

/// Frame counting and FPS estimation.
#[derive(Debug)]
pub struct Time {
    /// When the timer was created.
    start: Instant,
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
}

impl Time {
    /// Create a new time tracker starting from now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_secs(1),
        }
    }

    /// Count a frame. Call once per frame.
    ///
    /// Returns `true` when the FPS estimate was just refreshed, so callers
    /// can log it at the refresh cadence.
    pub fn update(&mut self) -> bool {
        self.frame_count += 1;

        let now = Instant::now();
        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
            return true;
        }
        false
    }

    /// Total elapsed time in seconds since start.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
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
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_time_new() {
        let time = Time::new();
        assert_eq!(time.frame(), 0);
        assert_eq!(time.fps(), 0.0);
    }

    #[test]
    fn test_update_counts_frames() {
        let mut time = Time::new();
        time.update();
        time.update();
        assert_eq!(time.frame(), 2);

        thread::sleep(Duration::from_millis(5));
        assert!(time.elapsed() > 0.0);
    }

    #[test]
    fn test_fps_refresh_cadence() {
        let mut time = Time::new();
        time.fps_update_interval = Duration::ZERO;

        // With a zero interval every update refreshes the estimate.
        assert!(time.update());
        assert!(time.fps() > 0.0);

        time.fps_update_interval = Duration::from_secs(3600);
        assert!(!time.update());
    }
}
