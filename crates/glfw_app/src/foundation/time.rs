//! Time management utilities

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Monotonic millisecond time source for the frame loop
pub trait FrameClock {
    /// Milliseconds since some fixed point in the past
    fn elapsed_millis(&self) -> u64;
}

/// Wall clock backed by [`Instant`]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    /// Start a clock at zero now
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl FrameClock for SystemClock {
    fn elapsed_millis(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Clock that only moves when told to
///
/// Clones share the same time, so a test can keep one handle and give the
/// other to the application.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    /// Create a clock reading zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward
    pub fn advance(&self, millis: u64) {
        self.now.set(self.now.get().saturating_add(millis));
    }

    /// Jump to an absolute time
    pub fn set(&self, millis: u64) {
        self.now.set(millis);
    }
}

impl FrameClock for ManualClock {
    fn elapsed_millis(&self) -> u64 {
        self.now.get()
    }
}

/// Rolling frames-per-second sampler
///
/// Frames are counted until a full measurement window has elapsed; then the
/// rate over that window becomes the current sample and counting restarts.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    window_ms: u64,
    window_start: u64,
    frames: u32,
    fps: f32,
}

impl FpsCounter {
    /// Create a counter that samples every `window_ms` milliseconds, starting at `now_ms`
    pub fn new(window_ms: u64, now_ms: u64) -> Self {
        Self {
            window_ms: window_ms.max(1),
            window_start: now_ms,
            frames: 0,
            fps: 0.0,
        }
    }

    /// Restart the current window at `now_ms` without touching the last sample
    pub fn restart(&mut self, now_ms: u64) {
        self.window_start = now_ms;
        self.frames = 0;
    }

    /// Count one frame finished at `now_ms`
    ///
    /// Returns the new sample when this frame closes a measurement window.
    pub fn tick(&mut self, now_ms: u64) -> Option<f32> {
        self.frames += 1;
        let elapsed = now_ms.saturating_sub(self.window_start);
        if elapsed < self.window_ms {
            return None;
        }

        let seconds = elapsed as f32 / 1000.0;
        self.fps = self.frames as f32 / seconds;
        self.window_start = now_ms;
        self.frames = 0;
        Some(self.fps)
    }

    /// Last computed sample, zero until the first window closes
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Frames counted in the window that is still open
    pub fn pending_frames(&self) -> u32 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sixty_fps_over_two_seconds() {
        let mut counter = FpsCounter::new(2000, 0);
        for frame in 1..120 {
            assert_eq!(counter.tick(frame * 16), None);
        }
        let sample = counter.tick(2000).unwrap();

        assert_relative_eq!(sample, 60.0);
        assert_relative_eq!(counter.fps(), 60.0);
        assert_eq!(counter.pending_frames(), 0);
    }

    #[test]
    fn fps_is_zero_before_first_window_closes() {
        let mut counter = FpsCounter::new(2000, 0);
        counter.tick(500);
        counter.tick(1999);
        assert_relative_eq!(counter.fps(), 0.0);
        assert_eq!(counter.pending_frames(), 2);
    }

    #[test]
    fn window_restarts_from_the_closing_frame() {
        let mut counter = FpsCounter::new(1000, 0);
        counter.tick(1000);
        counter.tick(1500);

        // 2 frames over the 1250 ms since the last sample
        let sample = counter.tick(2250).unwrap();
        assert_relative_eq!(sample, 2.0 / 1.25);
    }

    #[test]
    fn manual_clock_is_shared_between_clones() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        handle.advance(250);
        handle.advance(250);
        assert_eq!(clock.elapsed_millis(), 500);
        clock.set(42);
        assert_eq!(handle.elapsed_millis(), 42);
    }
}
