//! Frame timing utilities
//!
//! The frame clock is an external collaborator, so the timer here is fed
//! with the timestamps the clock reports rather than sampling wall time
//! itself.

use std::time::Duration;

/// Frame timer driven by clock timestamps
///
/// Tracks the interval between consecutive frame boundaries and the total
/// number of frames observed.
#[derive(Debug, Default)]
pub struct FrameTimer {
    last_frame: Option<Duration>,
    frame_interval: Duration,
    frame_count: u64,
}

impl FrameTimer {
    /// Create a new timer with no frames observed yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the timer with the timestamp of the frame that just started
    ///
    /// Returns the interval since the previous frame. The first frame has
    /// no predecessor and reports a zero interval.
    pub fn advance(&mut self, now: Duration) -> Duration {
        self.frame_interval = match self.last_frame {
            Some(prev) => now.saturating_sub(prev),
            None => Duration::ZERO,
        };
        self.last_frame = Some(now);
        self.frame_count += 1;
        self.frame_interval
    }

    /// Get the interval between the two most recent frames
    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// Get the number of frames observed so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the FPS implied by the most recent frame interval
    pub fn current_fps(&self) -> Option<f32> {
        let secs = self.frame_interval.as_secs_f32();
        (secs > 0.0).then(|| 1.0 / secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_first_frame_has_zero_interval() {
        let mut timer = FrameTimer::new();
        assert_eq!(timer.advance(Duration::from_millis(100)), Duration::ZERO);
        assert_eq!(timer.frame_count(), 1);
        assert_eq!(timer.current_fps(), None);
    }

    #[test]
    fn test_interval_between_frames() {
        let mut timer = FrameTimer::new();
        timer.advance(Duration::from_millis(100));
        let interval = timer.advance(Duration::from_millis(116));
        assert_eq!(interval, Duration::from_millis(16));
        assert_eq!(timer.frame_count(), 2);
        assert_relative_eq!(timer.current_fps().unwrap(), 62.5, epsilon = 1e-3);
    }

    #[test]
    fn test_non_monotonic_timestamp_saturates() {
        let mut timer = FrameTimer::new();
        timer.advance(Duration::from_millis(100));
        assert_eq!(timer.advance(Duration::from_millis(90)), Duration::ZERO);
    }
}
