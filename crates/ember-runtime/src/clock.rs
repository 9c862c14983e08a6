//! Frame clock

use ember_ecs::FrameTime;
use std::time::Instant;

/// Longest frame the clock will report, in seconds
const MAX_DELTA: f64 = 0.25;

/// Tracks elapsed time between frames
pub struct FrameClock {
    /// Total elapsed time in seconds
    pub total_time: f64,
    /// Time since last frame in seconds
    pub delta_time: f64,
    last_instant: Instant,
    first_tick: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            last_instant: Instant::now(),
            first_tick: true,
        }
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by the wall time since the last tick. Call once per frame.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();

        if self.first_tick {
            self.first_tick = false;
            self.last_instant = now;
            self.delta_time = 0.0;
            return self.frame_time();
        }

        let elapsed = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.advance(elapsed)
    }

    /// Advance the clock by a fixed amount of time
    pub fn advance(&mut self, seconds: f64) -> FrameTime {
        // Clamp so a stall does not turn into one huge step
        self.delta_time = seconds.clamp(0.0, MAX_DELTA);
        self.total_time += self.delta_time;
        self.frame_time()
    }

    pub fn frame_time(&self) -> FrameTime {
        FrameTime::new(self.delta_time as f32, self.total_time)
    }
}
