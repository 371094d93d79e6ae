use orrery::timing::FrameClock;
use std::time::Instant;

/// Wall clock that hands out a [`FrameClock`] per rendered frame.
pub struct FrameTimer {
    start: Instant,
    last: Instant,
}

impl FrameTimer {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
        }
    }

    /// Starts counting from now, so setup time never shows up as a frame delta.
    pub fn restart(&mut self) {
        *self = Self::new();
    }

    pub fn tick(&mut self) -> FrameClock {
        let now = Instant::now();
        let delta = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        FrameClock::new(now.duration_since(self.start).as_secs_f32(), delta)
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}
