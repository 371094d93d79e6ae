use serde::{Deserialize, Serialize};

/// Time as seen by one frame: seconds since start plus the gap to the previous frame.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FrameClock {
    pub elapsed_seconds: f32,
    pub delta_seconds: f32,
}

impl FrameClock {
    pub fn new(elapsed_seconds: f32, delta_seconds: f32) -> Self {
        Self {
            elapsed_seconds,
            delta_seconds,
        }
    }

    /// Advances the clock by `delta` seconds.
    pub fn tick(self, delta: f32) -> Self {
        Self {
            elapsed_seconds: self.elapsed_seconds + delta,
            delta_seconds: delta,
        }
    }
}

/// How many integration steps a frame gets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StepPolicy {
    /// One step per rendered frame. Simulation speed follows the frame rate.
    PerFrame,
    /// A fixed number of steps per second of wall time, independent of frame rate.
    Fixed { rate_hz: u32, max_steps_per_frame: u32 },
}

impl Default for StepPolicy {
    fn default() -> Self {
        StepPolicy::Fixed {
            rate_hz: 60,
            max_steps_per_frame: 5,
        }
    }
}

pub struct FixedTimestep {
    frame_duration: f32,
    accumulator: f32,
    max_steps: u32,
}

impl FixedTimestep {
    pub fn from_rate(rate_hz: u32, max_steps: u32) -> Self {
        let frame_duration = 1.0 / rate_hz.max(1) as f32;
        Self {
            frame_duration,
            accumulator: 0.0,
            max_steps: max_steps.max(1),
        }
    }

    pub fn accumulate(&mut self, delta: f32) {
        self.accumulator += delta.max(0.0);
    }

    pub fn should_step(&mut self) -> bool {
        if self.accumulator >= self.frame_duration {
            self.accumulator -= self.frame_duration;
            true
        } else {
            false
        }
    }

    /// Drains as many whole steps as the accumulator holds, capped at `max_steps`.
    /// Time beyond the cap is dropped so a long stall cannot snowball.
    pub fn drain(&mut self) -> u32 {
        let mut steps = 0;
        while steps < self.max_steps && self.should_step() {
            steps += 1;
        }
        if steps == self.max_steps {
            self.accumulator = self.accumulator.min(self.frame_duration);
        }
        steps
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// Turns a [`StepPolicy`] into a per-frame step count.
pub struct StepScheduler {
    fixed: Option<FixedTimestep>,
}

impl StepScheduler {
    pub fn new(policy: StepPolicy) -> Self {
        let fixed = match policy {
            StepPolicy::PerFrame => None,
            StepPolicy::Fixed {
                rate_hz,
                max_steps_per_frame,
            } => Some(FixedTimestep::from_rate(rate_hz, max_steps_per_frame)),
        };
        Self { fixed }
    }

    pub fn steps_for(&mut self, delta_seconds: f32) -> u32 {
        match self.fixed.as_mut() {
            None => 1,
            Some(fixed) => {
                fixed.accumulate(delta_seconds);
                fixed.drain()
            }
        }
    }

    /// Forgets any banked time, used while paused.
    pub fn hold(&mut self) {
        if let Some(fixed) = self.fixed.as_mut() {
            fixed.reset();
        }
    }
}

/// Counts frames and reports a rate once per second.
#[derive(Debug, Default)]
pub struct FpsCounter {
    window_start: f32,
    frames: u32,
}

impl FpsCounter {
    pub fn new(start_seconds: f32) -> Self {
        Self {
            window_start: start_seconds,
            frames: 0,
        }
    }

    /// Returns the frame count of the window that just closed, if one did.
    pub fn record(&mut self, now_seconds: f32) -> Option<u32> {
        self.frames += 1;
        if now_seconds - self.window_start >= 1.0 {
            let fps = self.frames;
            self.frames = 0;
            self.window_start = now_seconds;
            Some(fps)
        } else {
            None
        }
    }
}
