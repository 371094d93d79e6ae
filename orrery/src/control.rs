use std::sync::mpsc::{Receiver, Sender, channel};

use crate::config::PlaybackConfig;

/// Discrete requests coming from the platform layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimCommand {
    TogglePause,
    Reverse,
    Faster,
    Slower,
    /// Signed speed: the sign picks the direction.
    SetSpeed(f32),
    Reset,
}

pub struct CommandQueue {
    receiver: Receiver<SimCommand>,
}

#[derive(Clone)]
pub struct CommandSender {
    sender: Sender<SimCommand>,
}

impl CommandQueue {
    pub fn new() -> (Self, CommandSender) {
        let (sender, receiver) = channel();
        (Self { receiver }, CommandSender { sender })
    }

    pub fn try_recv(&self) -> Option<SimCommand> {
        self.receiver.try_recv().ok()
    }

    pub fn drain(&self) -> impl Iterator<Item = SimCommand> + '_ {
        self.receiver.try_iter()
    }
}

impl CommandSender {
    pub fn send(&self, cmd: SimCommand) {
        if self.sender.send(cmd).is_err() {
            tracing::warn!(?cmd, "simulation is gone, dropping command");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

impl Direction {
    pub fn sign(self) -> f32 {
        match self {
            Direction::Forward => 1.0,
            Direction::Reverse => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }
}

/// Playback rate as a magnitude, a direction and a pause flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playback {
    speed: f32,
    direction: Direction,
    paused: bool,
    speed_step: f32,
    max_speed: f32,
}

impl Playback {
    pub fn new(config: &PlaybackConfig) -> Self {
        let max_speed = config.max_speed.abs();
        Self {
            speed: config.initial_speed.abs().min(max_speed),
            direction: if config.initial_speed < 0.0 {
                Direction::Reverse
            } else {
                Direction::Forward
            },
            paused: config.start_paused,
            speed_step: config.speed_step.abs(),
            max_speed,
        }
    }

    /// Signed multiplier fed to the integrator: 0 when paused.
    pub fn multiplier(&self) -> f32 {
        if self.paused {
            0.0
        } else {
            self.speed * self.direction.sign()
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn reverse(&mut self) {
        self.direction = self.direction.flipped();
    }

    pub fn faster(&mut self) {
        self.speed = (self.speed + self.speed_step).min(self.max_speed);
    }

    pub fn slower(&mut self) {
        self.speed = (self.speed - self.speed_step).max(0.0);
    }

    pub fn set_speed(&mut self, signed: f32) {
        self.direction = if signed < 0.0 {
            Direction::Reverse
        } else {
            Direction::Forward
        };
        self.speed = signed.abs().min(self.max_speed);
    }

    /// Applies a playback command. Returns `false` for commands that are not about playback.
    pub fn apply(&mut self, cmd: SimCommand) -> bool {
        match cmd {
            SimCommand::TogglePause => self.toggle_pause(),
            SimCommand::Reverse => self.reverse(),
            SimCommand::Faster => self.faster(),
            SimCommand::Slower => self.slower(),
            SimCommand::SetSpeed(speed) => self.set_speed(speed),
            SimCommand::Reset => return false,
        }
        true
    }
}
