//! Headless core of the orrery: a sun, thousands of particles falling around it,
//! a free-fly camera and the per-frame driver that ties them to a renderer.

pub mod core {
    pub mod geometry;
    pub mod solve;
    pub mod state;
}

pub mod laws {
    pub mod gravity;
}

pub mod config;
pub mod control;
pub mod error;
pub mod simulation;
pub mod timing;
pub mod viz;

pub use config::OrreryConfig;
pub use error::{DegenerateStateError, OrreryError};
pub use simulation::{FramePhase, FrameStats, Simulation};
