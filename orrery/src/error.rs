/// Numerical hazards intrinsic to a single frame.
///
/// These never abort the loop. The integrator and the camera guard against
/// them and hand the value back so the caller can decide how loudly to log.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum DegenerateStateError {
    #[error("particle {index} coincides with the attractor")]
    CoincidentWithAttractor { index: usize },
    #[error("camera pitch {pitch:.2}° left the allowed range and was clamped")]
    PitchOutOfRange { pitch: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MeshError {
    #[error("a UV-sphere needs at least 2 stacks, got {0}")]
    TooFewStacks(u32),
    #[error("a UV-sphere needs at least 3 sectors, got {0}")]
    TooFewSectors(u32),
    #[error("a {stacks}x{sectors} UV-sphere needs more vertices than u32 indices can address")]
    TooManyVertices { stacks: u32, sectors: u32 },
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, thiserror::Error)]
pub enum OrreryError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

pub type Result<T, E = OrreryError> = std::result::Result<T, E>;
