use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::geometry::SphereMesh;
use crate::error::ConfigError;
use crate::laws::gravity::SingularityPolicy;
use crate::timing::StepPolicy;
use crate::viz::camera::PitchPolicy;

/// Looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "orrery.ron";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrreryConfig {
    pub window: WindowConfig,
    pub simulation: SimulationConfig,
    pub mesh: MeshConfig,
    pub camera: CameraConfig,
    pub playback: PlaybackConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub clear_color: [f32; 4],
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Orrery".to_string(),
            width: 1280,
            height: 720,
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Attractor included.
    pub particle_count: usize,
    /// Negative pulls toward the attractor.
    pub strength: f32,
    pub initial_velocity: Vec3,
    pub seed: Option<u64>,
    pub singularity: SingularityPolicy,
    pub step: StepPolicy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            particle_count: 10_000,
            strength: -25.0,
            initial_velocity: Vec3::X,
            seed: None,
            singularity: SingularityPolicy::default(),
            step: StepPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    pub stacks: u32,
    pub sectors: u32,
    pub sun_radius: f32,
    pub particle_radius: f32,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            stacks: 30,
            sectors: 30,
            sun_radius: 2.0,
            particle_radius: 0.25,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    /// Degrees; -90 looks down -z.
    pub yaw: f32,
    pub pitch: f32,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub pitch_policy: PitchPolicy,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 3.0),
            yaw: -90.0,
            pitch: 0.0,
            movement_speed: 2.5,
            mouse_sensitivity: 0.1,
            fov_degrees: 45.0,
            near: 0.1,
            far: 1000.0,
            pitch_policy: PitchPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Signed; a negative value starts in reverse.
    pub initial_speed: f32,
    pub speed_step: f32,
    pub max_speed: f32,
    pub start_paused: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            initial_speed: 1.0,
            speed_step: 0.25,
            max_speed: 8.0,
            start_paused: false,
        }
    }
}

impl OrreryConfig {
    pub fn from_ron_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading configuration");
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Loads `path` if given, else [`DEFAULT_CONFIG_FILE`] if it exists, else defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        let fallback = Path::new(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            return Self::load(fallback);
        }
        tracing::debug!("no configuration file, using defaults");
        Ok(Self::default())
    }

    pub fn to_ron_string(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.simulation.particle_count == 0 {
            return Err(ConfigError::Invalid(
                "simulation.particle_count must include the attractor (>= 1)".into(),
            ));
        }
        if !self.simulation.strength.is_finite() {
            return Err(ConfigError::Invalid("simulation.strength must be finite".into()));
        }
        if let SingularityPolicy::Soften { min_distance } = self.simulation.singularity {
            if !positive(min_distance) {
                return Err(ConfigError::Invalid(
                    "simulation.singularity min_distance must be positive".into(),
                ));
            }
        }
        if !positive(self.mesh.sun_radius) || !positive(self.mesh.particle_radius) {
            return Err(ConfigError::Invalid("mesh radii must be positive".into()));
        }
        SphereMesh::check_resolution(self.mesh.stacks, self.mesh.sectors)
            .map_err(|err| ConfigError::Invalid(format!("mesh: {err}")))?;
        if !positive(self.camera.near) || !positive(self.camera.far - self.camera.near) {
            return Err(ConfigError::Invalid(
                "camera clip planes must satisfy 0 < near < far".into(),
            ));
        }
        if !positive(self.playback.max_speed) {
            return Err(ConfigError::Invalid("playback.max_speed must be positive".into()));
        }
        Ok(())
    }
}

/// False for NaN as well as for zero and negatives.
fn positive(value: f32) -> bool {
    value > 0.0
}
