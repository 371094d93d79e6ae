use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::CameraConfig;
use crate::error::DegenerateStateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

impl MoveDirection {
    pub const ALL: [MoveDirection; 6] = [
        MoveDirection::Forward,
        MoveDirection::Backward,
        MoveDirection::Left,
        MoveDirection::Right,
        MoveDirection::Up,
        MoveDirection::Down,
    ];
}

/// How far the camera may look up or down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PitchPolicy {
    Clamp { limit_degrees: f32 },
    /// No limit. Crossing ±90° flips the image.
    Unconstrained,
}

impl Default for PitchPolicy {
    fn default() -> Self {
        PitchPolicy::Clamp {
            limit_degrees: 89.0,
        }
    }
}

/// Free-fly camera driven by yaw/pitch (degrees) and directional movement.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    pub fov_degrees: f32,
    pub pitch_policy: PitchPolicy,
    front: Vec3,
    right: Vec3,
    up: Vec3,
    world_up: Vec3,
}

impl Camera {
    pub fn new(config: &CameraConfig) -> Self {
        let mut camera = Self {
            position: config.position,
            yaw: config.yaw,
            pitch: config.pitch,
            movement_speed: config.movement_speed,
            mouse_sensitivity: config.mouse_sensitivity,
            fov_degrees: config.fov_degrees,
            pitch_policy: config.pitch_policy,
            front: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
            world_up: Vec3::Y,
        };
        camera.pitch = camera.constrained_pitch(camera.pitch).0;
        camera.update_vectors();
        camera
    }

    /// Camera with default tuning placed at `position`.
    pub fn at(position: Vec3, yaw: f32, pitch: f32) -> Self {
        Self::new(&CameraConfig {
            position,
            yaw,
            pitch,
            ..CameraConfig::default()
        })
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Applies a cursor offset. Positive `dy` looks up.
    ///
    /// When the pitch policy had to clamp, the clamp is returned for logging.
    pub fn process_mouse_movement(&mut self, dx: f32, dy: f32) -> Option<DegenerateStateError> {
        self.yaw += dx * self.mouse_sensitivity;
        let (pitch, clamped) = self.constrained_pitch(self.pitch + dy * self.mouse_sensitivity);
        self.pitch = pitch;
        self.update_vectors();
        clamped
    }

    pub fn process_keyboard(&mut self, direction: MoveDirection, delta_seconds: f32) {
        let velocity = self.movement_speed * delta_seconds;
        match direction {
            MoveDirection::Forward => self.position += self.front * velocity,
            MoveDirection::Backward => self.position -= self.front * velocity,
            MoveDirection::Left => self.position -= self.right * velocity,
            MoveDirection::Right => self.position += self.right * velocity,
            MoveDirection::Up => self.position += self.world_up * velocity,
            MoveDirection::Down => self.position -= self.world_up * velocity,
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    pub fn projection_matrix(&self, aspect: f32, near: f32, far: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), aspect.max(f32::EPSILON), near, far)
    }

    fn constrained_pitch(&self, pitch: f32) -> (f32, Option<DegenerateStateError>) {
        match self.pitch_policy {
            PitchPolicy::Clamp { limit_degrees } => {
                let limit = limit_degrees.abs().min(89.9);
                if pitch.abs() > limit {
                    (
                        pitch.clamp(-limit, limit),
                        Some(DegenerateStateError::PitchOutOfRange { pitch }),
                    )
                } else {
                    (pitch, None)
                }
            }
            PitchPolicy::Unconstrained => (pitch, None),
        }
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos())
            .normalize();
        // Looking straight up or down leaves `right` undefined; keep the last one.
        self.right = self
            .front
            .cross(self.world_up)
            .try_normalize()
            .unwrap_or(self.right);
        self.up = self.right.cross(self.front).normalize();
    }
}
