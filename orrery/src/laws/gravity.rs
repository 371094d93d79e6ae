use glam::Vec3;
use serde::{Deserialize, Serialize};

/// What to do when a particle gets arbitrarily close to the attractor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SingularityPolicy {
    /// Treat distances below `min_distance` as `min_distance` when computing the
    /// magnitude. A particle sitting exactly on the attractor still gets nothing.
    Soften { min_distance: f32 },
    /// Plain inverse-square; only an exact (sub-epsilon) overlap is skipped.
    Skip,
}

impl Default for SingularityPolicy {
    fn default() -> Self {
        SingularityPolicy::Soften { min_distance: 0.05 }
    }
}

/// Single-point inverse-square field: `a = strength / r²` along the unit offset.
///
/// A negative strength pulls particles toward the attractor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointAttractor {
    pub strength: f32,
    pub singularity: SingularityPolicy,
}

impl PointAttractor {
    pub fn new(strength: f32, singularity: SingularityPolicy) -> Self {
        Self {
            strength,
            singularity,
        }
    }

    /// Acceleration felt at `offset` from the attractor (particle minus attractor).
    ///
    /// Returns `None` when the offset is too small to define a direction.
    pub fn acceleration(&self, offset: Vec3) -> Option<Vec3> {
        let distance = offset.length();
        let effective = match self.singularity {
            SingularityPolicy::Soften { min_distance } => {
                if distance <= 0.0 {
                    return None;
                }
                distance.max(min_distance)
            }
            SingularityPolicy::Skip => {
                if distance < f32::EPSILON {
                    return None;
                }
                distance
            }
        };

        let direction = offset / distance;
        Some(direction * (self.strength / (effective * effective)))
    }
}
