use glam::Vec3;

use crate::core::state::{ATTRACTOR, ParticleArena};
use crate::error::DegenerateStateError;
use crate::laws::gravity::PointAttractor;

/// Outcome of one integration step.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StepReport {
    /// Particles whose state was touched.
    pub advanced: usize,
    /// Particles that received no acceleration this step.
    pub degenerate: Vec<DegenerateStateError>,
}

pub trait Integrator {
    /// Advances every particle except the attractor by one step scaled by `speed`.
    ///
    /// `speed` is the signed playback multiplier: zero leaves the arena untouched,
    /// negative values run time backwards.
    fn step(&mut self, arena: &mut ParticleArena, law: &PointAttractor, speed: f32) -> StepReport;
}

/// First-order update with one unit of velocity per step.
///
/// Forward steps kick then drift (`v += s·a(x)`, `x += s·v`). Reverse steps apply
/// the adjoint, drift then kick, so a step of `s` followed by a step of `-s`
/// lands back where it started.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExplicitEuler;

impl Integrator for ExplicitEuler {
    fn step(&mut self, arena: &mut ParticleArena, law: &PointAttractor, speed: f32) -> StepReport {
        let mut report = StepReport::default();
        if speed == 0.0 {
            return report;
        }

        let (attractor, orbiters) = arena.split_attractor_mut();
        let center = attractor.position;

        for (offset, particle) in orbiters.iter_mut().enumerate() {
            let index = ATTRACTOR + 1 + offset;
            if speed > 0.0 {
                let acceleration = pull(law, center, particle.position, index, &mut report);
                particle.velocity += acceleration * speed;
                particle.position += particle.velocity * speed;
            } else {
                particle.position += particle.velocity * speed;
                let acceleration = pull(law, center, particle.position, index, &mut report);
                particle.velocity += acceleration * speed;
            }
            report.advanced += 1;
        }

        report
    }
}

fn pull(
    law: &PointAttractor,
    center: Vec3,
    position: Vec3,
    index: usize,
    report: &mut StepReport,
) -> Vec3 {
    match law.acceleration(position - center) {
        Some(acceleration) => acceleration,
        None => {
            report
                .degenerate
                .push(DegenerateStateError::CoincidentWithAttractor { index });
            Vec3::ZERO
        }
    }
}
