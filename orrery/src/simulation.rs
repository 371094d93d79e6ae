use glam::{Mat4, Vec2, Vec3};

use crate::config::OrreryConfig;
use crate::control::{CommandQueue, CommandSender, Playback, SimCommand};
use crate::core::geometry::SphereMesh;
use crate::core::solve::{ExplicitEuler, Integrator, StepReport};
use crate::core::state::{ATTRACTOR, ParticleArena};
use crate::error::Result;
use crate::laws::gravity::PointAttractor;
use crate::timing::{FpsCounter, FrameClock, StepScheduler};
use crate::viz::{Camera, CameraMatrices, InputState, InstanceData, MeshKind, RenderSink};

/// Axis every body spins around; normalized before use.
pub const SPIN_AXIS: Vec3 = Vec3::new(2.0, 0.3, 0.5);
/// Spin rate of particle `i` is `i * SPIN_DEGREES_PER_INDEX` degrees per second.
pub const SPIN_DEGREES_PER_INDEX: f32 = 20.0;

/// Where the frame driver is within a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramePhase {
    PollInput,
    Integrate,
    Clear,
    DrawAttractor,
    DrawParticles,
    /// Everything is submitted; the caller presents.
    Present,
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FrameStats {
    pub steps: u32,
    pub degenerate: usize,
    pub instances: usize,
    pub multiplier: f32,
}

/// Everything one running visualization owns: particles, camera, playback and
/// the shared sphere geometry.
pub struct Simulation {
    pub arena: ParticleArena,
    pub camera: Camera,
    pub playback: Playback,
    law: PointAttractor,
    integrator: Box<dyn Integrator>,
    scheduler: StepScheduler,
    commands: CommandQueue,
    sun_mesh: SphereMesh,
    particle_mesh: SphereMesh,
    near: f32,
    far: f32,
    phase: FramePhase,
    fps: FpsCounter,
    frames: u64,
}

impl Simulation {
    pub fn new(config: &OrreryConfig) -> Result<(Self, CommandSender)> {
        let sim = &config.simulation;
        let arena = ParticleArena::seeded(sim.particle_count, sim.initial_velocity, sim.seed);
        Self::with_arena(config, arena)
    }

    /// Builds a simulation around an explicit particle layout.
    pub fn with_arena(
        config: &OrreryConfig,
        arena: ParticleArena,
    ) -> Result<(Self, CommandSender)> {
        config.validate()?;

        let mesh = &config.mesh;
        let sun_mesh = SphereMesh::uv(mesh.sun_radius, mesh.stacks, mesh.sectors)?;
        let particle_mesh = SphereMesh::uv(mesh.particle_radius, mesh.stacks, mesh.sectors)?;
        let (commands, sender) = CommandQueue::new();

        tracing::info!(
            particles = arena.len(),
            strength = config.simulation.strength,
            step = ?config.simulation.step,
            seed = ?config.simulation.seed,
            "simulation initialized"
        );

        let simulation = Self {
            arena,
            camera: Camera::new(&config.camera),
            playback: Playback::new(&config.playback),
            law: PointAttractor::new(config.simulation.strength, config.simulation.singularity),
            integrator: Box::new(ExplicitEuler),
            scheduler: StepScheduler::new(config.simulation.step),
            commands,
            sun_mesh,
            particle_mesh,
            near: config.camera.near,
            far: config.camera.far,
            phase: FramePhase::Present,
            fps: FpsCounter::new(0.0),
            frames: 0,
        };
        Ok((simulation, sender))
    }

    pub fn with_integrator(mut self, integrator: impl Integrator + 'static) -> Self {
        self.integrator = Box::new(integrator);
        self
    }

    pub fn law(&self) -> &PointAttractor {
        &self.law
    }

    pub fn mesh(&self, kind: MeshKind) -> &SphereMesh {
        match kind {
            MeshKind::Sun => &self.sun_mesh,
            MeshKind::Particle => &self.particle_mesh,
        }
    }

    pub fn phase(&self) -> FramePhase {
        self.phase
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn reset(&mut self) {
        self.arena.reset();
        self.scheduler.hold();
        tracing::info!(particles = self.arena.len(), "simulation reset");
    }

    pub fn apply_command(&mut self, cmd: SimCommand) {
        if !self.playback.apply(cmd) {
            match cmd {
                SimCommand::Reset => self.reset(),
                other => tracing::warn!(?other, "unhandled command"),
            }
        }
        tracing::debug!(
            ?cmd,
            speed = self.playback.speed(),
            direction = ?self.playback.direction(),
            paused = self.playback.is_paused(),
            "playback updated"
        );
    }

    /// One integration step at an explicit signed speed, bypassing playback and scheduling.
    pub fn step(&mut self, speed: f32) -> StepReport {
        self.integrator.step(&mut self.arena, &self.law, speed)
    }

    /// Runs one frame: input, integration, then draw submission into `sink`.
    pub fn frame(
        &mut self,
        clock: FrameClock,
        input: &mut InputState,
        sink: &mut impl RenderSink,
    ) -> FrameStats {
        let mut stats = FrameStats::default();

        self.phase = FramePhase::PollInput;
        self.poll_input(clock, input);

        self.phase = FramePhase::Integrate;
        self.integrate(clock, &mut stats);

        self.phase = FramePhase::Clear;
        let camera = CameraMatrices {
            view: self.camera.view_matrix(),
            projection: self
                .camera
                .projection_matrix(sink.aspect_ratio(), self.near, self.far),
        };
        sink.begin_frame(&camera);

        self.phase = FramePhase::DrawAttractor;
        let elapsed = clock.elapsed_seconds;
        let sun = self.arena.attractor();
        sink.draw_mesh(
            MeshKind::Sun,
            InstanceData::new(body_model(sun.position, ATTRACTOR, elapsed), attractor_tint(elapsed)),
        );
        stats.instances += 1;

        self.phase = FramePhase::DrawParticles;
        for (index, particle) in self.arena.iter().enumerate().skip(ATTRACTOR + 1) {
            sink.draw_mesh(
                MeshKind::Particle,
                InstanceData::new(
                    body_model(particle.position, index, elapsed),
                    particle_tint(index, elapsed),
                ),
            );
            stats.instances += 1;
        }

        self.phase = FramePhase::Present;
        self.frames += 1;
        if let Some(fps) = self.fps.record(elapsed) {
            tracing::debug!(
                fps,
                multiplier = stats.multiplier,
                particles = self.arena.len(),
                "frame rate"
            );
        }
        tracing::trace!(frame = self.frames, ?stats, "frame submitted");
        stats
    }

    fn poll_input(&mut self, clock: FrameClock, input: &mut InputState) {
        let pending: Vec<SimCommand> = self.commands.drain().collect();
        for cmd in pending {
            self.apply_command(cmd);
        }

        for direction in input.held() {
            self.camera.process_keyboard(direction, clock.delta_seconds);
        }

        let look = input.take_look_delta();
        if look != Vec2::ZERO {
            if let Some(clamped) = self.camera.process_mouse_movement(look.x, look.y) {
                tracing::trace!(%clamped, "camera pitch clamped");
            }
        }
    }

    fn integrate(&mut self, clock: FrameClock, stats: &mut FrameStats) {
        let multiplier = self.playback.multiplier();
        stats.multiplier = multiplier;
        if multiplier == 0.0 {
            self.scheduler.hold();
            return;
        }

        let steps = self.scheduler.steps_for(clock.delta_seconds);
        for _ in 0..steps {
            let report = self.step(multiplier);
            if let Some(first) = report.degenerate.first() {
                tracing::warn!(
                    count = report.degenerate.len(),
                    %first,
                    "particles skipped at the attractor"
                );
            }
            stats.degenerate += report.degenerate.len();
        }
        stats.steps = steps;
    }
}

/// Translation to `position` followed by a spin that grows with time and index.
pub fn body_model(position: Vec3, index: usize, elapsed_seconds: f32) -> Mat4 {
    let angle = elapsed_seconds * (SPIN_DEGREES_PER_INDEX * index as f32).to_radians();
    Mat4::from_translation(position) * Mat4::from_axis_angle(SPIN_AXIS.normalize(), angle)
}

pub fn attractor_tint(elapsed_seconds: f32) -> [f32; 3] {
    [elapsed_seconds, elapsed_seconds, 0.0]
}

pub fn particle_tint(index: usize, elapsed_seconds: f32) -> [f32; 3] {
    let phase = elapsed_seconds * index as f32;
    [phase.sin(), phase.cos(), phase.atan()]
}
