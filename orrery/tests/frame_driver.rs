use glam::{Mat4, Vec3};
use orrery::config::SimulationConfig;
use orrery::control::SimCommand;
use orrery::core::solve::{Integrator, StepReport};
use orrery::core::state::{Particle, ParticleArena};
use orrery::laws::gravity::PointAttractor;
use orrery::simulation::{SPIN_AXIS, body_model};
use orrery::timing::{FrameClock, StepPolicy};
use orrery::viz::{CameraMatrices, InputState, InstanceData, MeshKind, MoveDirection, RenderSink};
use orrery::{FramePhase, OrreryConfig, Simulation};

/// Collects what one frame submitted instead of drawing it.
#[derive(Default)]
struct RecordingSink {
    camera: Option<CameraMatrices>,
    draws: Vec<(MeshKind, InstanceData)>,
    frames: usize,
}

impl RenderSink for RecordingSink {
    fn aspect_ratio(&self) -> f32 {
        16.0 / 9.0
    }

    fn begin_frame(&mut self, camera: &CameraMatrices) {
        self.camera = Some(*camera);
        self.draws.clear();
        self.frames += 1;
    }

    fn draw_mesh(&mut self, mesh: MeshKind, instance: InstanceData) {
        self.draws.push((mesh, instance));
    }
}

fn per_frame_config(particle_count: usize) -> OrreryConfig {
    OrreryConfig {
        simulation: SimulationConfig {
            particle_count,
            seed: Some(11),
            step: StepPolicy::PerFrame,
            ..SimulationConfig::default()
        },
        ..OrreryConfig::default()
    }
}

fn orbiting_arena() -> ParticleArena {
    ParticleArena::from_particles(vec![
        Particle::new(Vec3::ZERO, Vec3::ZERO),
        Particle::new(Vec3::new(10.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
        Particle::new(Vec3::new(0.0, 0.0, -15.0), Vec3::new(1.0, 0.0, 0.0)),
        Particle::new(Vec3::new(-8.0, 6.0, 0.0), Vec3::ZERO),
    ])
    .unwrap()
}

fn assert_arena_close(arena: &ParticleArena, expected: &[Particle], tol: f32) {
    for (index, (actual, want)) in arena.iter().zip(expected).enumerate() {
        assert!(
            (actual.position - want.position).length() <= tol,
            "particle {index}: {:?} vs {:?}",
            actual.position,
            want.position
        );
        assert!((actual.velocity - want.velocity).length() <= tol);
    }
}

#[test]
fn frame_draws_sun_then_every_particle() {
    let (mut sim, _sender) = Simulation::new(&per_frame_config(64)).unwrap();
    let mut input = InputState::new();
    let mut sink = RecordingSink::default();

    let stats = sim.frame(FrameClock::new(0.5, 0.016), &mut input, &mut sink);

    assert_eq!(sink.frames, 1);
    assert!(sink.camera.is_some());
    assert_eq!(sink.draws.len(), 64);
    assert_eq!(stats.instances, 64);
    assert_eq!(stats.steps, 1);
    assert_eq!(sim.phase(), FramePhase::Present);
    assert_eq!(sim.frames(), 1);

    let (first, sun) = &sink.draws[0];
    assert_eq!(*first, MeshKind::Sun);
    assert_eq!(sun.tint, [0.5, 0.5, 0.0, 1.0]);
    assert!(sink.draws[1..].iter().all(|(kind, _)| *kind == MeshKind::Particle));
}

#[test]
fn instances_carry_position_spin_and_tint() {
    let (mut sim, _sender) = Simulation::new(&per_frame_config(8)).unwrap();
    let mut input = InputState::new();
    let mut sink = RecordingSink::default();
    let elapsed = 0.5;

    sim.frame(FrameClock::new(elapsed, 0.016), &mut input, &mut sink);

    for (index, (_, instance)) in sink.draws.iter().enumerate() {
        let particle = sim.arena.get(index).unwrap();
        let model = instance.model_matrix();
        let translation = model.w_axis.truncate();
        assert!((translation - particle.position).length() < 1e-5);
        let expected = body_model(particle.position, index, elapsed);
        assert!(model.abs_diff_eq(expected, 1e-6));
    }

    // Particle 3 spins at 60°/s, so 30° after half a second.
    let spin = Mat4::from_axis_angle(SPIN_AXIS.normalize(), 30f32.to_radians());
    let particle = sim.arena.get(3).unwrap();
    let expected = Mat4::from_translation(particle.position) * spin;
    assert!(sink.draws[3].1.model_matrix().abs_diff_eq(expected, 1e-5));

    let phase = elapsed * 3.0;
    let tint = sink.draws[3].1.tint;
    assert!((tint[0] - phase.sin()).abs() < 1e-6);
    assert!((tint[1] - phase.cos()).abs() < 1e-6);
    assert!((tint[2] - phase.atan()).abs() < 1e-6);
    assert_eq!(tint[3], 1.0);
}

#[test]
fn pause_command_freezes_particles() {
    let (mut sim, sender) = Simulation::new(&per_frame_config(200)).unwrap();
    let mut input = InputState::new();
    let mut sink = RecordingSink::default();

    sender.send(SimCommand::TogglePause);
    let before = sim.arena.as_slice().to_vec();
    let stats = sim.frame(FrameClock::new(0.1, 0.1), &mut input, &mut sink);

    assert_eq!(stats.steps, 0);
    assert_eq!(stats.multiplier, 0.0);
    assert_eq!(sim.arena.as_slice(), before.as_slice());
    // Still drawn while paused.
    assert_eq!(sink.draws.len(), 200);
}

#[test]
fn reverse_command_rewinds_the_last_frame() {
    let (mut sim, sender) =
        Simulation::with_arena(&per_frame_config(4), orbiting_arena()).unwrap();
    let mut input = InputState::new();
    let mut sink = RecordingSink::default();
    let start = sim.arena.as_slice().to_vec();

    let clock = FrameClock::new(0.0, 0.016);
    sim.frame(clock, &mut input, &mut sink);
    sim.frame(clock.tick(0.016), &mut input, &mut sink);

    sender.send(SimCommand::Reverse);
    let clock = clock.tick(0.016).tick(0.016);
    let stats = sim.frame(clock, &mut input, &mut sink);
    assert_eq!(stats.multiplier, -1.0);
    sim.frame(clock.tick(0.016), &mut input, &mut sink);

    assert_arena_close(&sim.arena, &start, 1e-4);
}

#[test]
fn explicit_steps_bypass_playback_and_rewind() {
    let (mut sim, _sender) =
        Simulation::with_arena(&per_frame_config(4), orbiting_arena()).unwrap();
    let start = sim.arena.as_slice().to_vec();

    // Paused playback does not gate a direct step.
    sim.apply_command(SimCommand::TogglePause);
    let report = sim.step(2.0);
    assert_eq!(report.advanced, 3);
    assert!(report.degenerate.is_empty());
    assert_ne!(sim.arena.as_slice(), start.as_slice());

    assert_eq!(sim.step(0.0).advanced, 0);

    sim.step(-2.0);
    assert_arena_close(&sim.arena, &start, 1e-4);
}

#[test]
fn reset_restores_the_initial_layout() {
    let (mut sim, _sender) = Simulation::new(&per_frame_config(300)).unwrap();
    let mut input = InputState::new();
    let mut sink = RecordingSink::default();
    let start = sim.arena.as_slice().to_vec();

    let mut clock = FrameClock::default();
    for _ in 0..5 {
        clock = clock.tick(0.016);
        sim.frame(clock, &mut input, &mut sink);
    }
    assert_ne!(sim.arena.as_slice(), start.as_slice());

    sim.apply_command(SimCommand::Reset);
    assert_eq!(sim.arena.as_slice(), start.as_slice());
}

#[test]
fn fixed_policy_decouples_steps_from_frames() {
    let config = OrreryConfig {
        simulation: SimulationConfig {
            particle_count: 16,
            seed: Some(2),
            step: StepPolicy::Fixed {
                rate_hz: 60,
                max_steps_per_frame: 4,
            },
            ..SimulationConfig::default()
        },
        ..OrreryConfig::default()
    };
    let (mut sim, _sender) = Simulation::new(&config).unwrap();
    let mut input = InputState::new();
    let mut sink = RecordingSink::default();

    let stats = sim.frame(FrameClock::new(0.001, 0.001), &mut input, &mut sink);
    assert_eq!(stats.steps, 0);

    let stats = sim.frame(FrameClock::new(0.051, 0.05), &mut input, &mut sink);
    assert_eq!(stats.steps, 3);

    let stats = sim.frame(FrameClock::new(2.0, 1.949), &mut input, &mut sink);
    assert_eq!(stats.steps, 4);
}

#[test]
fn held_keys_fly_the_camera_each_frame() {
    let (mut sim, _sender) = Simulation::new(&per_frame_config(2)).unwrap();
    let mut input = InputState::new();
    let mut sink = RecordingSink::default();

    input.set_held(MoveDirection::Forward, true);
    sim.frame(FrameClock::new(1.0, 1.0), &mut input, &mut sink);

    assert!((sim.camera.position - Vec3::new(0.0, 0.0, 0.5)).length() < 1e-5);
    let camera = sink.camera.unwrap();
    assert_eq!(camera.view, sim.camera.view_matrix());
}

#[test]
fn attractor_alone_is_a_valid_scene() {
    let (mut sim, _sender) = Simulation::new(&per_frame_config(1)).unwrap();
    let mut input = InputState::new();
    let mut sink = RecordingSink::default();

    let stats = sim.frame(FrameClock::new(0.2, 0.2), &mut input, &mut sink);

    assert_eq!(stats.instances, 1);
    assert_eq!(sink.draws[0].0, MeshKind::Sun);
}

/// Records the speeds it was asked to step with and leaves particles alone.
struct SpeedLog(std::sync::Arc<std::sync::Mutex<Vec<f32>>>);

impl Integrator for SpeedLog {
    fn step(&mut self, _arena: &mut ParticleArena, law: &PointAttractor, speed: f32) -> StepReport {
        assert_eq!(law.strength, -25.0);
        self.0.lock().unwrap().push(speed);
        StepReport::default()
    }
}

#[test]
fn integrator_sees_the_playback_multiplier() {
    let speeds = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
    let (sim, sender) = Simulation::new(&per_frame_config(10)).unwrap();
    let mut sim = sim.with_integrator(SpeedLog(speeds.clone()));
    let mut input = InputState::new();
    let mut sink = RecordingSink::default();
    assert_eq!(sim.law().strength, -25.0);

    let mut clock = FrameClock::default();
    for cmd in [
        None,
        Some(SimCommand::Faster),
        Some(SimCommand::Reverse),
        Some(SimCommand::TogglePause),
        Some(SimCommand::TogglePause),
        Some(SimCommand::SetSpeed(0.5)),
    ] {
        if let Some(cmd) = cmd {
            sender.send(cmd);
        }
        clock = clock.tick(0.016);
        sim.frame(clock, &mut input, &mut sink);
    }

    assert_eq!(*speeds.lock().unwrap(), vec![1.0, 1.25, -1.25, -1.25, 0.5]);
}
