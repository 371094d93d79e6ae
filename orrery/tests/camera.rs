use glam::{Vec2, Vec3};
use orrery::DegenerateStateError;
use orrery::config::CameraConfig;
use orrery::viz::{Camera, InputMode, InputState, MoveDirection, PitchPolicy};

fn close(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-5
}

#[test]
fn default_camera_looks_down_negative_z() {
    let camera = Camera::new(&CameraConfig::default());
    assert!(close(camera.front(), Vec3::NEG_Z), "front = {:?}", camera.front());
    assert!(close(camera.right(), Vec3::X));
    assert!(close(camera.up(), Vec3::Y));
    assert_eq!(camera.position, Vec3::new(0.0, 0.0, 3.0));
}

#[test]
fn zero_mouse_delta_keeps_the_view() {
    let mut camera = Camera::at(Vec3::new(1.0, 2.0, 3.0), -45.0, 30.0);
    let before = camera.view_matrix();

    assert!(camera.process_mouse_movement(0.0, 0.0).is_none());

    assert_eq!(camera.view_matrix(), before);
}

#[test]
fn zero_delta_at_origin_keeps_the_view() {
    let mut camera = Camera::at(Vec3::ZERO, 0.0, 0.0);
    let before = camera.view_matrix();
    assert!(close(camera.front(), Vec3::X));

    assert!(camera.process_mouse_movement(0.0, 0.0).is_none());

    assert_eq!(camera.view_matrix(), before);
    assert_eq!(camera.position, Vec3::ZERO);
}

#[test]
fn pitch_is_clamped_below_vertical() {
    let mut camera = Camera::new(&CameraConfig::default());

    let clamped = camera.process_mouse_movement(0.0, 10_000.0);
    assert_eq!(camera.pitch, 89.0);
    assert!(matches!(clamped, Some(DegenerateStateError::PitchOutOfRange { .. })));
    assert!(camera.view_matrix().is_finite());

    camera.process_mouse_movement(0.0, -20_000.0);
    assert_eq!(camera.pitch, -89.0);
    assert!(camera.view_matrix().is_finite());
}

#[test]
fn unconstrained_pitch_passes_through() {
    let mut camera = Camera::new(&CameraConfig {
        pitch_policy: PitchPolicy::Unconstrained,
        ..CameraConfig::default()
    });
    assert!(camera.process_mouse_movement(0.0, 1_000.0).is_none());
    assert!((camera.pitch - 100.0).abs() < 1e-4);
    assert!(camera.front().is_finite());
}

#[test]
fn keyboard_moves_along_camera_axes() {
    let mut camera = Camera::new(&CameraConfig::default());

    camera.process_keyboard(MoveDirection::Forward, 1.0);
    assert!(close(camera.position, Vec3::new(0.0, 0.0, 0.5)), "{:?}", camera.position);

    camera.process_keyboard(MoveDirection::Right, 2.0);
    assert!(close(camera.position, Vec3::new(5.0, 0.0, 0.5)));

    camera.process_keyboard(MoveDirection::Up, 0.4);
    camera.process_keyboard(MoveDirection::Down, 0.4);
    camera.process_keyboard(MoveDirection::Left, 2.0);
    camera.process_keyboard(MoveDirection::Backward, 1.0);
    assert!(close(camera.position, Vec3::new(0.0, 0.0, 3.0)));
}

#[test]
fn first_sample_after_capture_produces_no_look() {
    let mut input = InputState::new();

    // Free cursor is ignored.
    input.cursor_moved(Vec2::new(10.0, 10.0));
    assert_eq!(input.take_look_delta(), Vec2::ZERO);

    input.begin_capture();
    assert_eq!(input.mode(), InputMode::AwaitingFirstSample);
    input.cursor_moved(Vec2::new(400.0, 300.0));
    assert_eq!(input.take_look_delta(), Vec2::ZERO);

    input.cursor_moved(Vec2::new(405.0, 290.0));
    input.cursor_moved(Vec2::new(410.0, 295.0));
    // Screen y grows downward; look offsets grow upward.
    assert_eq!(input.take_look_delta(), Vec2::new(10.0, 5.0));
    assert_eq!(input.take_look_delta(), Vec2::ZERO);
}

#[test]
fn releasing_capture_drops_pending_look_and_rearms() {
    let mut input = InputState::new();
    input.begin_capture();
    input.cursor_moved(Vec2::new(0.0, 0.0));
    input.cursor_moved(Vec2::new(50.0, 0.0));

    input.release_capture();
    assert_eq!(input.mode(), InputMode::Free);
    assert_eq!(input.take_look_delta(), Vec2::ZERO);

    // A new capture far away must not jump the camera.
    input.begin_capture();
    input.cursor_moved(Vec2::new(900.0, 700.0));
    assert_eq!(input.take_look_delta(), Vec2::ZERO);
    assert!(matches!(input.mode(), InputMode::Captured { .. }));
}

#[test]
fn held_keys_are_reported_until_released() {
    let mut input = InputState::new();
    input.set_held(MoveDirection::Forward, true);
    input.set_held(MoveDirection::Up, true);
    assert_eq!(
        input.held().collect::<Vec<_>>(),
        vec![MoveDirection::Forward, MoveDirection::Up]
    );

    input.set_held(MoveDirection::Forward, false);
    assert!(!input.is_held(MoveDirection::Forward));
    assert_eq!(input.held().count(), 1);
}

#[test]
fn relative_motion_keeps_turning_while_cursor_is_pinned() {
    let mut input = InputState::new();

    // Ignored while free.
    input.mouse_motion(Vec2::new(30.0, 30.0));
    assert_eq!(input.take_look_delta(), Vec2::ZERO);

    input.begin_capture();
    // The first motion after capture may carry the warp jump.
    input.mouse_motion(Vec2::new(500.0, -300.0));
    assert_eq!(input.take_look_delta(), Vec2::ZERO);
    assert_eq!(input.mode(), InputMode::Captured { last: None });

    // A cursor stuck at the edge reports the same position, yet raw motion keeps coming.
    for _ in 0..4 {
        input.cursor_moved(Vec2::new(1279.0, 360.0));
        input.mouse_motion(Vec2::new(8.0, 2.0));
    }
    assert_eq!(input.take_look_delta(), Vec2::new(32.0, -8.0));

    input.release_capture();
    input.mouse_motion(Vec2::new(8.0, 2.0));
    assert_eq!(input.take_look_delta(), Vec2::ZERO);
}

#[test]
fn relative_motion_turns_the_camera_without_limit() {
    let mut camera = Camera::new(&CameraConfig::default());
    let mut input = InputState::new();
    input.begin_capture();
    input.mouse_motion(Vec2::ZERO);

    for _ in 0..100 {
        input.mouse_motion(Vec2::new(10.0, 0.0));
    }
    let look = input.take_look_delta();
    camera.process_mouse_movement(look.x, look.y);

    // 1000 px at 0.1 deg/px is 100 degrees of yaw, more than any window is wide.
    assert!((camera.yaw - 10.0).abs() < 1e-3, "yaw = {}", camera.yaw);
}
