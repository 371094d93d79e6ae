use glam::Vec2;

use crate::viz::camera::MoveDirection;

/// Cursor capture for mouse look.
///
/// Capturing always passes through `AwaitingFirstSample`: the first sample after
/// a capture (absolute position or relative motion) is discarded, so the jump
/// between where the cursor was and where it now is never reaches the camera.
/// `last` is only known once an absolute position has been seen.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputMode {
    #[default]
    Free,
    AwaitingFirstSample,
    Captured {
        last: Option<Vec2>,
    },
}

impl InputMode {
    pub fn begin_capture(&mut self) {
        *self = InputMode::AwaitingFirstSample;
    }

    pub fn release(&mut self) {
        *self = InputMode::Free;
    }

    pub fn is_captured(&self) -> bool {
        !matches!(self, InputMode::Free)
    }

    /// Feeds an absolute cursor position in window pixels.
    ///
    /// Returns the look offset with y pointing up, or `None` when not capturing
    /// or when no earlier position of this capture is known.
    pub fn cursor_moved(&mut self, position: Vec2) -> Option<Vec2> {
        match *self {
            InputMode::Free => None,
            InputMode::AwaitingFirstSample | InputMode::Captured { last: None } => {
                *self = InputMode::Captured {
                    last: Some(position),
                };
                None
            }
            InputMode::Captured { last: Some(last) } => {
                *self = InputMode::Captured {
                    last: Some(position),
                };
                Some(Vec2::new(position.x - last.x, last.y - position.y))
            }
        }
    }

    /// Feeds raw relative pointer motion (screen axes, y down).
    ///
    /// Unlike positions this keeps flowing when the cursor is pinned at a window
    /// edge or locked in place.
    pub fn mouse_motion(&mut self, delta: Vec2) -> Option<Vec2> {
        match *self {
            InputMode::Free => None,
            InputMode::AwaitingFirstSample => {
                *self = InputMode::Captured { last: None };
                None
            }
            InputMode::Captured { .. } => Some(Vec2::new(delta.x, -delta.y)),
        }
    }
}

/// Held keys and pending look offset collected between two frames.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: [bool; 6],
    look_delta: Vec2,
    mode: InputMode,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_held(&mut self, direction: MoveDirection, held: bool) {
        self.held[slot(direction)] = held;
    }

    pub fn is_held(&self, direction: MoveDirection) -> bool {
        self.held[slot(direction)]
    }

    pub fn held(&self) -> impl Iterator<Item = MoveDirection> + '_ {
        MoveDirection::ALL
            .into_iter()
            .filter(|direction| self.is_held(*direction))
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn begin_capture(&mut self) {
        self.mode.begin_capture();
    }

    pub fn release_capture(&mut self) {
        self.mode.release();
        self.look_delta = Vec2::ZERO;
    }

    pub fn cursor_moved(&mut self, position: Vec2) {
        if let Some(delta) = self.mode.cursor_moved(position) {
            self.look_delta += delta;
        }
    }

    /// Relative counterpart of [`InputState::cursor_moved`] for raw device motion.
    pub fn mouse_motion(&mut self, delta: Vec2) {
        if let Some(delta) = self.mode.mouse_motion(delta) {
            self.look_delta += delta;
        }
    }

    /// Hands over the look offset gathered since the last call.
    pub fn take_look_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.look_delta)
    }
}

fn slot(direction: MoveDirection) -> usize {
    match direction {
        MoveDirection::Forward => 0,
        MoveDirection::Backward => 1,
        MoveDirection::Left => 2,
        MoveDirection::Right => 3,
        MoveDirection::Up => 4,
        MoveDirection::Down => 5,
    }
}
