use orrery::control::SimCommand;
use orrery::viz::MoveDirection;
use winit::keyboard::KeyCode;

/// What a key does once pressed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyAction {
    /// Active for as long as the key is held.
    Move(MoveDirection),
    /// Fires once per press; auto-repeat is ignored.
    Command(SimCommand),
    Quit,
}

pub fn map_key(code: KeyCode) -> Option<KeyAction> {
    let action = match code {
        KeyCode::KeyW => KeyAction::Move(MoveDirection::Forward),
        KeyCode::KeyS => KeyAction::Move(MoveDirection::Backward),
        KeyCode::KeyA => KeyAction::Move(MoveDirection::Left),
        KeyCode::KeyD => KeyAction::Move(MoveDirection::Right),
        KeyCode::Space => KeyAction::Move(MoveDirection::Up),
        KeyCode::ShiftLeft => KeyAction::Move(MoveDirection::Down),
        KeyCode::KeyP => KeyAction::Command(SimCommand::TogglePause),
        KeyCode::KeyR => KeyAction::Command(SimCommand::Reverse),
        KeyCode::ArrowUp | KeyCode::Equal => KeyAction::Command(SimCommand::Faster),
        KeyCode::ArrowDown | KeyCode::Minus => KeyAction::Command(SimCommand::Slower),
        KeyCode::Backspace => KeyAction::Command(SimCommand::Reset),
        KeyCode::Escape => KeyAction::Quit,
        _ => return None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_keys_cover_every_direction() {
        let mapped: Vec<_> = [
            KeyCode::KeyW,
            KeyCode::KeyS,
            KeyCode::KeyA,
            KeyCode::KeyD,
            KeyCode::Space,
            KeyCode::ShiftLeft,
        ]
        .into_iter()
        .filter_map(|code| match map_key(code) {
            Some(KeyAction::Move(direction)) => Some(direction),
            _ => None,
        })
        .collect();
        assert_eq!(mapped, MoveDirection::ALL.to_vec());
    }

    #[test]
    fn playback_keys_send_commands() {
        assert_eq!(
            map_key(KeyCode::KeyP),
            Some(KeyAction::Command(SimCommand::TogglePause))
        );
        assert_eq!(
            map_key(KeyCode::Backspace),
            Some(KeyAction::Command(SimCommand::Reset))
        );
        assert_eq!(map_key(KeyCode::Escape), Some(KeyAction::Quit));
        assert_eq!(map_key(KeyCode::KeyQ), None);
    }
}
