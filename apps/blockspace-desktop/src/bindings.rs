use blockspace_input::{Action, MouseButton, MoveDirection};
use winit::event::MouseButton as WinitButton;
use winit::keyboard::KeyCode;

/// Map a physical key transition to an editor action.
///
/// Movement keys report both edges; everything else fires on press only.
pub fn key_action(key: KeyCode, pressed: bool) -> Action {
    let direction = match key {
        KeyCode::KeyW | KeyCode::ArrowUp => Some(MoveDirection::Forward),
        KeyCode::KeyS | KeyCode::ArrowDown => Some(MoveDirection::Backward),
        KeyCode::KeyA | KeyCode::ArrowLeft => Some(MoveDirection::Left),
        KeyCode::KeyD | KeyCode::ArrowRight => Some(MoveDirection::Right),
        _ => None,
    };
    if let Some(direction) = direction {
        return Action::Move { direction, pressed };
    }
    if !pressed {
        return Action::Noop;
    }
    match key {
        KeyCode::Space => Action::Jump,
        KeyCode::Tab => Action::ToggleMode,
        KeyCode::Escape => Action::ReleaseCapture,
        _ => digit(key).map_or(Action::Noop, Action::SelectBlock),
    }
}

pub fn mouse_button(button: WinitButton) -> MouseButton {
    match button {
        WinitButton::Left => MouseButton::Primary,
        WinitButton::Right => MouseButton::Secondary,
        _ => MouseButton::Other,
    }
}

fn digit(key: KeyCode) -> Option<u8> {
    let d = match key {
        KeyCode::Digit0 | KeyCode::Numpad0 => 0,
        KeyCode::Digit1 | KeyCode::Numpad1 => 1,
        KeyCode::Digit2 | KeyCode::Numpad2 => 2,
        KeyCode::Digit3 | KeyCode::Numpad3 => 3,
        KeyCode::Digit4 | KeyCode::Numpad4 => 4,
        KeyCode::Digit5 | KeyCode::Numpad5 => 5,
        KeyCode::Digit6 | KeyCode::Numpad6 => 6,
        KeyCode::Digit7 | KeyCode::Numpad7 => 7,
        KeyCode::Digit8 | KeyCode::Numpad8 => 8,
        KeyCode::Digit9 | KeyCode::Numpad9 => 9,
        _ => return None,
    };
    Some(d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_keys_report_both_edges() {
        assert_eq!(
            key_action(KeyCode::KeyW, true),
            Action::Move {
                direction: MoveDirection::Forward,
                pressed: true
            }
        );
        assert_eq!(
            key_action(KeyCode::KeyD, false),
            Action::Move {
                direction: MoveDirection::Right,
                pressed: false
            }
        );
    }

    #[test]
    fn digits_pass_through_unvalidated() {
        assert_eq!(key_action(KeyCode::Digit3, true), Action::SelectBlock(3));
        assert_eq!(key_action(KeyCode::Digit9, true), Action::SelectBlock(9));
        assert_eq!(key_action(KeyCode::Digit3, false), Action::Noop);
    }

    #[test]
    fn command_keys_fire_on_press() {
        assert_eq!(key_action(KeyCode::Space, true), Action::Jump);
        assert_eq!(key_action(KeyCode::Space, false), Action::Noop);
        assert_eq!(key_action(KeyCode::Tab, true), Action::ToggleMode);
        assert_eq!(key_action(KeyCode::Escape, true), Action::ReleaseCapture);
        assert_eq!(key_action(KeyCode::KeyQ, true), Action::Noop);
    }

    #[test]
    fn mouse_buttons_map_to_edit_actions() {
        assert_eq!(Action::from(mouse_button(WinitButton::Left)), Action::Primary);
        assert_eq!(Action::from(mouse_button(WinitButton::Right)), Action::Secondary);
        assert_eq!(Action::from(mouse_button(WinitButton::Middle)), Action::Noop);
    }
}
