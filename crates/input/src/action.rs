/// A high-level action produced from keyboard or pointer input.
///
/// The editor consumes actions, never raw input events, so the desktop app
/// and the headless driver share the same logic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Primary pointer button: remove the targeted block.
    Primary,
    /// Secondary pointer button: place the selected block.
    Secondary,
    /// A number key was pressed. Carries the digit as typed, unvalidated.
    SelectBlock(u8),
    /// Switch between orbit and walk modes.
    ToggleMode,
    /// Pointer capture was lost (e.g. Escape).
    ReleaseCapture,
    Jump,
    Move {
        direction: MoveDirection,
        pressed: bool,
    },
    /// Relative pointer motion in pixels.
    Look { dx: f32, dy: f32 },
    /// Zoom input (scroll lines, positive = towards the target).
    Zoom(f32),
    /// No-op (used for input that has no binding).
    Noop,
}

/// One of the four horizontal movement keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    Forward,
    Backward,
    Left,
    Right,
}

/// Pointer buttons the editor distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Primary,
    Secondary,
    Other,
}

impl From<MouseButton> for Action {
    fn from(button: MouseButton) -> Self {
        match button {
            MouseButton::Primary => Action::Primary,
            MouseButton::Secondary => Action::Secondary,
            MouseButton::Other => Action::Noop,
        }
    }
}
