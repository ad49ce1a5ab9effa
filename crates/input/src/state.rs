use crate::action::MoveDirection;
use glam::Vec2;

/// Which camera controller is in charge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ModeKind {
    /// Camera-only manipulation around a pivot. Edits are disabled.
    #[default]
    Orbit,
    /// First-person movement and block editing.
    Walk,
}

/// Mode plus pointer-capture status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Interaction {
    pub mode: ModeKind,
    pub cursor_captured: bool,
}

impl Interaction {
    /// Movement, jumping and edits only happen in walk mode with the pointer
    /// captured.
    pub fn is_live(&self) -> bool {
        self.mode == ModeKind::Walk && self.cursor_captured
    }
}

/// Held state of the four horizontal movement keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveFlags {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveFlags {
    pub fn set(&mut self, direction: MoveDirection, pressed: bool) {
        match direction {
            MoveDirection::Forward => self.forward = pressed,
            MoveDirection::Backward => self.backward = pressed,
            MoveDirection::Left => self.left = pressed,
            MoveDirection::Right => self.right = pressed,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Input direction with `x` = right and `y` = forward, unit length or zero.
    pub fn axis(&self) -> Vec2 {
        let x = f32::from(u8::from(self.right)) - f32::from(u8::from(self.left));
        let y = f32::from(u8::from(self.forward)) - f32::from(u8::from(self.backward));
        Vec2::new(x, y).normalize_or_zero()
    }
}

/// Input-side session state: the interaction gate plus held movement keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    interaction: Interaction,
    moves: MoveFlags,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    pub fn moves(&self) -> MoveFlags {
        self.moves
    }

    pub fn is_live(&self) -> bool {
        self.interaction.is_live()
    }

    /// Record a movement key. Ignored unless the interaction is live, so keys
    /// pressed in orbit mode do not carry into walk mode.
    pub fn set_move(&mut self, direction: MoveDirection, pressed: bool) {
        if self.is_live() {
            self.moves.set(direction, pressed);
        }
    }

    pub fn set_mode(&mut self, mode: ModeKind) {
        if self.interaction.mode != mode {
            tracing::debug!(?mode, "interaction mode changed");
        }
        self.interaction.mode = mode;
        if !self.is_live() {
            self.moves.clear();
        }
    }

    /// Capture changes clear held keys when the interaction stops being live;
    /// the matching key-up events would otherwise be lost.
    pub fn set_captured(&mut self, captured: bool) {
        self.interaction.cursor_captured = captured;
        if !self.is_live() {
            self.moves.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walking() -> InputState {
        let mut s = InputState::new();
        s.set_mode(ModeKind::Walk);
        s.set_captured(true);
        s
    }

    #[test]
    fn live_requires_walk_and_capture() {
        let mut i = Interaction::default();
        assert!(!i.is_live());
        i.mode = ModeKind::Walk;
        assert!(!i.is_live());
        i.cursor_captured = true;
        assert!(i.is_live());
        i.mode = ModeKind::Orbit;
        assert!(!i.is_live());
    }

    #[test]
    fn axis_is_normalized() {
        let flags = MoveFlags {
            forward: true,
            right: true,
            ..MoveFlags::default()
        };
        let a = flags.axis();
        assert!((a.length() - 1.0).abs() < 1e-6);
        assert!(a.x > 0.0 && a.y > 0.0);
    }

    #[test]
    fn opposing_keys_cancel() {
        let flags = MoveFlags {
            forward: true,
            backward: true,
            ..MoveFlags::default()
        };
        assert_eq!(flags.axis(), Vec2::ZERO);
    }

    #[test]
    fn moves_ignored_when_not_live() {
        let mut s = InputState::new();
        s.set_move(MoveDirection::Forward, true);
        assert_eq!(s.moves(), MoveFlags::default());

        let mut s = walking();
        s.set_move(MoveDirection::Forward, true);
        assert!(s.moves().forward);
    }

    #[test]
    fn losing_capture_clears_held_keys() {
        let mut s = walking();
        s.set_move(MoveDirection::Left, true);
        s.set_captured(false);
        assert_eq!(s.moves(), MoveFlags::default());
        assert_eq!(s.interaction().mode, ModeKind::Walk);
    }

    #[test]
    fn leaving_walk_clears_held_keys() {
        let mut s = walking();
        s.set_move(MoveDirection::Right, true);
        s.set_mode(ModeKind::Orbit);
        assert_eq!(s.moves(), MoveFlags::default());
    }
}
