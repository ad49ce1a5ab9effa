use crate::orbit::OrbitController;
use crate::walk::WalkController;
use blockspace_common::{CameraPose, MotionConfig, ViewConfig};
use blockspace_input::{InputState, ModeKind};
use blockspace_kernel::VoxelWorld;

/// The active camera controller. Exactly one exists at a time.
#[derive(Debug, Clone)]
pub enum ControlMode {
    Orbit(OrbitController),
    Walk(WalkController),
}

impl ControlMode {
    pub fn kind(&self) -> ModeKind {
        match self {
            Self::Orbit(_) => ModeKind::Orbit,
            Self::Walk(_) => ModeKind::Walk,
        }
    }
}

/// Camera pose plus the controller that currently drives it.
#[derive(Debug, Clone)]
pub struct CameraRig {
    pose: CameraPose,
    mode: ControlMode,
    motion: MotionConfig,
    view: ViewConfig,
}

impl CameraRig {
    /// Start in orbit mode at the configured eye, facing the pivot.
    pub fn new(motion: MotionConfig, view: ViewConfig) -> Self {
        Self {
            pose: CameraPose::looking_at(view.eye, view.target),
            mode: ControlMode::Orbit(OrbitController::new(view.target, view.orbit_damping)),
            motion,
            view,
        }
    }

    pub fn pose(&self) -> &CameraPose {
        &self.pose
    }

    pub fn mode(&self) -> &ControlMode {
        &self.mode
    }

    pub fn kind(&self) -> ModeKind {
        self.mode.kind()
    }

    /// Replace the camera pose without touching controller state.
    pub fn set_pose(&mut self, pose: CameraPose) {
        self.pose = pose;
    }

    /// Swap to the other controller and report the new mode to `input`.
    ///
    /// Entering walk mode does not capture the pointer by itself; the caller
    /// grabs the cursor and then calls `InputState::set_captured`.
    pub fn toggle_mode(&mut self, input: &mut InputState) -> ModeKind {
        self.mode = match self.mode {
            ControlMode::Orbit(_) => ControlMode::Walk(WalkController::new(self.motion)),
            ControlMode::Walk(_) => {
                input.set_captured(false);
                ControlMode::Orbit(OrbitController::new(
                    self.view.target,
                    self.view.orbit_damping,
                ))
            }
        };
        let kind = self.mode.kind();
        input.set_mode(kind);
        tracing::debug!(?kind, "control mode toggled");
        kind
    }

    /// Advance the active controller by one frame.
    pub fn tick(&mut self, world: &VoxelWorld, input: &InputState) {
        match &mut self.mode {
            ControlMode::Orbit(orbit) => orbit.tick(&mut self.pose),
            ControlMode::Walk(walk) => {
                if input.is_live() {
                    walk.tick(world, &mut self.pose, input.moves());
                }
            }
        }
    }

    /// Pointer motion in pixels. Turns the head in walk mode (only while
    /// live) and orbits in orbit mode; the caller decides when an orbit drag
    /// is in progress.
    pub fn look(&mut self, dx: f32, dy: f32, input: &InputState) {
        let s = self.view.mouse_sensitivity;
        match &mut self.mode {
            ControlMode::Orbit(orbit) => orbit.rotate(-dx * s, -dy * s),
            ControlMode::Walk(_) => {
                if input.is_live() {
                    self.pose.rotate(dx * s, -dy * s);
                }
            }
        }
    }

    pub fn zoom(&mut self, steps: f32) {
        if let ControlMode::Orbit(orbit) = &mut self.mode {
            orbit.zoom(steps);
        }
    }

    /// Request a jump. Only walk mode, live and grounded, accepts it.
    pub fn jump(&mut self, input: &InputState) -> bool {
        match &mut self.mode {
            ControlMode::Walk(walk) if input.is_live() => walk.jump(),
            _ => false,
        }
    }
}
