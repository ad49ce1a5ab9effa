use blockspace_common::{CameraPose, MotionConfig, VoxelCoord};
use blockspace_input::MoveFlags;
use blockspace_kernel::VoxelWorld;
use glam::Vec3;

/// Distance from the camera down to the cell probed for ground contact.
pub const FEET_OFFSET: f32 = 1.0;
/// Camera height above the probed cell's center once standing on it.
///
/// Must stay paired with `FEET_OFFSET`: probe at `y - 1`, snap to `probe + 2`.
pub const EYE_HEIGHT: f32 = 2.0;

/// First-person kinematic integrator.
///
/// Each tick moves the camera by a horizontal step plus the vertical velocity,
/// then corrects against the block under the projected feet. There is no
/// sweep or sub-stepping; per-tick displacements are small against the block
/// size. Grounded/falling is not stored as a mode, it is re-derived every tick.
#[derive(Debug, Clone)]
pub struct WalkController {
    config: MotionConfig,
    vertical_velocity: f32,
    grounded: bool,
}

impl WalkController {
    pub fn new(config: MotionConfig) -> Self {
        Self {
            config,
            vertical_velocity: 0.0,
            grounded: false,
        }
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    /// Whether the last tick found a block under the feet.
    pub fn grounded(&self) -> bool {
        self.grounded
    }

    /// Start a jump. Only accepted while grounded; returns whether it was.
    pub fn jump(&mut self) -> bool {
        if !self.grounded {
            return false;
        }
        self.vertical_velocity = self.config.jump_force;
        tracing::trace!(velocity = self.vertical_velocity, "jump");
        true
    }

    /// Advance one tick, moving `pose` relative to its facing.
    pub fn tick(&mut self, world: &VoxelWorld, pose: &mut CameraPose, moves: MoveFlags) {
        let horizontal = horizontal_step(pose.forward(), moves) * self.config.speed;

        self.vertical_velocity += self.config.gravity;
        let mut next = pose.position + horizontal + Vec3::Y * self.vertical_velocity;

        let probe = VoxelCoord::from_position(next - Vec3::Y * FEET_OFFSET);
        self.grounded = world.is_solid(probe);

        if self.grounded && self.vertical_velocity < 0.0 {
            self.vertical_velocity = 0.0;
            next.y = probe.y as f32 + EYE_HEIGHT;
        }

        pose.position = next;
    }
}

/// Unit (or zero) world-space direction for the held keys, flattened onto the
/// horizontal plane of the camera's facing.
fn horizontal_step(facing: Vec3, moves: MoveFlags) -> Vec3 {
    let axis = moves.axis();
    if axis == glam::Vec2::ZERO {
        return Vec3::ZERO;
    }
    let forward = Vec3::new(facing.x, 0.0, facing.z).normalize_or_zero();
    let right = forward.cross(Vec3::Y);
    forward * axis.y + right * axis.x
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockspace_common::BlockType;
    use blockspace_kernel::{Drawable, DrawableHandle, RenderSurface};

    struct NoSurface;

    impl RenderSurface for NoSurface {
        fn add(&mut self, _drawable: Drawable) {}
        fn remove(&mut self, _handle: DrawableHandle) {}
    }

    fn world_with(cells: &[(i32, i32, i32)]) -> VoxelWorld {
        let mut w = VoxelWorld::new();
        for &(x, y, z) in cells {
            w.set(VoxelCoord::new(x, y, z), BlockType::Stone, &mut NoSurface);
        }
        w
    }

    /// Pose facing -Z.
    fn pose_at(position: Vec3) -> CameraPose {
        CameraPose::looking_at(position, position + Vec3::NEG_Z)
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn gravity_accumulates_in_free_fall() {
        let world = VoxelWorld::new();
        let mut c = WalkController::new(MotionConfig::default());
        let mut pose = pose_at(Vec3::new(0.0, 10.0, 0.0));

        c.tick(&world, &mut pose, MoveFlags::default());
        c.tick(&world, &mut pose, MoveFlags::default());

        assert!(approx(c.vertical_velocity(), -0.004));
        assert!(approx(pose.position.y, 10.0 - 0.002 - 0.004));
        assert!(!c.grounded());
    }

    #[test]
    fn falling_into_ground_snaps_to_eye_height() {
        let world = world_with(&[(0, 0, 0)]);
        let mut c = WalkController::new(MotionConfig::default());
        c.vertical_velocity = -0.5;
        let mut pose = pose_at(Vec3::new(0.0, 2.0, 0.0));

        c.tick(&world, &mut pose, MoveFlags::default());

        // next y = 1.498, probe rounds to y = 0
        assert!(c.grounded());
        assert_eq!(c.vertical_velocity(), 0.0);
        assert_eq!(pose.position.y, 0.0 + EYE_HEIGHT);
    }

    #[test]
    fn snap_uses_probe_cell_not_current_cell() {
        let world = world_with(&[(0, 3, 0)]);
        let mut c = WalkController::new(MotionConfig::default());
        c.vertical_velocity = -0.5;
        let mut pose = pose_at(Vec3::new(0.0, 4.6, 0.0));

        c.tick(&world, &mut pose, MoveFlags::default());

        // next y = 4.098, probe = round(3.098) = 3
        assert_eq!(pose.position.y, 5.0);
        assert_eq!(c.vertical_velocity(), 0.0);
    }

    #[test]
    fn rising_through_ground_is_not_snapped() {
        let world = world_with(&[(0, 0, 0)]);
        let mut c = WalkController::new(MotionConfig::default());
        c.vertical_velocity = 0.15;
        let mut pose = pose_at(Vec3::new(0.0, 1.2, 0.0));

        c.tick(&world, &mut pose, MoveFlags::default());

        assert!(c.grounded());
        assert!(approx(c.vertical_velocity(), 0.148));
        assert!(approx(pose.position.y, 1.348));
    }

    #[test]
    fn jump_requires_ground() {
        let mut c = WalkController::new(MotionConfig::default());
        assert!(!c.jump());
        assert_eq!(c.vertical_velocity(), 0.0);

        let world = world_with(&[(0, 0, 0)]);
        c.vertical_velocity = -0.5;
        let mut pose = pose_at(Vec3::new(0.0, 2.0, 0.0));
        c.tick(&world, &mut pose, MoveFlags::default());

        assert!(c.jump());
        assert_eq!(c.vertical_velocity(), 0.15);
    }

    #[test]
    fn forward_moves_along_flattened_facing() {
        let world = VoxelWorld::new();
        let mut c = WalkController::new(MotionConfig::default());
        // looking down and towards -Z
        let mut pose =
            CameraPose::looking_at(Vec3::new(0.0, 10.0, 0.0), Vec3::new(0.0, 5.0, -5.0));
        let moves = MoveFlags {
            forward: true,
            ..MoveFlags::default()
        };

        c.tick(&world, &mut pose, moves);

        assert!(approx(pose.position.z, -0.1));
        assert!(approx(pose.position.x, 0.0));
    }

    #[test]
    fn strafe_right_follows_camera_right() {
        let world = VoxelWorld::new();
        let mut c = WalkController::new(MotionConfig::default());
        let mut pose = pose_at(Vec3::new(0.0, 10.0, 0.0));
        let moves = MoveFlags {
            right: true,
            ..MoveFlags::default()
        };

        c.tick(&world, &mut pose, moves);

        // facing -Z, right is +X
        assert!(approx(pose.position.x, 0.1));
        assert!(approx(pose.position.z, 0.0));
    }

    #[test]
    fn diagonal_input_is_normalized() {
        let world = VoxelWorld::new();
        let mut c = WalkController::new(MotionConfig::default());
        let start = Vec3::new(0.0, 10.0, 0.0);
        let mut pose = pose_at(start);
        let moves = MoveFlags {
            forward: true,
            left: true,
            ..MoveFlags::default()
        };

        c.tick(&world, &mut pose, moves);

        let d = pose.position - start;
        let horizontal = Vec3::new(d.x, 0.0, d.z).length();
        assert!(approx(horizontal, 0.1));
    }

    #[test]
    fn looking_straight_down_gives_no_horizontal_motion() {
        let step = horizontal_step(
            Vec3::NEG_Y,
            MoveFlags {
                forward: true,
                ..MoveFlags::default()
            },
        );
        assert_eq!(step, Vec3::ZERO);
    }

    #[test]
    fn walking_off_an_edge_starts_falling() {
        let world = world_with(&[(0, 0, 0)]);
        let mut c = WalkController::new(MotionConfig::default());
        c.vertical_velocity = -0.5;
        let mut pose = pose_at(Vec3::new(0.0, 2.0, 0.0));
        c.tick(&world, &mut pose, MoveFlags::default());
        assert!(c.grounded());

        pose.position.z = -3.0;
        c.tick(&world, &mut pose, MoveFlags::default());
        assert!(!c.grounded());
        assert!(c.vertical_velocity() < 0.0);
    }
}
