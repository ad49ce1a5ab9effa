use crate::ray::Ray;
use glam::{Mat4, Vec3};

const PITCH_LIMIT: f32 = 89.0 * std::f32::consts::PI / 180.0;

/// Camera position and orientation, independent of any projection.
///
/// Orientation is stored as yaw/pitch in radians. Yaw 0 looks down +X and
/// grows towards +Z; positive pitch looks up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::looking_at(Vec3::new(5.0, 10.0, 15.0), Vec3::ZERO)
    }
}

impl CameraPose {
    /// Pose at `position` facing `target`.
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let mut pose = Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
        };
        pose.look_at(target);
        pose
    }

    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    /// Turn to face `target`. Leaves the orientation alone if `target` is the
    /// current position.
    pub fn look_at(&mut self, target: Vec3) {
        let dir = target - self.position;
        if dir.length_squared() <= f32::EPSILON {
            return;
        }
        let dir = dir.normalize();
        self.yaw = dir.z.atan2(dir.x);
        self.pitch = dir.y.asin().clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Apply a mouse-look delta already scaled to radians.
    pub fn rotate(&mut self, d_yaw: f32, d_pitch: f32) {
        self.yaw += d_yaw;
        self.pitch = (self.pitch + d_pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Ray from the eye through the center of the view.
    pub fn view_ray(&self) -> Ray {
        Ray::new(self.position, self.forward())
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), Vec3::Y)
    }
}
