use blockspace_common::CameraPose;
use glam::Vec3;
use std::f32::consts::PI;

const MIN_DISTANCE: f32 = 1.0;
const MAX_DISTANCE: f32 = 500.0;
/// Keeps the polar angle off the poles, where the up vector degenerates.
const POLE_EPSILON: f32 = 1e-3;
/// Distance factor per zoom step.
const ZOOM_BASE: f32 = 0.95;

/// Damped orbit around a fixed pivot.
///
/// Rotation and zoom inputs accumulate into pending deltas. Each tick applies
/// a `damping` fraction of what is pending and keeps the rest, so the camera
/// eases to a stop after input ends. With zero damping deltas apply at once.
#[derive(Debug, Clone)]
pub struct OrbitController {
    target: Vec3,
    damping: f32,
    pending_theta: f32,
    pending_phi: f32,
    pending_zoom: f32,
}

impl OrbitController {
    pub fn new(target: Vec3, damping: f32) -> Self {
        Self {
            target,
            damping: damping.clamp(0.0, 1.0),
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_zoom: 0.0,
        }
    }

    /// Queue a rotation in radians: `d_theta` around the vertical axis,
    /// `d_phi` towards the bottom pole.
    pub fn rotate(&mut self, d_theta: f32, d_phi: f32) {
        self.pending_theta += d_theta;
        self.pending_phi += d_phi;
    }

    /// Queue zoom steps; positive moves towards the target.
    pub fn zoom(&mut self, steps: f32) {
        self.pending_zoom += steps;
    }

    /// Whether queued motion is still being worked off.
    pub fn is_settling(&self) -> bool {
        self.pending_theta.abs() > 1e-6
            || self.pending_phi.abs() > 1e-6
            || self.pending_zoom.abs() > 1e-6
    }

    pub fn tick(&mut self, pose: &mut CameraPose) {
        let k = if self.damping > 0.0 { self.damping } else { 1.0 };

        let offset = pose.position - self.target;
        let radius = offset.length().max(MIN_DISTANCE);
        // theta measured from +Z towards +X, phi from +Y
        let theta = offset.x.atan2(offset.z) + self.pending_theta * k;
        let phi = ((offset.y / radius).clamp(-1.0, 1.0).acos() + self.pending_phi * k)
            .clamp(POLE_EPSILON, PI - POLE_EPSILON);
        let radius = (radius * ZOOM_BASE.powf(self.pending_zoom * k))
            .clamp(MIN_DISTANCE, MAX_DISTANCE);

        self.pending_theta *= 1.0 - k;
        self.pending_phi *= 1.0 - k;
        self.pending_zoom *= 1.0 - k;

        pose.position = self.target
            + Vec3::new(
                radius * phi.sin() * theta.sin(),
                radius * phi.cos(),
                radius * phi.sin() * theta.cos(),
            );
        pose.look_at(self.target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn idle_tick_keeps_pose() {
        let mut orbit = OrbitController::new(Vec3::ZERO, 0.05);
        let mut pose = CameraPose::looking_at(Vec3::new(5.0, 10.0, 15.0), Vec3::ZERO);
        let before = pose.position;
        orbit.tick(&mut pose);
        assert!((pose.position - before).length() < 1e-4);
    }

    #[test]
    fn rotation_preserves_distance() {
        let mut orbit = OrbitController::new(Vec3::ZERO, 0.05);
        let mut pose = CameraPose::looking_at(Vec3::new(5.0, 10.0, 15.0), Vec3::ZERO);
        let r = pose.position.length();
        orbit.rotate(1.0, 0.2);
        for _ in 0..50 {
            orbit.tick(&mut pose);
        }
        assert!(approx(pose.position.length(), r));
    }

    #[test]
    fn damping_eases_out() {
        let mut orbit = OrbitController::new(Vec3::ZERO, 0.05);
        let mut pose = CameraPose::looking_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
        orbit.rotate(1.0, 0.0);

        orbit.tick(&mut pose);
        let first = pose.position;
        assert!(orbit.is_settling());

        orbit.tick(&mut pose);
        assert_ne!(pose.position, first);

        for _ in 0..1000 {
            orbit.tick(&mut pose);
        }
        assert!(!orbit.is_settling());
        // the whole queued rotation ends up applied: theta = 1 rad
        assert!(approx(pose.position.x, 10.0 * 1.0f32.sin()));
    }

    #[test]
    fn zero_damping_applies_at_once() {
        let mut orbit = OrbitController::new(Vec3::ZERO, 0.0);
        let mut pose = CameraPose::looking_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
        orbit.rotate(PI / 2.0, 0.0);
        orbit.tick(&mut pose);
        assert!(approx(pose.position.x, 10.0));
        assert!(!orbit.is_settling());
    }

    #[test]
    fn zoom_moves_closer_and_is_clamped() {
        let mut orbit = OrbitController::new(Vec3::ZERO, 0.0);
        let mut pose = CameraPose::looking_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
        orbit.zoom(1.0);
        orbit.tick(&mut pose);
        assert!(approx(pose.position.length(), 9.5));

        orbit.zoom(1000.0);
        orbit.tick(&mut pose);
        assert!(approx(pose.position.length(), MIN_DISTANCE));
    }

    #[test]
    fn camera_faces_target_after_tick() {
        let target = Vec3::new(1.0, 2.0, 3.0);
        let mut orbit = OrbitController::new(target, 0.0);
        let mut pose = CameraPose::looking_at(Vec3::new(10.0, 10.0, 10.0), Vec3::ZERO);
        orbit.tick(&mut pose);
        let to_target = (target - pose.position).normalize();
        assert!(pose.forward().dot(to_target) > 0.9999);
    }
}
