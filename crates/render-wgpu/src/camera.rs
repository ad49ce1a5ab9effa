use blockspace_common::{CameraPose, Rgb};
use glam::{Mat4, Vec3};

/// Background color behind the world, also the color distant cubes fade to.
pub const SKY_COLOR: Rgb = Rgb(0x87_CE_EB);

/// Perspective projection parameters. The pose comes from the active
/// control mode; this only turns it into clip space.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    /// Vertical field of view in radians.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(75.0)
    }
}

impl Projection {
    pub fn new(fov_degrees: f32) -> Self {
        Self {
            fov: fov_degrees.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }

    /// Update the aspect ratio after a resize. Zero-sized surfaces are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self, pose: &CameraPose) -> Mat4 {
        self.matrix() * pose.view_matrix()
    }
}

/// One white directional light plus white ambient.
#[derive(Debug, Clone, Copy)]
pub struct Lighting {
    /// Position of the light; it shines from here towards the origin.
    pub direction: Vec3,
    pub directional: f32,
    pub ambient: f32,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            direction: Vec3::new(10.0, 20.0, 5.0),
            directional: 0.8,
            ambient: 0.6,
        }
    }
}

impl Lighting {
    /// Packed for the shader: normalized direction in xyz, ambient in w, and
    /// the directional intensity in the second vector's x.
    pub(crate) fn pack(&self) -> [[f32; 4]; 2] {
        let d = self.direction.normalize_or_zero();
        [[d.x, d.y, d.z, self.ambient], [self.directional, 0.0, 0.0, 0.0]]
    }
}

/// Linear distance fog: no fog before `near`, solid `color` from `far` on.
#[derive(Debug, Clone, Copy)]
pub struct Fog {
    pub color: Rgb,
    pub near: f32,
    pub far: f32,
}

impl Default for Fog {
    fn default() -> Self {
        Self {
            color: SKY_COLOR,
            near: 10.0,
            far: 100.0,
        }
    }
}

impl Fog {
    /// Packed for the shader: eye position, fog color, then near and far.
    pub(crate) fn pack(&self, eye: Vec3) -> [[f32; 4]; 3] {
        [
            [eye.x, eye.y, eye.z, 1.0],
            self.color.to_rgba_f32(),
            [self.near, self.far.max(self.near + f32::EPSILON), 0.0, 0.0],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_projection_is_valid() {
        let p = Projection::default();
        assert!((p.fov - 75.0_f32.to_radians()).abs() < 1e-6);
        let vp = p.view_projection(&CameraPose::default());
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn target_projects_to_screen_center() {
        let pose = CameraPose::looking_at(Vec3::new(5.0, 10.0, 15.0), Vec3::ZERO);
        let clip = Projection::default().view_projection(&pose) * Vec3::ZERO.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-4 && ndc.y.abs() < 1e-4);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn resize_ignores_zero_size() {
        let mut p = Projection::default();
        p.resize(800, 400);
        assert_eq!(p.aspect, 2.0);
        p.resize(0, 400);
        assert_eq!(p.aspect, 2.0);
    }

    #[test]
    fn lighting_pack_normalizes() {
        let packed = Lighting::default().pack();
        let d = Vec3::new(packed[0][0], packed[0][1], packed[0][2]);
        assert!((d.length() - 1.0).abs() < 1e-5);
        assert_eq!(packed[0][3], 0.6);
        assert_eq!(packed[1][0], 0.8);
    }

    #[test]
    fn fog_pack_carries_eye_color_and_range() {
        let eye = Vec3::new(5.0, 10.0, 15.0);
        let packed = Fog::default().pack(eye);
        assert_eq!(packed[0], [5.0, 10.0, 15.0, 1.0]);
        assert_eq!(packed[1], SKY_COLOR.to_rgba_f32());
        assert_eq!(packed[2][0], 10.0);
        assert_eq!(packed[2][1], 100.0);
    }

    #[test]
    fn degenerate_fog_range_stays_ordered() {
        let fog = Fog {
            near: 50.0,
            far: 20.0,
            ..Fog::default()
        };
        let [_, _, range] = fog.pack(Vec3::ZERO);
        assert!(range[1] > range[0]);
    }

    #[test]
    fn sky_is_light_blue() {
        let [r, g, b, a] = SKY_COLOR.to_rgba_f32();
        assert!(b > g && g > r);
        assert_eq!(a, 1.0);
    }
}
