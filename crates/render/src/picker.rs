use blockspace_common::{Face, Ray};
use blockspace_kernel::{Drawable, RayHit, RayQuery};
use glam::Vec3;

/// Half the edge length of a voxel cube.
const HALF_EXTENT: f32 = 0.5;

/// Ray query over unit cubes, using the slab test per drawable.
///
/// Only front faces are hit: a ray starting inside a cube does not report it.
#[derive(Debug, Clone, Copy, Default)]
pub struct CubePicker;

impl RayQuery for CubePicker {
    fn intersect(&self, ray: &Ray, drawables: &[Drawable]) -> Vec<RayHit> {
        let mut hits: Vec<RayHit> = drawables
            .iter()
            .filter_map(|d| {
                let (distance, face) = intersect_cube(ray, d.position)?;
                Some(RayHit {
                    distance,
                    point: ray.at(distance),
                    face,
                    drawable: *d,
                })
            })
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}

/// Entry distance and entry face of `ray` against the cube centered at `center`.
fn intersect_cube(ray: &Ray, center: Vec3) -> Option<(f32, Face)> {
    let min = center - Vec3::splat(HALF_EXTENT);
    let max = center + Vec3::splat(HALF_EXTENT);

    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;
    let mut entry_axis = None;

    for axis in 0..3 {
        let origin = ray.origin[axis];
        let dir = ray.direction[axis];
        if dir.abs() < f32::EPSILON {
            // parallel to this slab
            if origin < min[axis] || origin > max[axis] {
                return None;
            }
            continue;
        }
        let inv = 1.0 / dir;
        let mut t0 = (min[axis] - origin) * inv;
        let mut t1 = (max[axis] - origin) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        if t0 > t_near {
            t_near = t0;
            entry_axis = Some(axis);
        }
        t_far = t_far.min(t1);
        if t_near > t_far {
            return None;
        }
    }

    if t_near < 0.0 {
        return None;
    }
    let axis = entry_axis?;
    // moving towards -axis means entering through the positive face
    let face = Face::from_axis(axis, ray.direction[axis] < 0.0)?;
    Some((t_near, face))
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockspace_common::Rgb;
    use blockspace_kernel::DrawableHandle;

    fn cube(handle: u64, x: f32, y: f32, z: f32) -> Drawable {
        Drawable {
            handle: DrawableHandle(handle),
            position: Vec3::new(x, y, z),
            color: Rgb(0x808080),
        }
    }

    #[test]
    fn head_on_hit_reports_front_face() {
        let ray = Ray::towards(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        let hits = CubePicker.intersect(&ray, &[cube(1, 0.0, 0.0, 0.0)]);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].face, Face::PosZ);
        assert!((hits[0].distance - 4.5).abs() < 1e-5);
        assert!((hits[0].point - Vec3::new(0.0, 0.0, 0.5)).length() < 1e-5);
    }

    #[test]
    fn every_face_is_reachable() {
        let cases = [
            (Vec3::new(5.0, 0.0, 0.0), Face::PosX),
            (Vec3::new(-5.0, 0.0, 0.0), Face::NegX),
            (Vec3::new(0.0, 5.0, 0.0), Face::PosY),
            (Vec3::new(0.0, -5.0, 0.0), Face::NegY),
            (Vec3::new(0.0, 0.0, 5.0), Face::PosZ),
            (Vec3::new(0.0, 0.0, -5.0), Face::NegZ),
        ];
        for (origin, face) in cases {
            let ray = Ray::towards(origin, Vec3::ZERO);
            let hits = CubePicker.intersect(&ray, &[cube(1, 0.0, 0.0, 0.0)]);
            assert_eq!(hits[0].face, face, "from {origin}");
        }
    }

    #[test]
    fn hits_sorted_nearest_first() {
        let ray = Ray::new(Vec3::new(-10.0, 0.0, 0.0), Vec3::X);
        let drawables = [
            cube(1, 3.0, 0.0, 0.0),
            cube(2, -2.0, 0.0, 0.0),
            cube(3, 0.0, 0.0, 0.0),
        ];
        let hits = CubePicker.intersect(&ray, &drawables);
        let order: Vec<u64> = hits.iter().map(|h| h.drawable.handle.0).collect();
        assert_eq!(order, vec![2, 3, 1]);
    }

    #[test]
    fn oblique_ray_enters_through_first_slab() {
        // steep downward ray lands on the top face
        let ray = Ray::towards(Vec3::new(0.3, 5.0, 1.0), Vec3::new(0.0, 0.0, 0.0));
        let hits = CubePicker.intersect(&ray, &[cube(1, 0.0, 0.0, 0.0)]);
        assert_eq!(hits[0].face, Face::PosY);
    }

    #[test]
    fn behind_origin_and_misses_are_skipped() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        assert!(CubePicker.intersect(&ray, &[cube(1, 0.0, 0.0, 0.0)]).is_empty());

        let ray = Ray::new(Vec3::new(0.0, 2.0, 5.0), Vec3::NEG_Z);
        assert!(CubePicker.intersect(&ray, &[cube(1, 0.0, 0.0, 0.0)]).is_empty());
    }

    #[test]
    fn origin_inside_cube_is_not_a_hit() {
        let ray = Ray::new(Vec3::new(0.1, 0.1, 0.1), Vec3::X);
        assert!(CubePicker.intersect(&ray, &[cube(1, 0.0, 0.0, 0.0)]).is_empty());
    }

    #[test]
    fn zero_direction_hits_nothing() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        assert!(CubePicker.intersect(&ray, &[cube(1, 0.0, 0.0, 0.0)]).is_empty());
    }
}
