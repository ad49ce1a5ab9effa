use blockspace_common::{Face, Ray, VoxelCoord};
use blockspace_kernel::{Drawable, RayQuery, VoxelWorld};
use glam::IVec3;

/// The voxel a ray points at and the empty cell in front of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    /// The struck voxel; removing clears this cell.
    pub hit: VoxelCoord,
    /// Face the ray entered through.
    pub face: Face,
    /// The neighbour across `face`; placing writes this cell.
    pub place: VoxelCoord,
    /// Ray parameter of the hit.
    pub distance: f32,
}

impl Target {
    pub fn normal(&self) -> IVec3 {
        self.face.normal()
    }
}

/// Find the nearest voxel along `ray`, if any.
///
/// Cost is linear in the number of stored voxels.
pub fn resolve_target<Q: RayQuery + ?Sized>(
    ray: &Ray,
    world: &VoxelWorld,
    query: &Q,
) -> Option<Target> {
    let drawables: Vec<Drawable> = world.drawables().copied().collect();
    let nearest = query
        .intersect(ray, &drawables)
        .into_iter()
        .min_by(|a, b| a.distance.total_cmp(&b.distance))?;

    // drawables sit on integer centers, so rounding recovers the exact cell
    let hit = VoxelCoord::from_position(nearest.drawable.position);
    Some(Target {
        hit,
        face: nearest.face,
        place: hit.adjacent(nearest.face),
        distance: nearest.distance,
    })
}
