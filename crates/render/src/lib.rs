//! Rendering Adapter: the world's render surface and ray query, backend-agnostic.
//!
//! # Invariants
//! - Renderers read world or scene state; they never mutate world truth.
//! - The scene holds exactly the drawables the world has registered and not released.
//! - Picking treats every drawable as an axis-aligned unit cube around its center.
//!
//! The GPU backend lives in `blockspace-render-wgpu` and draws straight from
//! a [`Scene`].

mod picker;
mod renderer;
mod scene;

pub use picker::CubePicker;
pub use renderer::{DebugTextRenderer, RenderView, Renderer};
pub use scene::{Scene, SceneStats};

#[cfg(test)]
mod tests {
    use super::*;
    use blockspace_common::{BlockType, CameraPose, TerrainConfig, VoxelCoord};
    use blockspace_kernel::{RayQuery, VoxelWorld};

    #[test]
    fn set_get_clear_round_trip_through_scene() {
        let mut world = VoxelWorld::new();
        let mut scene = Scene::new();
        let c = VoxelCoord::new(1, 2, 3);

        world.set(c, BlockType::Stone, &mut scene);
        let entry = world.get(c).copied().unwrap();
        assert_eq!(entry.block, BlockType::Stone);
        assert!(scene.contains(entry.drawable.handle));

        world.set(c, BlockType::Air, &mut scene);
        assert!(world.get(c).is_none());
        assert!(scene.is_empty());
        assert_eq!(scene.stats().removed, 1);
    }

    #[test]
    fn generated_terrain_is_mirrored_and_pickable() {
        let mut world = VoxelWorld::new();
        let mut scene = Scene::new();
        blockspace_terrain::populate(&TerrainConfig::default(), &mut world, &mut scene);
        assert_eq!(scene.len(), world.len());

        let drawables: Vec<_> = scene.drawables().copied().collect();
        let hits = CubePicker.intersect(&CameraPose::default().view_ray(), &drawables);
        assert!(!hits.is_empty());
        assert!(hits.windows(2).all(|w| w[0].distance <= w[1].distance));
    }
}
