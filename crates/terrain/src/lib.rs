//! Terrain: deterministic procedural population of a `VoxelWorld`.
//!
//! # Invariants
//! - Output is a pure function of `TerrainConfig`; no randomness, no outside state.
//! - Re-running on a fresh world reproduces the same (coordinate -> block) mapping.

mod generator;

pub use generator::{Placement, plan, resolve};

use blockspace_common::TerrainConfig;
use blockspace_kernel::{RenderSurface, VoxelWorld};

/// Write the generated terrain into `world`, in plan order.
///
/// Cells that already hold blocks are overwritten where the plan touches them.
/// Returns the number of writes performed.
pub fn populate(
    config: &TerrainConfig,
    world: &mut VoxelWorld,
    surface: &mut dyn RenderSurface,
) -> usize {
    let _span = tracing::info_span!("populate_terrain", half_width = config.half_width).entered();
    let placements = plan(config);
    for p in &placements {
        world.set(p.coord, p.block, surface);
    }
    tracing::info!(
        writes = placements.len(),
        voxels = world.len(),
        "terrain generated"
    );
    placements.len()
}
