use blockspace_common::{BlockType, Face, VoxelCoord};
use blockspace_kernel::VoxelWorld;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// World inspector for developer tooling.
///
/// Provides read-only queries against the world state for debugging and the
/// editor's side panel.
pub struct WorldInspector;

impl WorldInspector {
    /// Produce a summary of the world state.
    pub fn summary(world: &VoxelWorld) -> WorldSummary {
        let mut per_block = BTreeMap::new();
        let mut bounds: Option<Bounds> = None;
        for (coord, block) in world.iter() {
            *per_block.entry(block).or_insert(0) += 1;
            bounds = Some(match bounds {
                None => Bounds {
                    min: coord,
                    max: coord,
                },
                Some(b) => b.including(coord),
            });
        }
        WorldSummary {
            voxel_count: world.len(),
            per_block,
            bounds,
            pending_events: world.events().len(),
            state_hash: world.state_hash(),
        }
    }

    /// Details of the voxel at `coord`, or `None` for air.
    pub fn inspect_voxel(world: &VoxelWorld, coord: VoxelCoord) -> Option<VoxelInfo> {
        let entry = world.get(coord)?;
        let exposed_faces = Face::ALL
            .into_iter()
            .filter(|&f| !world.is_solid(coord.adjacent(f)))
            .count();
        Some(VoxelInfo {
            coord,
            block: entry.block,
            id: entry.block.id(),
            handle: entry.drawable.handle.0,
            exposed_faces,
        })
    }

    /// Y of the highest solid voxel in column (x, z), if any.
    pub fn surface_height(world: &VoxelWorld, x: i32, z: i32) -> Option<i32> {
        world
            .iter()
            .filter(|(c, _)| c.x == x && c.z == z)
            .map(|(c, _)| c.y)
            .max()
    }
}

/// Axis-aligned extent of the stored voxels, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bounds {
    pub min: VoxelCoord,
    pub max: VoxelCoord,
}

impl Bounds {
    fn including(self, c: VoxelCoord) -> Self {
        Self {
            min: VoxelCoord::new(self.min.x.min(c.x), self.min.y.min(c.y), self.min.z.min(c.z)),
            max: VoxelCoord::new(self.max.x.max(c.x), self.max.y.max(c.y), self.max.z.max(c.z)),
        }
    }
}

/// Summary of world state for the inspector.
#[derive(Debug, Clone, Serialize)]
pub struct WorldSummary {
    pub voxel_count: usize,
    pub per_block: BTreeMap<BlockType, usize>,
    pub bounds: Option<Bounds>,
    pub pending_events: usize,
    pub state_hash: u64,
}

impl fmt::Display for WorldSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "World: voxels={} pending_events={} hash={:016x}",
            self.voxel_count, self.pending_events, self.state_hash
        )?;
        if let Some(b) = self.bounds {
            write!(f, " bounds={}..{}", b.min, b.max)?;
        }
        for (block, n) in &self.per_block {
            write!(f, "\n  {block}: {n}")?;
        }
        Ok(())
    }
}

/// Detailed info about a single voxel.
#[derive(Debug, Clone, Serialize)]
pub struct VoxelInfo {
    pub coord: VoxelCoord,
    pub block: BlockType,
    pub id: u8,
    pub handle: u64,
    /// Faces with air on the other side.
    pub exposed_faces: usize,
}

impl fmt::Display for VoxelInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Voxel {} {} (ID: {}) handle={} exposed_faces={}",
            self.coord, self.block, self.id, self.handle, self.exposed_faces
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockspace_common::TerrainConfig;
    use blockspace_render::Scene;

    fn terrain() -> VoxelWorld {
        let mut world = VoxelWorld::new();
        let mut scene = Scene::new();
        blockspace_terrain::populate(&TerrainConfig::default(), &mut world, &mut scene);
        world
    }

    #[test]
    fn summary_empty_world() {
        let summary = WorldInspector::summary(&VoxelWorld::new());
        assert_eq!(summary.voxel_count, 0);
        assert!(summary.bounds.is_none());
        assert!(summary.per_block.is_empty());
    }

    #[test]
    fn summary_of_default_terrain() {
        let summary = WorldInspector::summary(&terrain());
        assert_eq!(summary.voxel_count, 3483);
        assert_eq!(summary.per_block.get(&BlockType::Grass), Some(&1681));
        assert_eq!(summary.per_block.get(&BlockType::Wood), Some(&3));
        let b = summary.bounds.unwrap();
        assert_eq!(b.min, VoxelCoord::new(-20, -1, -20));
        assert_eq!(b.max.x, 20);
        assert_eq!(summary.pending_events, 3484);
    }

    #[test]
    fn inspect_voxel_counts_exposed_faces() {
        let world = terrain();
        // buried dirt under grass away from hills
        let dirt = WorldInspector::inspect_voxel(&world, VoxelCoord::new(-15, -1, -15)).unwrap();
        assert_eq!(dirt.block, BlockType::Dirt);
        assert_eq!(dirt.exposed_faces, 1);

        let corner = WorldInspector::inspect_voxel(&world, VoxelCoord::new(20, 0, 20)).unwrap();
        assert_eq!(corner.exposed_faces, 3);

        assert!(WorldInspector::inspect_voxel(&world, VoxelCoord::new(0, 50, 0)).is_none());
    }

    #[test]
    fn surface_height_finds_top_of_column() {
        let world = terrain();
        assert_eq!(WorldInspector::surface_height(&world, -15, -15), Some(0));
        assert_eq!(WorldInspector::surface_height(&world, 100, 100), None);
    }

    #[test]
    fn summary_display_and_json() {
        let summary = WorldInspector::summary(&terrain());
        let s = format!("{summary}");
        assert!(s.contains("voxels=3483"));
        assert!(s.contains("Leaves: 25"));

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["voxel_count"], 3483);
        assert_eq!(json["per_block"]["Stone"], 93);
    }
}
