use blockspace_common::{BlockType, TerrainConfig, VoxelCoord};
use std::collections::BTreeMap;

/// Radius of the stone hill's first layer, in the x-z plane.
const HILL_RADIUS: f64 = 5.0;
/// Radius of the hill's second layer.
const PEAK_RADIUS: f64 = 3.0;
const TRUNK_HEIGHT: i32 = 3;

/// One write of the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub coord: VoxelCoord,
    pub block: BlockType,
}

impl Placement {
    fn new(x: i32, y: i32, z: i32, block: BlockType) -> Self {
        Self {
            coord: VoxelCoord::new(x, y, z),
            block,
        }
    }
}

/// The full write sequence for `config`, in application order.
///
/// The sequence may touch a cell more than once; the later write wins. With
/// the default config the trunk base replaces a hill stone.
pub fn plan(config: &TerrainConfig) -> Vec<Placement> {
    let mut out = Vec::new();
    ground(config, &mut out);
    tree(config, &mut out);
    out
}

/// The final (coordinate -> block) mapping the plan produces.
pub fn resolve(config: &TerrainConfig) -> BTreeMap<VoxelCoord, BlockType> {
    let mut map = BTreeMap::new();
    for p in plan(config) {
        if p.block.is_air() {
            map.remove(&p.coord);
        } else {
            map.insert(p.coord, p.block);
        }
    }
    map
}

fn ground(config: &TerrainConfig, out: &mut Vec<Placement>) {
    let gh = config.ground_height;
    let r = config.half_width;
    for x in -r..=r {
        for z in -r..=r {
            out.push(Placement::new(x, gh - 1, z, BlockType::Dirt));
            out.push(Placement::new(x, gh, z, BlockType::Grass));

            let dist = column_distance(x, z);
            if dist < HILL_RADIUS {
                out.push(Placement::new(x, gh + 1, z, BlockType::Stone));
            }
            if dist < PEAK_RADIUS {
                out.push(Placement::new(x, gh + 2, z, BlockType::Stone));
            }
        }
    }
}

/// Euclidean x-z distance of a column from the origin, computed in `f64` so
/// no `i32` pair can overflow. Exact on the hill radii.
fn column_distance(x: i32, z: i32) -> f64 {
    let (x, z) = (f64::from(x), f64::from(z));
    (x * x + z * z).sqrt()
}

fn tree(config: &TerrainConfig, out: &mut Vec<Placement>) {
    let gh = config.ground_height;
    let [tx, tz] = config.tree_offset;
    for dy in 1..=TRUNK_HEIGHT {
        out.push(Placement::new(tx, gh + dy, tz, BlockType::Wood));
    }

    // 3x3x2 canopy starting at the trunk top, hollow where the trunk runs.
    let canopy_base = gh + TRUNK_HEIGHT;
    for dx in -1..=1 {
        for dz in -1..=1 {
            for dy in 0..=2 {
                if dx == 0 && dz == 0 && dy < 2 {
                    continue;
                }
                out.push(Placement::new(
                    tx + dx,
                    canopy_base + dy,
                    tz + dz,
                    BlockType::Leaves,
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(map: &BTreeMap<VoxelCoord, BlockType>, block: BlockType) -> usize {
        map.values().filter(|b| **b == block).count()
    }

    #[test]
    fn default_world_shape() {
        let map = resolve(&TerrainConfig::default());
        assert_eq!(map.len(), 3483);
        assert_eq!(count(&map, BlockType::Dirt), 41 * 41);
        assert_eq!(count(&map, BlockType::Grass), 41 * 41);
        assert_eq!(count(&map, BlockType::Stone), 93);
        assert_eq!(count(&map, BlockType::Wood), 3);
        assert_eq!(count(&map, BlockType::Leaves), 25);
    }

    #[test]
    fn layers_sit_at_ground_height() {
        let config = TerrainConfig {
            ground_height: 7,
            half_width: 2,
            tree_offset: [10, 10],
        };
        let map = resolve(&config);
        assert_eq!(map[&VoxelCoord::new(2, 6, -2)], BlockType::Dirt);
        assert_eq!(map[&VoxelCoord::new(2, 7, -2)], BlockType::Grass);
        assert_eq!(map[&VoxelCoord::new(0, 8, 0)], BlockType::Stone);
        assert_eq!(map[&VoxelCoord::new(0, 9, 0)], BlockType::Stone);
        assert!(!map.contains_key(&VoxelCoord::new(3, 7, 0)));
    }

    #[test]
    fn hill_uses_strict_euclidean_radius() {
        let map = resolve(&TerrainConfig::default());
        // (3, 4) is exactly 5 away: excluded from the first layer
        assert!(!map.contains_key(&VoxelCoord::new(3, 1, 4)));
        assert_eq!(map[&VoxelCoord::new(2, 1, 4)], BlockType::Stone);
        // (2, 2) is ~2.83 away: inside the peak
        assert_eq!(map[&VoxelCoord::new(2, 2, 2)], BlockType::Stone);
        // (0, 3) is exactly 3 away: excluded from the peak
        assert!(!map.contains_key(&VoxelCoord::new(0, 2, 3)));
    }

    #[test]
    fn trunk_overwrites_hill_stone() {
        let config = TerrainConfig::default();
        let trunk_base = VoxelCoord::new(3, 1, 3);
        let writes: Vec<BlockType> = plan(&config)
            .into_iter()
            .filter(|p| p.coord == trunk_base)
            .map(|p| p.block)
            .collect();
        assert_eq!(writes, vec![BlockType::Stone, BlockType::Wood]);
        assert_eq!(resolve(&config)[&trunk_base], BlockType::Wood);
    }

    #[test]
    fn canopy_leaves_trunk_clear() {
        let map = resolve(&TerrainConfig::default());
        assert_eq!(map[&VoxelCoord::new(3, 3, 3)], BlockType::Wood);
        assert!(!map.contains_key(&VoxelCoord::new(3, 4, 3)));
        assert_eq!(map[&VoxelCoord::new(3, 5, 3)], BlockType::Leaves);
        assert_eq!(map[&VoxelCoord::new(2, 3, 4)], BlockType::Leaves);
        assert_eq!(map[&VoxelCoord::new(4, 5, 2)], BlockType::Leaves);
    }

    #[test]
    fn plan_is_deterministic() {
        let config = TerrainConfig::default();
        assert_eq!(plan(&config), plan(&config));
        assert_eq!(resolve(&config), resolve(&config));
    }

    #[test]
    fn column_distance_handles_large_coordinates() {
        assert_eq!(column_distance(3, -4), 5.0);
        assert_eq!(column_distance(46_341, 0), 46_341.0);
        let far = column_distance(46_341, 46_341);
        assert!((far - 46_341.0 * 2f64.sqrt()).abs() < 1e-6);
        assert!(column_distance(i32::MIN, i32::MIN).is_finite());
    }

    #[test]
    fn zero_half_width_still_has_tree() {
        let config = TerrainConfig {
            half_width: 0,
            ..TerrainConfig::default()
        };
        let map = resolve(&config);
        assert_eq!(count(&map, BlockType::Grass), 1);
        assert_eq!(count(&map, BlockType::Stone), 2);
        assert_eq!(count(&map, BlockType::Wood), 3);
    }
}
