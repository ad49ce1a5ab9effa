use crate::surface::{Drawable, DrawableHandle, RenderSurface};
use blockspace_common::{BlockType, VoxelCoord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An event record produced by every mutation to the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorldEvent {
    /// A block was written. `replaced` holds the block it overwrote, if any.
    Placed {
        coord: VoxelCoord,
        block: BlockType,
        replaced: Option<BlockType>,
    },
    /// A block was cleared to air.
    Removed { coord: VoxelCoord, block: BlockType },
}

/// A stored voxel: its block type and the drawable that shows it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoxelEntry {
    pub block: BlockType,
    pub drawable: Drawable,
}

/// The authoritative voxel world.
///
/// Sparse: only non-air cells are stored, keyed by coordinate. The world owns
/// one drawable per stored cell and keeps the render surface in sync on every
/// write, releasing the old drawable before registering a replacement.
#[derive(Debug, Default)]
pub struct VoxelWorld {
    voxels: HashMap<VoxelCoord, VoxelEntry>,
    next_handle: u64,
    /// Append-only event log of all mutations.
    event_log: Vec<WorldEvent>,
}

impl VoxelWorld {
    /// Create an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored (non-air) voxels.
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// Look up the entry at `coord`. `None` means air.
    pub fn get(&self, coord: VoxelCoord) -> Option<&VoxelEntry> {
        self.voxels.get(&coord)
    }

    /// Block type at `coord`, `Air` when nothing is stored.
    pub fn block_at(&self, coord: VoxelCoord) -> BlockType {
        self.get(coord).map_or(BlockType::Air, |e| e.block)
    }

    pub fn is_solid(&self, coord: VoxelCoord) -> bool {
        self.voxels.contains_key(&coord)
    }

    /// Write `block` at `coord`.
    ///
    /// Air clears the cell (a no-op when already empty). Any other block
    /// replaces what was there, including an identical block, with a freshly
    /// minted drawable.
    pub fn set(&mut self, coord: VoxelCoord, block: BlockType, surface: &mut dyn RenderSurface) {
        let previous = self.voxels.remove(&coord);
        if let Some(old) = &previous {
            surface.remove(old.drawable.handle);
        }

        let Some(color) = block.color() else {
            if let Some(old) = previous {
                tracing::trace!(%coord, block = %old.block, "voxel removed");
                self.event_log.push(WorldEvent::Removed {
                    coord,
                    block: old.block,
                });
            }
            return;
        };

        let drawable = Drawable {
            handle: self.mint_handle(),
            position: coord.center(),
            color,
        };
        surface.add(drawable);
        self.voxels.insert(coord, VoxelEntry { block, drawable });
        tracing::trace!(%coord, %block, "voxel placed");
        self.event_log.push(WorldEvent::Placed {
            coord,
            block,
            replaced: previous.map(|e| e.block),
        });
    }

    /// Write a block by numeric id. Unknown ids clear the cell, like air.
    pub fn set_id(&mut self, coord: VoxelCoord, id: u8, surface: &mut dyn RenderSurface) {
        let block = BlockType::from_id(id).unwrap_or(BlockType::Air);
        self.set(coord, block, surface);
    }

    /// All live drawables, in no particular order.
    pub fn drawables(&self) -> impl Iterator<Item = &Drawable> + '_ {
        self.voxels.values().map(|e| &e.drawable)
    }

    /// All stored voxels sorted by coordinate.
    pub fn iter(&self) -> impl Iterator<Item = (VoxelCoord, BlockType)> + use<> {
        let mut cells: Vec<(VoxelCoord, BlockType)> =
            self.voxels.iter().map(|(c, e)| (*c, e.block)).collect();
        cells.sort_unstable_by_key(|(c, _)| *c);
        cells.into_iter()
    }

    /// Release every drawable and empty the world, logging one `Removed`
    /// event per voxel in coordinate order.
    pub fn release_all(&mut self, surface: &mut dyn RenderSurface) {
        let mut entries: Vec<(VoxelCoord, VoxelEntry)> = self.voxels.drain().collect();
        entries.sort_unstable_by_key(|(c, _)| *c);
        for (coord, entry) in entries {
            surface.remove(entry.drawable.handle);
            self.event_log.push(WorldEvent::Removed {
                coord,
                block: entry.block,
            });
        }
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[WorldEvent] {
        &self.event_log
    }

    /// Deterministic hash of the (coordinate -> block) mapping.
    ///
    /// Drawable handles are not part of the state, so two worlds holding the
    /// same blocks hash equal regardless of how they got there.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        for (coord, block) in self.iter() {
            mix(&mut h, &coord.x.to_le_bytes());
            mix(&mut h, &coord.y.to_le_bytes());
            mix(&mut h, &coord.z.to_le_bytes());
            mix(&mut h, &[block.id()]);
        }
        h
    }

    fn mint_handle(&mut self) -> DrawableHandle {
        let handle = DrawableHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }
}
