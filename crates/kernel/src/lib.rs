//! World Kernel: the authoritative sparse voxel world.
//!
//! # Invariants
//! - Absence means air; no entry ever holds `BlockType::Air`.
//! - Each stored voxel owns exactly one drawable registered with the render surface.
//! - Every mutation, `set` or `release_all`, appends to the event log until drained.

pub mod surface;
pub mod world;

pub use surface::{Drawable, DrawableHandle, RayHit, RayQuery, RenderSurface};
pub use world::{VoxelEntry, VoxelWorld, WorldEvent};
