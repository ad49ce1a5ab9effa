//! Developer Tooling: read-only inspection of a voxel world.
//!
//! # Invariants
//! - Tools never mutate the world.
//! - Summaries are deterministic for a given world state.

mod inspector;

pub use inspector::{Bounds, VoxelInfo, WorldInspector, WorldSummary};
