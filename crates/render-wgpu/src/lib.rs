//! wgpu render backend for the voxel editor.
//!
//! Draws every drawable in a `Scene` as an instanced unit cube in its block
//! color, lit by one directional light plus ambient and faded into sky-blue
//! distance fog, over a sky-blue clear.
//!
//! # Invariants
//! - Renderer never mutates world or scene state.
//! - Instance data is rebuilt only when the scene revision changes.

mod camera;
mod gpu;
mod shaders;

pub use camera::{Projection, SKY_COLOR};
pub use gpu::WgpuRenderer;
