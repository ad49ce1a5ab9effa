use blockspace_common::{BlockType, CameraPose};
use blockspace_kernel::VoxelWorld;
use glam::Vec3;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Unit view direction.
    pub forward: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self::from_pose(&CameraPose::default(), 75.0)
    }
}

impl RenderView {
    pub fn from_pose(pose: &CameraPose, fov_degrees: f32) -> Self {
        Self {
            eye: pose.position,
            forward: pose.forward(),
            fov_degrees,
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads world state and a view configuration, then produces
/// output. It never mutates the world; world truth is kernel-owned.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given world state and view.
    fn render(&self, world: &VoxelWorld, view: &RenderView) -> Self::Output;
}

/// Human-readable dump of the world, for the CLI, logs and tests.
#[derive(Debug)]
pub struct DebugTextRenderer {
    /// Voxel lines printed before the listing is cut short.
    pub max_lines: usize,
}

impl Default for DebugTextRenderer {
    fn default() -> Self {
        Self { max_lines: 32 }
    }
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, world: &VoxelWorld, view: &RenderView) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "=== Voxel World ({} voxels) ===", world.len());
        let _ = writeln!(
            out,
            "Camera: eye=({:.1}, {:.1}, {:.1}) dir=({:.2}, {:.2}, {:.2}) fov={:.0}",
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.forward.x,
            view.forward.y,
            view.forward.z,
            view.fov_degrees
        );

        let mut counts: BTreeMap<BlockType, usize> = BTreeMap::new();
        for (_, block) in world.iter() {
            *counts.entry(block).or_default() += 1;
        }
        for (block, n) in &counts {
            let _ = writeln!(out, "  {block:<7} x{n}");
        }

        for (coord, block) in world.iter().take(self.max_lines) {
            let _ = writeln!(out, "  {coord} {block}");
        }
        if world.len() > self.max_lines {
            let _ = writeln!(out, "  ... {} more", world.len() - self.max_lines);
        }

        out
    }
}
