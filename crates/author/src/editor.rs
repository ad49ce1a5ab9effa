use crate::targeting::{Target, resolve_target};
use blockspace_common::{BlockType, Ray, VoxelCoord};
use blockspace_input::{Action, Interaction};
use blockspace_kernel::{RayQuery, RenderSurface, VoxelWorld};

/// The world change produced by one accepted edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The targeted block was cleared.
    Removed { coord: VoxelCoord, block: BlockType },
    /// The selected block was written next to the targeted one.
    Placed { coord: VoxelCoord, block: BlockType },
}

/// Edit session: the current block selection plus the place/remove protocol.
///
/// Holds no world state of its own. Every call gets the world, the render
/// surface and the ray query it needs.
#[derive(Debug, Clone)]
pub struct Editor {
    current_block: BlockType,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// Create an editor with grass selected.
    pub fn new() -> Self {
        Self {
            current_block: BlockType::Grass,
        }
    }

    pub fn current_block(&self) -> BlockType {
        self.current_block
    }

    /// Select a block by the digit key pressed. Accepts 1 through 5; anything
    /// else (0, 6-9) leaves the selection unchanged. Returns whether it changed.
    pub fn select(&mut self, digit: u8) -> bool {
        let Some(block) = BlockType::from_id(digit).filter(|b| !b.is_air()) else {
            tracing::debug!(digit, "ignored block selection");
            return false;
        };
        self.current_block = block;
        tracing::debug!(%block, "block selected");
        true
    }

    /// UI label for the selection, e.g. `Stone (ID: 3)`.
    pub fn readout(&self) -> String {
        format!(
            "{} (ID: {})",
            self.current_block.name(),
            self.current_block.id()
        )
    }

    /// Handle an action from the input layer.
    ///
    /// `Primary` removes the targeted block, `Secondary` places the current
    /// selection on the targeted face. Both require a live interaction and a
    /// target; otherwise nothing happens. Block selection is always accepted.
    pub fn apply<Q: RayQuery + ?Sized>(
        &mut self,
        action: Action,
        interaction: Interaction,
        ray: &Ray,
        world: &mut VoxelWorld,
        surface: &mut dyn RenderSurface,
        query: &Q,
    ) -> Option<EditOutcome> {
        match action {
            Action::SelectBlock(digit) => {
                self.select(digit);
                None
            }
            Action::Primary | Action::Secondary if interaction.is_live() => {
                let target = resolve_target(ray, world, query)?;
                Some(self.commit(action, target, world, surface))
            }
            _ => None,
        }
    }

    fn commit(
        &self,
        action: Action,
        target: Target,
        world: &mut VoxelWorld,
        surface: &mut dyn RenderSurface,
    ) -> EditOutcome {
        if action == Action::Primary {
            let block = world.block_at(target.hit);
            world.set(target.hit, BlockType::Air, surface);
            tracing::debug!(coord = %target.hit, %block, "block removed");
            EditOutcome::Removed {
                coord: target.hit,
                block,
            }
        } else {
            world.set(target.place, self.current_block, surface);
            tracing::debug!(coord = %target.place, block = %self.current_block, "block placed");
            EditOutcome::Placed {
                coord: target.place,
                block: self.current_block,
            }
        }
    }
}
