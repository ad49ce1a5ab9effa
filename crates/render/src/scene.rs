use blockspace_kernel::{Drawable, DrawableHandle, RenderSurface};
use std::collections::BTreeMap;

/// Running totals of surface traffic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneStats {
    pub added: u64,
    pub removed: u64,
    /// `remove` calls for handles the scene did not hold.
    pub stale_removals: u64,
}

/// The set of live drawables, keyed by handle.
///
/// Every add or remove bumps `revision`, so a GPU backend can skip rebuilding
/// its instance buffer when nothing changed.
#[derive(Debug, Default)]
pub struct Scene {
    drawables: BTreeMap<DrawableHandle, Drawable>,
    revision: u64,
    stats: SceneStats,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.drawables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }

    pub fn get(&self, handle: DrawableHandle) -> Option<&Drawable> {
        self.drawables.get(&handle)
    }

    pub fn contains(&self, handle: DrawableHandle) -> bool {
        self.drawables.contains_key(&handle)
    }

    /// Live drawables in handle order.
    pub fn drawables(&self) -> impl Iterator<Item = &Drawable> + '_ {
        self.drawables.values()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn stats(&self) -> SceneStats {
        self.stats
    }
}

impl RenderSurface for Scene {
    fn add(&mut self, drawable: Drawable) {
        if self.drawables.insert(drawable.handle, drawable).is_some() {
            tracing::warn!(handle = drawable.handle.0, "drawable handle re-added");
        }
        self.stats.added += 1;
        self.revision += 1;
    }

    fn remove(&mut self, handle: DrawableHandle) {
        if self.drawables.remove(&handle).is_some() {
            self.stats.removed += 1;
            self.revision += 1;
        } else {
            tracing::warn!(handle = handle.0, "remove of unknown drawable");
            self.stats.stale_removals += 1;
        }
    }
}
