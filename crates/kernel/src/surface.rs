//! Contracts for the collaborators the world talks to.
//!
//! The kernel never draws or intersects geometry itself. It hands drawables to a
//! `RenderSurface` and asks a `RayQuery` which of them a ray strikes.

use blockspace_common::{Face, Ray, Rgb};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Opaque identity of one drawable. Minted by the world, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DrawableHandle(pub u64);

/// A unit cube as the renderer sees it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Drawable {
    pub handle: DrawableHandle,
    /// Cube center. Always an integer lattice point.
    pub position: Vec3,
    pub color: Rgb,
}

/// Accepts and releases drawables. Performs no logic of its own.
pub trait RenderSurface {
    fn add(&mut self, drawable: Drawable);
    fn remove(&mut self, handle: DrawableHandle);
}

/// One ray/drawable intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Ray parameter of the entry point.
    pub distance: f32,
    pub point: Vec3,
    /// Face of the drawable the ray entered through.
    pub face: Face,
    pub drawable: Drawable,
}

/// Intersects a ray with a set of drawables.
pub trait RayQuery {
    /// All intersections, nearest first. Empty when nothing is hit.
    fn intersect(&self, ray: &Ray, drawables: &[Drawable]) -> Vec<RayHit>;
}
