//! Shared vocabulary for the blockspace workspace.
//!
//! # Invariants
//! - `VoxelCoord` compares and hashes by value.
//! - `BlockType::Air` is the only variant without a color.

pub mod camera;
pub mod config;
pub mod ray;
pub mod types;

pub use camera::CameraPose;
pub use config::{ConfigError, EditorConfig, MotionConfig, TerrainConfig, ViewConfig};
pub use ray::Ray;
pub use types::{BlockType, Face, Rgb, VoxelCoord};
