//! Tunables for the editor, loadable from YAML.
//!
//! Every section defaults field-by-field, so a file only needs the values it
//! overrides.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors from loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Largest accepted `terrain.half_width`. The slab holds `(2r + 1)^2` columns.
pub const MAX_HALF_WIDTH: i32 = 256;

/// Procedural terrain parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Height of the grass layer.
    pub ground_height: i32,
    /// Half-width of the square ground slab, centered on the origin.
    pub half_width: i32,
    /// Horizontal (x, z) position of the tree trunk.
    pub tree_offset: [i32; 2],
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            ground_height: 0,
            half_width: 20,
            tree_offset: [3, 3],
        }
    }
}

/// Walk-mode integrator constants, in blocks per tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub speed: f32,
    /// Added to the vertical velocity every tick. Negative pulls down.
    pub gravity: f32,
    pub jump_force: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            speed: 0.1,
            gravity: -0.002,
            jump_force: 0.15,
        }
    }
}

/// Camera and pointer settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub eye: Vec3,
    /// Orbit pivot, also the initial look-at point.
    pub target: Vec3,
    pub fov_degrees: f32,
    /// Radians of rotation per pixel of mouse motion.
    pub mouse_sensitivity: f32,
    /// Fraction of orbit angular velocity shed per tick.
    pub orbit_damping: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            eye: Vec3::new(5.0, 10.0, 15.0),
            target: Vec3::ZERO,
            fov_degrees: 75.0,
            mouse_sensitivity: 0.002,
            orbit_damping: 0.05,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub terrain: TerrainConfig,
    pub motion: MotionConfig,
    pub view: ViewConfig,
}

impl EditorConfig {
    /// Parse a YAML document. Missing fields take their defaults.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, or return defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::from_yaml_str(&std::fs::read_to_string(p)?),
            None => Ok(Self::default()),
        }
    }

    /// Check value ranges. Called by the loaders; call again after overriding fields.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0..=MAX_HALF_WIDTH).contains(&self.terrain.half_width) {
            return Err(ConfigError::Invalid(format!(
                "terrain.half_width must be within [0, {MAX_HALF_WIDTH}], got {}",
                self.terrain.half_width
            )));
        }
        if !(0.0..=1.0).contains(&self.view.orbit_damping) {
            return Err(ConfigError::Invalid(format!(
                "view.orbit_damping must be within [0, 1], got {}",
                self.view.orbit_damping
            )));
        }
        if !(1.0..180.0).contains(&self.view.fov_degrees) {
            return Err(ConfigError::Invalid(format!(
                "view.fov_degrees must be within [1, 180), got {}",
                self.view.fov_degrees
            )));
        }
        Ok(())
    }
}
