//! Motion: the camera controllers and the mode that owns exactly one of them.
//!
//! # Invariants
//! - One tick per rendered frame; the tick finishes before the frame is drawn.
//! - The walk controller moves nothing unless the interaction is live.
//! - Switching modes replaces the controller; the inactive one does not exist.

mod mode;
mod orbit;
mod walk;

pub use mode::{CameraRig, ControlMode};
pub use orbit::OrbitController;
pub use walk::{EYE_HEIGHT, FEET_OFFSET, WalkController};
