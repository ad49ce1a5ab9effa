//! Input: device-independent actions and the state they drive.
//!
//! # Invariants
//! - World logic consumes `Action`s, never raw window events.
//! - Movement flags only change while the interaction is live (walk + captured).

pub mod action;
mod state;

pub use action::{Action, MouseButton, MoveDirection};
pub use state::{InputState, Interaction, ModeKind, MoveFlags};
