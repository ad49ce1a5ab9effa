//! In-World Authoring: turning a camera ray into block edits.
//!
//! # Invariants
//! - Targeting runs only on a user edit action, never per frame.
//! - Edits happen only while the interaction is live (walk mode, pointer captured).
//! - A missing target is a silent no-op.

mod editor;
mod targeting;

pub use editor::{EditOutcome, Editor};
pub use targeting::{Target, resolve_target};
