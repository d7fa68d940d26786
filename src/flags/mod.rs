//! Flag state.
//!
//! - `FlagLocation`: at base, carried, or dropped
//! - `FlagStateEngine`: the per-flag state machine and sole writer of
//!   carry state and markers
//! - `TransitionRecord`: one committed transition, kept in per-flag history

mod engine;
mod location;

pub use engine::FlagStateEngine;
pub use location::{FlagLocation, FlagSnapshot, TransitionCause, TransitionRecord};
