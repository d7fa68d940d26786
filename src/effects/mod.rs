//! Side effects of flag transitions.
//!
//! - `SideEffect`: a single request to the inventory or world collaborator
//! - `SideEffectBatch`: the requests of one transition
//! - `SideEffectResolver`: dispatches batches to a `HostContext`
//!
//! Component changes (carry state, markers) are not side effects: the flag
//! state engine writes those itself, under the flag's lock.

mod effect;
mod resolver;

pub use effect::{SideEffect, SideEffectBatch};
pub use resolver::SideEffectResolver;
