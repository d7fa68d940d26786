//! Team & flag registry.
//!
//! - `TeamDefinition`: static data for one team (flag block, base, marker)
//! - `TeamRegistry`: lookup by team id or by flag identity
//!
//! The registry is built once per match and passed by reference to the
//! rule evaluators. It is never mutated during play.

mod definition;
#[allow(clippy::module_inception)]
mod registry;

pub use definition::TeamDefinition;
pub use registry::TeamRegistry;
