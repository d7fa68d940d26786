//! Core value types: entity handles, teams, positions.
//!
//! These are the vocabulary shared by every other module. They carry no
//! behavior beyond construction, formatting and arithmetic.

pub mod entity;
pub mod position;
pub mod team;

pub use entity::EntityId;
pub use position::{BlockPosition, Vec3};
pub use team::{BlockUri, MarkerKind, TeamId};
