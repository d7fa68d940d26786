//! Entity & component store.
//!
//! - `Component` / `ComponentKind`: the closed set of components the rules
//!   touch
//! - `ComponentData`: typed view of a single variant
//! - `ComponentStore`: host capability for component access
//! - `EntityStore`: in-memory store
//! - `AttackCapability`: derived from an entity's held item

mod capability;
mod component;
mod store;

pub use capability::AttackCapability;
pub use component::{
    AuthorizedWeapon, BlockItem, Component, ComponentData, ComponentKind, FlagCarryState,
    HeldItem, Location, PlayerCharacter, TeamTag, VisualMarker,
};
pub use store::{ComponentStore, ComponentStoreExt, EntityStore};
