//! # rust-ctf
//!
//! Capture-the-flag rules for a voxel game, independent of the host engine.
//!
//! ## Design Principles
//!
//! 1. **Host-Agnostic**: Entities, components, inventories and the world
//!    belong to the host. The rules see them through the
//!    [`ComponentStore`], [`InventoryService`] and [`WorldService`]
//!    capabilities.
//!
//! 2. **Configuration Over Convention**: Teams, flag blocks, bases and
//!    markers come from [`RulesConfig`]. Nothing assumes two teams.
//!
//! 3. **One Writer Per Flag**: Every change to a flag's location and to its
//!    carrier's components goes through the [`FlagStateEngine`], under
//!    that flag's lock.
//!
//! ## Architecture
//!
//! - **Per-Flag Locking**: Transitions of different flags never contend.
//!   At most one entity carries a flag at any instant.
//!
//! - **Deferred Side Effects**: Transitions return [`SideEffectBatch`]es;
//!   host calls happen after the lock is released.
//!
//! - **Persistent History**: Each flag's transitions are kept in an
//!   `im::Vector`, so handing a copy to the host is O(1).
//!
//! ## Modules
//!
//! - `core`: Entity ids, teams, positions, block URIs
//! - `config`: Team configuration and TOML loading
//! - `error`: Config and transition errors
//! - `components`: The closed component set and component storage
//! - `registry`: Team & flag lookup
//! - `host`: Inventory and world capabilities
//! - `effects`: Side-effect requests and dispatch
//! - `flags`: Flag locations and the transition engine
//! - `events`: Host events and the event bus
//! - `rules`: Attack and pickup rules, and the match that wires them up

pub mod core;
pub mod config;
pub mod error;
pub mod components;
pub mod registry;
pub mod host;
pub mod effects;
pub mod flags;
pub mod events;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{BlockPosition, BlockUri, EntityId, MarkerKind, TeamId, Vec3};

pub use crate::config::RulesConfig;

pub use crate::error::{ConfigError, TransitionError};

pub use crate::components::{
    AttackCapability, AuthorizedWeapon, BlockItem, Component, ComponentData, ComponentKind,
    ComponentStore, ComponentStoreExt, EntityStore, FlagCarryState, HeldItem, Location,
    PlayerCharacter, TeamTag, VisualMarker,
};

pub use crate::registry::{TeamDefinition, TeamRegistry};

pub use crate::host::{
    DropRequest, HostContext, InventoryService, MemoryInventory, MemoryWorld, RemoveRequest,
    WorldService,
};

pub use crate::effects::{SideEffect, SideEffectBatch, SideEffectResolver};

pub use crate::flags::{FlagLocation, FlagSnapshot, FlagStateEngine, TransitionCause, TransitionRecord};

pub use crate::events::{EventBus, EventKind, GameEvent, HandlerId};

pub use crate::rules::{AttackRules, FlagGame, IgnoreReason, PickupRules, RuleOutcome};
