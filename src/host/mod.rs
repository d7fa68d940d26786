//! Host collaborator interfaces.
//!
//! The rules run inside a host engine that owns entities, inventories and
//! the voxel world. This module defines what the rules need from it:
//!
//! - `InventoryService`: slot queries, drop and removal requests
//! - `WorldService`: block placement
//! - `HostContext`: the capabilities for one event, bundled
//!
//! `MemoryInventory` and `MemoryWorld` are recording implementations.

mod memory;
mod services;

pub use memory::{MemoryInventory, MemoryWorld, DEFAULT_SLOTS};
pub use services::{DropRequest, HostContext, InventoryService, RemoveRequest, WorldService};
