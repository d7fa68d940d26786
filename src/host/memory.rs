//! In-memory collaborators.
//!
//! Minimal inventory and world implementations that record every request.
//! Useful for tests and for hosts that keep their own state elsewhere and
//! only want the request log.

use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashMap;

use crate::core::{BlockPosition, BlockUri, EntityId};

use super::services::{DropRequest, InventoryService, RemoveRequest, WorldService};

/// Slot count given to an inventory created implicitly by [`MemoryInventory::give`].
pub const DEFAULT_SLOTS: usize = 10;

/// Slot-based inventory that records drop and removal requests.
///
/// ```
/// use rust_ctf::core::EntityId;
/// use rust_ctf::host::{InventoryService, MemoryInventory};
///
/// let inventory = MemoryInventory::new();
/// let player = EntityId::new(1);
/// let flag = EntityId::new(50);
///
/// assert_eq!(inventory.give(player, flag), Some(0));
/// assert_eq!(inventory.item_in_slot(player, 0), Some(flag));
/// assert_eq!(inventory.count_of(player, flag), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryInventory {
    slots: RwLock<FxHashMap<EntityId, Vec<Option<EntityId>>>>,
    drops: Mutex<Vec<DropRequest>>,
    removals: Mutex<Vec<RemoveRequest>>,
}

impl MemoryInventory {
    /// Create an inventory service with no inventories.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Give `owner` an empty inventory with `count` slots, replacing any
    /// existing one.
    pub fn create(&self, owner: EntityId, count: usize) {
        self.slots.write().insert(owner, vec![None; count]);
    }

    /// Put `item` in the first free slot, creating a [`DEFAULT_SLOTS`]
    /// inventory if `owner` has none. Returns the slot, or `None` if full.
    pub fn give(&self, owner: EntityId, item: EntityId) -> Option<usize> {
        let mut slots = self.slots.write();
        let inventory = slots
            .entry(owner)
            .or_insert_with(|| vec![None; DEFAULT_SLOTS]);
        let slot = inventory.iter().position(Option::is_none)?;
        inventory[slot] = Some(item);
        Some(slot)
    }

    /// Overwrite a slot. Out-of-range slots are ignored.
    pub fn set_slot(&self, owner: EntityId, slot: usize, item: Option<EntityId>) {
        if let Some(entry) = self
            .slots
            .write()
            .get_mut(&owner)
            .and_then(|inventory| inventory.get_mut(slot))
        {
            *entry = item;
        }
    }

    /// Take `item` out of whichever slot holds it. Returns the slot.
    pub fn take(&self, owner: EntityId, item: EntityId) -> Option<usize> {
        let mut slots = self.slots.write();
        let inventory = slots.get_mut(&owner)?;
        let slot = inventory.iter().position(|s| *s == Some(item))?;
        inventory[slot] = None;
        Some(slot)
    }

    /// How many slots of `owner` hold `item`.
    #[must_use]
    pub fn count_of(&self, owner: EntityId, item: EntityId) -> usize {
        self.slots
            .read()
            .get(&owner)
            .map_or(0, |inventory| inventory.iter().filter(|s| **s == Some(item)).count())
    }

    /// Every drop requested so far, in order.
    #[must_use]
    pub fn drops(&self) -> Vec<DropRequest> {
        self.drops.lock().clone()
    }

    /// Every removal requested so far, in order.
    #[must_use]
    pub fn removals(&self) -> Vec<RemoveRequest> {
        self.removals.lock().clone()
    }
}

impl InventoryService for MemoryInventory {
    fn num_slots(&self, owner: EntityId) -> usize {
        self.slots.read().get(&owner).map_or(0, Vec::len)
    }

    fn item_in_slot(&self, owner: EntityId, slot: usize) -> Option<EntityId> {
        self.slots.read().get(&owner)?.get(slot).copied().flatten()
    }

    /// The item leaves the owner's inventory immediately.
    fn request_drop(&self, request: DropRequest) {
        self.take(request.owner, request.item);
        self.drops.lock().push(request);
    }

    fn remove_item(&self, request: RemoveRequest) {
        for _ in 0..request.count {
            if self.take(request.owner, request.item).is_none() {
                break;
            }
        }
        self.removals.lock().push(request);
    }
}

/// Block map that records every placement.
#[derive(Debug, Default)]
pub struct MemoryWorld {
    blocks: RwLock<FxHashMap<BlockPosition, BlockUri>>,
    placements: Mutex<Vec<(BlockPosition, BlockUri)>>,
}

impl MemoryWorld {
    /// Create an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Block currently at `position`.
    #[must_use]
    pub fn block_at(&self, position: BlockPosition) -> Option<BlockUri> {
        self.blocks.read().get(&position).cloned()
    }

    /// Every placement so far, in order.
    #[must_use]
    pub fn placements(&self) -> Vec<(BlockPosition, BlockUri)> {
        self.placements.lock().clone()
    }
}

impl WorldService for MemoryWorld {
    fn set_block(&self, position: BlockPosition, block: &BlockUri) {
        self.blocks.write().insert(position, block.clone());
        self.placements.lock().push((position, block.clone()));
    }
}
