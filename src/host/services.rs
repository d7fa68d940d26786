//! Collaborator capabilities the rules call into.
//!
//! All requests are fire-and-forget: the rules never wait on, or inspect
//! the outcome of, a drop, removal or block placement.

use serde::{Deserialize, Serialize};

use crate::components::ComponentStore;
use crate::core::{BlockPosition, BlockUri, EntityId, Vec3};

/// Request to throw an item out of an inventory into the world.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DropRequest {
    /// Item entity being dropped.
    pub item: EntityId,
    /// Inventory owner.
    pub owner: EntityId,
    /// Direction and strength of the throw.
    pub impulse: Vec3,
    /// Where the item enters the world.
    pub position: Vec3,
}

/// Request to take items out of an inventory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveRequest {
    /// Inventory owner.
    pub owner: EntityId,
    /// Entity responsible for the removal, if any.
    pub instigator: Option<EntityId>,
    /// Item entity to remove.
    pub item: EntityId,
    /// Destroy the item instead of leaving it orphaned.
    pub destroy: bool,
    /// How many to remove.
    pub count: u32,
}

impl RemoveRequest {
    /// Destroy exactly one `item` from `owner`'s inventory.
    #[must_use]
    pub const fn consume_one(owner: EntityId, item: EntityId) -> Self {
        Self {
            owner,
            instigator: None,
            item,
            destroy: true,
            count: 1,
        }
    }
}

/// Host inventory capability.
pub trait InventoryService: Send + Sync {
    /// Number of slots in `owner`'s inventory (0 if it has none).
    fn num_slots(&self, owner: EntityId) -> usize;

    /// Item in a slot, or `None` for an empty or out-of-range slot.
    fn item_in_slot(&self, owner: EntityId, slot: usize) -> Option<EntityId>;

    /// Throw an item into the world.
    fn request_drop(&self, request: DropRequest);

    /// Remove items from an inventory.
    fn remove_item(&self, request: RemoveRequest);
}

/// Host world capability.
pub trait WorldService: Send + Sync {
    /// Place a block.
    fn set_block(&self, position: BlockPosition, block: &BlockUri);
}

/// Everything the rules need from the host for one event.
///
/// Built by the host binding layer and passed by reference; the rules
/// never hold on to it past the event.
#[derive(Clone, Copy)]
pub struct HostContext<'a> {
    /// Component access.
    pub store: &'a dyn ComponentStore,
    /// Inventory access.
    pub inventory: &'a dyn InventoryService,
    /// World access.
    pub world: &'a dyn WorldService,
}

impl<'a> HostContext<'a> {
    /// Bundle the three host capabilities.
    pub fn new(
        store: &'a dyn ComponentStore,
        inventory: &'a dyn InventoryService,
        world: &'a dyn WorldService,
    ) -> Self {
        Self {
            store,
            inventory,
            world,
        }
    }

    /// Iterate over the non-empty slots of `owner`'s inventory.
    pub fn items_of(&self, owner: EntityId) -> impl Iterator<Item = EntityId> + 'a {
        let inventory = self.inventory;
        (0..inventory.num_slots(owner)).filter_map(move |slot| inventory.item_in_slot(owner, slot))
    }
}

impl std::fmt::Debug for HostContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostContext").finish_non_exhaustive()
    }
}
