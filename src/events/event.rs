//! Host events the rules react to.

use serde::{Deserialize, Serialize};

use crate::core::EntityId;

/// Tag identifying a [`GameEvent`] variant. Handlers subscribe by kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// [`GameEvent::Activate`]
    Activate,
    /// [`GameEvent::InventorySlotChanged`]
    InventorySlotChanged,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::Activate => write!(f, "activate"),
            EventKind::InventorySlotChanged => write!(f, "inventory-slot-changed"),
        }
    }
}

/// An event delivered by the host.
///
/// ## Variants
///
/// - `Activate`: `instigator` used its held item on `target` (an attack
///   when the item is an authorized weapon)
/// - `InventorySlotChanged`: one slot of `player`'s inventory went from
///   `old_item` to `new_item`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Activate {
        instigator: EntityId,
        target: EntityId,
    },
    InventorySlotChanged {
        player: EntityId,
        old_item: Option<EntityId>,
        new_item: Option<EntityId>,
    },
}

impl GameEvent {
    /// Create an activation event.
    #[must_use]
    pub const fn activate(instigator: EntityId, target: EntityId) -> Self {
        GameEvent::Activate { instigator, target }
    }

    /// Create a slot change event.
    #[must_use]
    pub const fn slot_changed(player: EntityId, old_item: Option<EntityId>, new_item: Option<EntityId>) -> Self {
        GameEvent::InventorySlotChanged {
            player,
            old_item,
            new_item,
        }
    }

    /// A slot that was empty now holds `item`.
    #[must_use]
    pub const fn item_acquired(player: EntityId, item: EntityId) -> Self {
        Self::slot_changed(player, None, Some(item))
    }

    /// A slot that held `item` is now empty.
    #[must_use]
    pub const fn item_released(player: EntityId, item: EntityId) -> Self {
        Self::slot_changed(player, Some(item), None)
    }

    /// The kind of this event.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            GameEvent::Activate { .. } => EventKind::Activate,
            GameEvent::InventorySlotChanged { .. } => EventKind::InventorySlotChanged,
        }
    }
}
