//! Derived attack capability.

use crate::core::EntityId;

use super::component::{AuthorizedWeapon, HeldItem};
use super::store::{ComponentStore, ComponentStoreExt};

/// Whether an entity may knock a flag loose right now.
///
/// Never stored; recomputed from the entity's held item on every attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackCapability {
    /// Holding an authorized weapon.
    Authorized {
        /// The weapon item.
        weapon: EntityId,
    },
    /// Holding nothing, or an item that is not an authorized weapon.
    Unarmed,
}

impl AttackCapability {
    /// Derive `entity`'s capability from its [`HeldItem`].
    pub fn of<S: ComponentStore + ?Sized>(store: &S, entity: EntityId) -> Self {
        match store.get::<HeldItem>(entity) {
            Some(held) if store.has::<AuthorizedWeapon>(held.item) => {
                AttackCapability::Authorized { weapon: held.item }
            }
            _ => AttackCapability::Unarmed,
        }
    }

    /// True for [`AttackCapability::Authorized`].
    #[must_use]
    pub fn is_authorized(self) -> bool {
        matches!(self, AttackCapability::Authorized { .. })
    }
}
