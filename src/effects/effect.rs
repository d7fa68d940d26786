//! Side-effect requests.
//!
//! The flag state engine never calls the host while it holds a flag lock.
//! Instead every transition returns the requests it implies, and the
//! caller dispatches them once the lock is released.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{BlockPosition, BlockUri};
use crate::host::{DropRequest, RemoveRequest};

/// A request to a host collaborator.
///
/// ## Inventory
///
/// - `DropItem`: throw a flag item into the world (attack drop)
/// - `RemoveItem`: destroy a flag item (return to base)
///
/// ## World
///
/// - `SetBlock`: put a flag block back at its base
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SideEffect {
    /// Drop an item from an inventory.
    DropItem(DropRequest),

    /// Remove an item from an inventory.
    RemoveItem(RemoveRequest),

    /// Place a block.
    SetBlock {
        position: BlockPosition,
        block: BlockUri,
    },
}

impl SideEffect {
    /// Place `block` at `position`.
    pub fn set_block(position: BlockPosition, block: impl Into<BlockUri>) -> Self {
        Self::SetBlock {
            position,
            block: block.into(),
        }
    }
}

/// Requests produced by one transition. Rarely more than two.
pub type SideEffectBatch = SmallVec<[SideEffect; 2]>;
