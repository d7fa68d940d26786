//! Entity identification.
//!
//! Every host object the rules care about (player characters, held
//! weapons, flag items) is referred to by an opaque `EntityId` handle.
//! The host owns entity lifetime; the rule engine only stores handles.
//!
//! ```
//! use rust_ctf::core::EntityId;
//!
//! let player = EntityId::new(7);
//! assert_eq!(player.raw(), 7);
//! assert_eq!(format!("{}", player), "Entity(7)");
//! ```

use serde::{Deserialize, Serialize};

/// Opaque handle to a host entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Create an entity handle from a raw host id.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}
