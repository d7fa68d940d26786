//! Flag location states and transition records.

use serde::{Deserialize, Serialize};

use crate::core::{BlockPosition, EntityId, TeamId, Vec3};

/// Where a flag is. Exactly one holds at any instant.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum FlagLocation {
    /// Placed as a block at its base.
    AtBase { position: BlockPosition },
    /// In a player's inventory.
    Carried { by: EntityId },
    /// Lying in the world as an item.
    Dropped { at: Vec3 },
}

impl FlagLocation {
    /// The carrier, if the flag is carried.
    #[must_use]
    pub fn carrier(&self) -> Option<EntityId> {
        match self {
            FlagLocation::Carried { by } => Some(*by),
            _ => None,
        }
    }

    /// Check if the flag is at its base.
    #[must_use]
    pub fn is_at_base(&self) -> bool {
        matches!(self, FlagLocation::AtBase { .. })
    }

    /// Check if the flag lies in the world.
    #[must_use]
    pub fn is_dropped(&self) -> bool {
        matches!(self, FlagLocation::Dropped { .. })
    }
}

impl std::fmt::Display for FlagLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlagLocation::AtBase { position } => write!(f, "at base {}", position),
            FlagLocation::Carried { by } => write!(f, "carried by {}", by),
            FlagLocation::Dropped { at } => write!(f, "dropped at {}", at),
        }
    }
}

/// Why a transition happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitionCause {
    /// An enemy picked the flag up.
    Pickup,
    /// A teammate turned the flag in.
    Return,
    /// The carrier was hit by an authorized weapon.
    AttackDrop,
    /// The carrier threw the flag out of their inventory.
    PlayerDrop,
    /// The carrier picked up a different flag.
    SwapDrop,
    /// The carrier's flag item vanished, so the flag went home.
    MissingItem,
}

/// One committed transition of one flag.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Per-flag sequence number, starting at 1.
    pub sequence: u64,
    pub team: TeamId,
    pub from: FlagLocation,
    pub to: FlagLocation,
    pub cause: TransitionCause,
}

/// Locations of every flag at one instant, ordered by team.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FlagSnapshot {
    pub flags: Vec<(TeamId, FlagLocation)>,
}

impl FlagSnapshot {
    /// Location of one team's flag.
    #[must_use]
    pub fn location(&self, team: TeamId) -> Option<FlagLocation> {
        self.flags
            .iter()
            .find(|(id, _)| *id == team)
            .map(|(_, location)| *location)
    }

    /// Teams whose flag `entity` carries.
    pub fn carried_by(&self, entity: EntityId) -> impl Iterator<Item = TeamId> + '_ {
        self.flags
            .iter()
            .filter(move |(_, location)| location.carrier() == Some(entity))
            .map(|(team, _)| *team)
    }
}
