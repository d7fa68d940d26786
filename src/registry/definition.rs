//! Team definitions - static team data.
//!
//! A `TeamDefinition` holds everything the rules need to know about a team:
//! its flag's block family, where that flag lives when idle, and which
//! marker decorates an enemy carrying it.

use serde::{Deserialize, Serialize};

use crate::core::{BlockPosition, BlockUri, MarkerKind, TeamId};

/// Static team definition.
///
/// ## Example
///
/// ```
/// use rust_ctf::core::{BlockPosition, MarkerKind, TeamId};
/// use rust_ctf::registry::TeamDefinition;
///
/// let red = TeamDefinition::new(TeamId::new(0), "red", "LightAndShadowResources:redFlag")
///     .with_base(BlockPosition::new(30, 23, 0))
///     .with_marker(MarkerKind::Hearts);
///
/// assert_eq!(red.flag_block.name(), "redFlag");
/// assert_eq!(red.marker, MarkerKind::Hearts);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamDefinition {
    /// Unique team identifier.
    pub id: TeamId,

    /// Team name (for display/debugging).
    pub name: String,

    /// Block family of this team's flag. Doubles as the flag identity.
    pub flag_block: BlockUri,

    /// Where the flag block sits while the flag is at base.
    pub base_location: BlockPosition,

    /// Marker attached to an enemy carrying this team's flag.
    pub marker: MarkerKind,
}

impl TeamDefinition {
    /// Create a team with its base at the origin and a hearts marker.
    #[must_use]
    pub fn new(id: TeamId, name: impl Into<String>, flag_block: impl Into<BlockUri>) -> Self {
        Self {
            id,
            name: name.into(),
            flag_block: flag_block.into(),
            base_location: BlockPosition::default(),
            marker: MarkerKind::Hearts,
        }
    }

    /// Set the base location (builder pattern).
    #[must_use]
    pub fn with_base(mut self, base: BlockPosition) -> Self {
        self.base_location = base;
        self
    }

    /// Set the carrier marker (builder pattern).
    #[must_use]
    pub fn with_marker(mut self, marker: MarkerKind) -> Self {
        self.marker = marker;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let black = TeamDefinition::new(TeamId::new(1), "black", "LightAndShadowResources:blackFlag")
            .with_base(BlockPosition::new(-30, 23, 0))
            .with_marker(MarkerKind::Spades);

        assert_eq!(black.id, TeamId::new(1));
        assert_eq!(black.name, "black");
        assert_eq!(black.base_location, BlockPosition::new(-30, 23, 0));
        assert_eq!(black.marker, MarkerKind::Spades);
    }

    #[test]
    fn test_defaults() {
        let team = TeamDefinition::new(TeamId::new(0), "plain", String::from("Core:flag"));
        assert_eq!(team.base_location, BlockPosition::default());
        assert_eq!(team.marker, MarkerKind::Hearts);
    }
}
