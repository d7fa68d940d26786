//! Team & flag registry.
//!
//! Pure lookup over the teams of a match. Lookups of unknown ids return
//! `None`; callers treat that as "not a flag-related event".

use rustc_hash::FxHashMap;

use crate::config::RulesConfig;
use crate::core::{BlockPosition, BlockUri, MarkerKind, TeamId};
use crate::error::ConfigError;

use super::definition::TeamDefinition;

/// Registry of team definitions, indexed by team and by flag identity.
///
/// ## Example
///
/// ```
/// use rust_ctf::core::{BlockUri, TeamId};
/// use rust_ctf::registry::{TeamDefinition, TeamRegistry};
///
/// let mut registry = TeamRegistry::new();
/// registry
///     .register(TeamDefinition::new(TeamId::new(0), "red", "LightAndShadowResources:redFlag"))
///     .unwrap();
///
/// let flag = BlockUri::new("LightAndShadowResources:redFlag");
/// assert_eq!(registry.team_of(&flag), Some(TeamId::new(0)));
/// assert_eq!(registry.team_of(&BlockUri::new("Core:stone")), None);
/// ```
#[derive(Clone, Debug, Default)]
pub struct TeamRegistry {
    teams: FxHashMap<TeamId, TeamDefinition>,
    by_flag: FxHashMap<BlockUri, TeamId>,
}

impl TeamRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a validated config.
    pub fn from_config(config: &RulesConfig) -> Result<Self, ConfigError> {
        if config.teams.is_empty() {
            return Err(ConfigError::NoTeams);
        }

        let mut registry = Self::new();
        for team in &config.teams {
            registry.register(team.clone())?;
        }
        Ok(registry)
    }

    /// Register a team definition.
    ///
    /// Fails if the team id or the flag block is already taken.
    pub fn register(&mut self, team: TeamDefinition) -> Result<(), ConfigError> {
        if self.teams.contains_key(&team.id) {
            return Err(ConfigError::DuplicateTeam(team.id));
        }
        if self.by_flag.contains_key(&team.flag_block) {
            return Err(ConfigError::DuplicateFlag(team.flag_block));
        }

        self.by_flag.insert(team.flag_block.clone(), team.id);
        self.teams.insert(team.id, team);
        Ok(())
    }

    /// Get a team definition by ID.
    #[must_use]
    pub fn get(&self, team: TeamId) -> Option<&TeamDefinition> {
        self.teams.get(&team)
    }

    /// Flag identity (block family) of a team's flag.
    #[must_use]
    pub fn flag_identity_for(&self, team: TeamId) -> Option<&BlockUri> {
        self.teams.get(&team).map(|t| &t.flag_block)
    }

    /// Base location of a team's flag.
    #[must_use]
    pub fn base_location_for(&self, team: TeamId) -> Option<BlockPosition> {
        self.teams.get(&team).map(|t| t.base_location)
    }

    /// Marker shown on an enemy carrying a team's flag.
    #[must_use]
    pub fn marker_for(&self, team: TeamId) -> Option<MarkerKind> {
        self.teams.get(&team).map(|t| t.marker)
    }

    /// Team whose flag has the given identity.
    #[must_use]
    pub fn team_of(&self, flag: &BlockUri) -> Option<TeamId> {
        self.by_flag.get(flag).copied()
    }

    /// Check if a team is registered.
    #[must_use]
    pub fn contains(&self, team: TeamId) -> bool {
        self.teams.contains_key(&team)
    }

    /// Get the number of registered teams.
    #[must_use]
    pub fn len(&self) -> usize {
        self.teams.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Iterate over all team definitions, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &TeamDefinition> {
        self.teams.values()
    }

    /// All team ids in ascending order.
    #[must_use]
    pub fn team_ids(&self) -> Vec<TeamId> {
        let mut ids: Vec<_> = self.teams.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}
