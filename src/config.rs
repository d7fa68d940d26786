//! Rule configuration.
//!
//! Games describe their teams at startup, either in code or from a TOML
//! file loaded once:
//!
//! ```toml
//! [[teams]]
//! id = 0
//! name = "red"
//! flag_block = "LightAndShadowResources:redFlag"
//! base_location = { x = 30, y = 23, z = 0 }
//! marker = "hearts"
//! ```
//!
//! The engine never hardcodes teams. [`RulesConfig::light_and_shadow`] is
//! just the stock two-team layout.

use std::path::Path;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{BlockPosition, MarkerKind, TeamId};
use crate::error::ConfigError;
use crate::registry::TeamDefinition;

/// Complete rule configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Team definitions, one per flag.
    #[serde(default)]
    pub teams: Vec<TeamDefinition>,
}

impl RulesConfig {
    /// Create an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a team (builder pattern).
    #[must_use]
    pub fn with_team(mut self, team: TeamDefinition) -> Self {
        self.teams.push(team);
        self
    }

    /// The Light and Shadow layout: red (hearts) and black (spades).
    #[must_use]
    pub fn light_and_shadow() -> Self {
        Self::new()
            .with_team(
                TeamDefinition::new(TeamId::new(0), "red", "LightAndShadowResources:redFlag")
                    .with_base(BlockPosition::new(30, 23, 0))
                    .with_marker(MarkerKind::Hearts),
            )
            .with_team(
                TeamDefinition::new(TeamId::new(1), "black", "LightAndShadowResources:blackFlag")
                    .with_base(BlockPosition::new(-30, 23, 0))
                    .with_marker(MarkerKind::Spades),
            )
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        debug!(path = %path.display(), teams = config.teams.len(), "loaded rules config");
        Ok(config)
    }

    /// Check that teams exist and that ids and flag blocks are unique.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.teams.is_empty() {
            return Err(ConfigError::NoTeams);
        }

        let mut ids = FxHashSet::default();
        let mut flags = FxHashSet::default();
        for team in &self.teams {
            if !ids.insert(team.id) {
                return Err(ConfigError::DuplicateTeam(team.id));
            }
            if !flags.insert(&team.flag_block) {
                return Err(ConfigError::DuplicateFlag(team.flag_block.clone()));
            }
        }
        Ok(())
    }

    /// Get a team definition by ID.
    #[must_use]
    pub fn get_team(&self, id: TeamId) -> Option<&TeamDefinition> {
        self.teams.iter().find(|t| t.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_TEAMS: &str = r#"
        [[teams]]
        id = 0
        name = "red"
        flag_block = "LightAndShadowResources:redFlag"
        base_location = { x = 30, y = 23, z = 0 }
        marker = "hearts"

        [[teams]]
        id = 1
        name = "black"
        flag_block = "LightAndShadowResources:blackFlag"
        base_location = { x = -30, y = 23, z = 0 }
        marker = "spades"
    "#;

    #[test]
    fn test_parse_toml_matches_builtin() {
        let config = RulesConfig::from_toml_str(TWO_TEAMS).unwrap();
        assert_eq!(config, RulesConfig::light_and_shadow());
    }

    #[test]
    fn test_get_team() {
        let config = RulesConfig::light_and_shadow();
        let black = config.get_team(TeamId::new(1)).unwrap();
        assert_eq!(black.name, "black");
        assert_eq!(black.marker, MarkerKind::Spades);
        assert!(config.get_team(TeamId::new(2)).is_none());
    }

    #[test]
    fn test_empty_config_rejected() {
        let err = RulesConfig::from_toml_str("").unwrap_err();
        assert!(matches!(err, ConfigError::NoTeams));
    }

    #[test]
    fn test_duplicate_team_rejected() {
        let source = r#"
            [[teams]]
            id = 3
            name = "a"
            flag_block = "M:a"
            base_location = { x = 0, y = 0, z = 0 }
            marker = "clubs"

            [[teams]]
            id = 3
            name = "b"
            flag_block = "M:b"
            base_location = { x = 1, y = 0, z = 0 }
            marker = "diamonds"
        "#;
        let err = RulesConfig::from_toml_str(source).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateTeam(id) if id == TeamId::new(3)));
    }

    #[test]
    fn test_duplicate_flag_rejected() {
        let config = RulesConfig::new()
            .with_team(TeamDefinition::new(TeamId::new(0), "a", "M:flag"))
            .with_team(TeamDefinition::new(TeamId::new(1), "b", "M:flag"));
        assert!(matches!(config.validate(), Err(ConfigError::DuplicateFlag(_))));
    }

    #[test]
    fn test_malformed_toml() {
        let err = RulesConfig::from_toml_str("[[teams]]\nid = \"red\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_unknown_marker_rejected() {
        let source = r#"
            [[teams]]
            id = 0
            name = "red"
            flag_block = "M:red"
            base_location = { x = 0, y = 0, z = 0 }
            marker = "stars"
        "#;
        assert!(matches!(RulesConfig::from_toml_str(source), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let err = RulesConfig::load("/nonexistent/rules.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
