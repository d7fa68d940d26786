//! Error types.
//!
//! Event handling never fails outward: rule evaluators turn a
//! [`TransitionError`] into a logged no-op. Only configuration loading
//! returns errors to the host.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::{BlockUri, EntityId, TeamId};

/// Errors raised while loading or validating a [`RulesConfig`](crate::config::RulesConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this schema.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// No teams were declared.
    #[error("config declares no teams")]
    NoTeams,

    /// Two teams share an id.
    #[error("duplicate team id {0}")]
    DuplicateTeam(TeamId),

    /// Two teams share a flag block.
    #[error("flag block {0} is assigned to more than one team")]
    DuplicateFlag(BlockUri),
}

/// A flag transition the engine refused to apply.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransitionError {
    /// No flag is registered for the team.
    #[error("no flag registered for {0}")]
    UnknownFlag(TeamId),

    /// The flag already has a different carrier.
    #[error("flag of {team} is already carried by {carrier}")]
    AlreadyCarried {
        /// Flag's team.
        team: TeamId,
        /// Current carrier.
        carrier: EntityId,
    },

    /// The entity already carries another team's flag.
    #[error("{entity} already carries the flag of {carrying}")]
    CarryingOther {
        /// Entity named in the request.
        entity: EntityId,
        /// Team whose flag it carries.
        carrying: TeamId,
    },

    /// The entity does not carry the flag it was asked to release.
    #[error("flag of {team} is not carried by {entity}")]
    NotCarriedBy {
        /// Flag's team.
        team: TeamId,
        /// Entity named in the request.
        entity: EntityId,
    },
}
