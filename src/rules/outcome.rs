//! What a rule evaluation did.

use crate::core::{EntityId, TeamId};
use crate::error::TransitionError;

/// Why an event changed nothing.
#[derive(Clone, Debug, PartialEq)]
pub enum IgnoreReason {
    /// The attacker holds no authorized weapon.
    NotAuthorized,
    /// The target is not a player character.
    NotPlayerCharacter,
    /// The player has no team.
    NoTeam,
    /// The item is not any team's flag.
    NotAFlag,
    /// A position the rule needs is missing.
    MissingPosition,
    /// The target carries no flag.
    NothingCarried,
    /// The slot change released a flag the player did not carry, or one
    /// still held in another slot.
    StillHeld,
    /// The flag state engine refused the transition.
    Rejected(TransitionError),
}

/// Result of evaluating one rule against one event.
#[derive(Clone, Debug, PartialEq)]
pub enum RuleOutcome {
    /// Nothing changed.
    Ignored(IgnoreReason),
    /// A marker or carry state without a carried flag was removed.
    MarkerRepaired,
    /// A flag was knocked out of its carrier's inventory.
    Dropped {
        team: TeamId,
        carrier: EntityId,
        item: EntityId,
    },
    /// A player threw their carried flag away.
    Released { team: TeamId, carrier: EntityId },
    /// A flag went back to its base.
    Returned { team: TeamId },
    /// A player took an enemy flag. `swapped` is the flag they had to drop
    /// to take it.
    PickedUp {
        team: TeamId,
        carrier: EntityId,
        swapped: Option<TeamId>,
    },
}

impl RuleOutcome {
    /// Check if the event was ignored.
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        matches!(self, RuleOutcome::Ignored(_))
    }

    /// The flag this outcome moved, if any.
    #[must_use]
    pub fn team(&self) -> Option<TeamId> {
        match self {
            RuleOutcome::Dropped { team, .. }
            | RuleOutcome::Released { team, .. }
            | RuleOutcome::Returned { team }
            | RuleOutcome::PickedUp { team, .. } => Some(*team),
            RuleOutcome::Ignored(_) | RuleOutcome::MarkerRepaired => None,
        }
    }
}

impl From<TransitionError> for RuleOutcome {
    fn from(err: TransitionError) -> Self {
        RuleOutcome::Ignored(IgnoreReason::Rejected(err))
    }
}
