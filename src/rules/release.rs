//! Taking a flag away from its carrier.
//!
//! Shared by the attack rule (knocked loose, thrown away from the attacker)
//! and the pickup rule (dropped in place to take another flag).

use tracing::warn;

use crate::components::{BlockItem, ComponentStoreExt};
use crate::core::{BlockUri, EntityId, TeamId, Vec3};
use crate::effects::SideEffectResolver;
use crate::error::TransitionError;
use crate::flags::{FlagStateEngine, TransitionCause};
use crate::host::{DropRequest, HostContext};
use crate::registry::TeamRegistry;

use super::outcome::RuleOutcome;

/// First item in `owner`'s inventory whose block family is `flag`.
pub fn find_flag_item(ctx: &HostContext<'_>, owner: EntityId, flag: &BlockUri) -> Option<EntityId> {
    ctx.items_of(owner).find(|item| {
        ctx.store
            .get::<BlockItem>(*item)
            .is_some_and(|held| &held.block == flag)
    })
}

/// Drop `team`'s flag out of `carrier`'s inventory at `at`.
///
/// If the carrier's inventory has no item for the flag, there is nothing
/// to throw: the flag returns to base instead.
#[allow(clippy::too_many_arguments)]
pub(crate) fn knock_loose(
    registry: &TeamRegistry,
    engine: &FlagStateEngine,
    ctx: &HostContext<'_>,
    carrier: EntityId,
    team: TeamId,
    at: Vec3,
    impulse: Vec3,
    cause: TransitionCause,
) -> Result<RuleOutcome, TransitionError> {
    let flag = registry
        .flag_identity_for(team)
        .ok_or(TransitionError::UnknownFlag(team))?;

    let Some(item) = find_flag_item(ctx, carrier, flag) else {
        warn!(%team, %carrier, "carried flag has no item, returning it to base");
        let effects = engine.reclaim_from(ctx.store, team, carrier, TransitionCause::MissingItem)?;
        SideEffectResolver::apply(ctx, &effects);
        return Ok(RuleOutcome::Returned { team });
    };

    let request = DropRequest {
        item,
        owner: carrier,
        impulse,
        position: at,
    };
    let effects = engine.drop_carried(ctx.store, team, carrier, at, Some(request), cause)?;
    SideEffectResolver::apply(ctx, &effects);

    Ok(RuleOutcome::Dropped {
        team,
        carrier,
        item,
    })
}
