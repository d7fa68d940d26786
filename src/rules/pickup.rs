//! Pickup rule: a flag entering an inventory is returned or carried.
//!
//! A flag picked up by its own team goes back to base and the item is
//! destroyed. A flag picked up by an enemy becomes carried by that player.
//! Slot changes that remove a carried flag from the inventory release it
//! where the player stands.

use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::components::{BlockItem, ComponentStoreExt, FlagCarryState, Location, TeamTag};
use crate::core::{EntityId, TeamId, Vec3};
use crate::effects::SideEffectResolver;
use crate::error::TransitionError;
use crate::flags::{FlagLocation, FlagStateEngine, TransitionCause};
use crate::host::{HostContext, RemoveRequest};
use crate::registry::TeamRegistry;

use super::outcome::{IgnoreReason, RuleOutcome};
use super::release::{find_flag_item, knock_loose};

/// Evaluates `InventorySlotChanged` events.
#[derive(Clone, Copy, Debug)]
pub struct PickupRules<'a> {
    registry: &'a TeamRegistry,
    engine: &'a FlagStateEngine,
}

impl<'a> PickupRules<'a> {
    /// Create an evaluator over a registry and engine.
    #[must_use]
    pub fn new(registry: &'a TeamRegistry, engine: &'a FlagStateEngine) -> Self {
        Self { registry, engine }
    }

    fn flag_team(&self, ctx: &HostContext<'_>, item: EntityId) -> Option<TeamId> {
        let block = ctx.store.get::<BlockItem>(item)?;
        self.registry.team_of(&block.block)
    }

    /// Evaluate `item` arriving in `player`'s inventory.
    pub fn on_inventory_changed(&self, ctx: &HostContext<'_>, player: EntityId, item: EntityId) -> RuleOutcome {
        let Some(tag) = ctx.store.get::<TeamTag>(player) else {
            return RuleOutcome::Ignored(IgnoreReason::NoTeam);
        };
        let Some(flag) = self.flag_team(ctx, item) else {
            return RuleOutcome::Ignored(IgnoreReason::NotAFlag);
        };

        if flag == tag.team {
            self.recover(ctx, player, flag, item)
        } else {
            self.capture(ctx, player, flag)
        }
    }

    /// Evaluate one slot of `player`'s inventory changing from `old_item`
    /// to `new_item`.
    ///
    /// The old item is considered first, so a flag swapped directly for
    /// another in the same slot is released before the new one is taken.
    pub fn on_slot_changed(
        &self,
        ctx: &HostContext<'_>,
        player: EntityId,
        old_item: Option<EntityId>,
        new_item: Option<EntityId>,
    ) -> SmallVec<[RuleOutcome; 2]> {
        let mut outcomes = SmallVec::new();
        if let Some(old) = old_item {
            outcomes.push(self.on_item_removed(ctx, player, old));
        }
        if let Some(new) = new_item {
            outcomes.push(self.on_inventory_changed(ctx, player, new));
        }
        outcomes
    }

    /// Evaluate `item` leaving one of `player`'s slots.
    ///
    /// Releases the flag the player carries if `item` is that flag and no
    /// other slot still holds it.
    pub fn on_item_removed(&self, ctx: &HostContext<'_>, player: EntityId, item: EntityId) -> RuleOutcome {
        let Some(flag) = self.flag_team(ctx, item) else {
            return RuleOutcome::Ignored(IgnoreReason::NotAFlag);
        };
        match ctx.store.get::<FlagCarryState>(player) {
            Some(carry) if carry.team == flag => {}
            _ => return RuleOutcome::Ignored(IgnoreReason::StillHeld),
        }

        let still_held = self
            .registry
            .flag_identity_for(flag)
            .and_then(|uri| find_flag_item(ctx, player, uri))
            .is_some();
        if still_held {
            return RuleOutcome::Ignored(IgnoreReason::StillHeld);
        }

        let Some(at) = ctx.store.get::<Location>(player) else {
            debug!(%player, team = %flag, "released flag without position");
            return RuleOutcome::Ignored(IgnoreReason::MissingPosition);
        };

        match self
            .engine
            .drop_carried(ctx.store, flag, player, at.position, None, TransitionCause::PlayerDrop)
        {
            Ok(effects) => {
                SideEffectResolver::apply(ctx, &effects);
                RuleOutcome::Released {
                    team: flag,
                    carrier: player,
                }
            }
            Err(err) => {
                debug!(%player, %err, "release rejected");
                err.into()
            }
        }
    }

    fn recover(&self, ctx: &HostContext<'_>, player: EntityId, team: TeamId, item: EntityId) -> RuleOutcome {
        let consumed = RemoveRequest {
            instigator: Some(player),
            ..RemoveRequest::consume_one(player, item)
        };
        match self
            .engine
            .return_to_base(ctx.store, team, Some(consumed), TransitionCause::Return)
        {
            Ok(effects) => {
                SideEffectResolver::apply(ctx, &effects);
                RuleOutcome::Returned { team }
            }
            Err(err) => err.into(),
        }
    }

    fn capture(&self, ctx: &HostContext<'_>, player: EntityId, team: TeamId) -> RuleOutcome {
        // Refuse before touching the flag the player already holds.
        match self.engine.location(team) {
            None => return TransitionError::UnknownFlag(team).into(),
            Some(FlagLocation::Carried { by }) if by != player => {
                warn!(%player, %team, carrier = %by, "pickup of carried flag rejected");
                return TransitionError::AlreadyCarried { team, carrier: by }.into();
            }
            Some(_) => {}
        }

        let mut swapped = None;

        if let Some(held) = ctx.store.get::<FlagCarryState>(player) {
            if held.team != team {
                let Some(at) = ctx.store.get::<Location>(player) else {
                    debug!(%player, %team, "cannot drop held flag without position");
                    return RuleOutcome::Ignored(IgnoreReason::MissingPosition);
                };
                if let Err(err) = knock_loose(
                    self.registry,
                    self.engine,
                    ctx,
                    player,
                    held.team,
                    at.position,
                    Vec3::ZERO,
                    TransitionCause::SwapDrop,
                ) {
                    debug!(%player, %err, "swap drop rejected");
                    return err.into();
                }
                swapped = Some(held.team);
            }
        }

        match self.engine.assign_carry(ctx.store, team, player) {
            Ok(effects) => {
                SideEffectResolver::apply(ctx, &effects);
                RuleOutcome::PickedUp {
                    team,
                    carrier: player,
                    swapped,
                }
            }
            Err(err) => {
                warn!(%player, %team, %err, "pickup rejected");
                err.into()
            }
        }
    }
}
