//! Attack rule: an authorized hit knocks a carried flag loose.

use tracing::debug;

use crate::components::{AttackCapability, ComponentStoreExt, FlagCarryState, Location, PlayerCharacter};
use crate::core::EntityId;
use crate::flags::{FlagStateEngine, TransitionCause};
use crate::host::HostContext;
use crate::registry::TeamRegistry;

use super::outcome::{IgnoreReason, RuleOutcome};
use super::release::knock_loose;

/// Evaluates `Activate` events.
///
/// ## Order of checks
///
/// 1. The attacker must hold an authorized weapon.
/// 2. The target must be a player character.
/// 3. A target without a carried flag only gets stale carry state or a
///    stale marker removed.
/// 4. Both positions must be known.
/// 5. The flag is thrown from the target, away from the attacker.
#[derive(Clone, Copy, Debug)]
pub struct AttackRules<'a> {
    registry: &'a TeamRegistry,
    engine: &'a FlagStateEngine,
}

impl<'a> AttackRules<'a> {
    /// Create an evaluator over a registry and engine.
    #[must_use]
    pub fn new(registry: &'a TeamRegistry, engine: &'a FlagStateEngine) -> Self {
        Self { registry, engine }
    }

    /// Evaluate `attacker` activating its held item on `target`.
    pub fn on_attack(&self, ctx: &HostContext<'_>, attacker: EntityId, target: EntityId) -> RuleOutcome {
        let store = ctx.store;

        if !AttackCapability::of(store, attacker).is_authorized() {
            debug!(%attacker, %target, "attacker holds no authorized weapon");
            return RuleOutcome::Ignored(IgnoreReason::NotAuthorized);
        }

        if !store.has::<PlayerCharacter>(target) {
            return RuleOutcome::Ignored(IgnoreReason::NotPlayerCharacter);
        }

        let Some(carry) = store.get::<FlagCarryState>(target) else {
            return if self.engine.repair_stale_marker(store, target) {
                RuleOutcome::MarkerRepaired
            } else {
                RuleOutcome::Ignored(IgnoreReason::NothingCarried)
            };
        };

        if self.engine.repair_stale_carry(store, target) {
            return RuleOutcome::MarkerRepaired;
        }

        let (Some(from), Some(at)) = (store.get::<Location>(attacker), store.get::<Location>(target)) else {
            debug!(%attacker, %target, "attack without positions");
            return RuleOutcome::Ignored(IgnoreReason::MissingPosition);
        };

        let impulse = at.position - from.position;
        knock_loose(
            self.registry,
            self.engine,
            ctx,
            target,
            carry.team,
            at.position,
            impulse,
            TransitionCause::AttackDrop,
        )
        .unwrap_or_else(|err| {
            debug!(%attacker, %target, %err, "attack drop rejected");
            err.into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{AuthorizedWeapon, BlockItem, EntityStore, HeldItem, TeamTag, VisualMarker};
    use crate::config::RulesConfig;
    use crate::core::{MarkerKind, TeamId, Vec3};
    use crate::flags::FlagLocation;
    use crate::host::{DropRequest, MemoryInventory, MemoryWorld};

    const RED: TeamId = TeamId::new(0);
    const BLACK: TeamId = TeamId::new(1);

    struct Fixture {
        registry: TeamRegistry,
        engine: FlagStateEngine,
        store: EntityStore,
        inventory: MemoryInventory,
        world: MemoryWorld,
    }

    impl Fixture {
        fn new() -> Self {
            let registry = TeamRegistry::from_config(&RulesConfig::light_and_shadow()).unwrap();
            let engine = FlagStateEngine::new(&registry);
            Self {
                registry,
                engine,
                store: EntityStore::new(),
                inventory: MemoryInventory::new(),
                world: MemoryWorld::new(),
            }
        }

        fn ctx(&self) -> HostContext<'_> {
            HostContext::new(&self.store, &self.inventory, &self.world)
        }

        fn rules(&self) -> AttackRules<'_> {
            AttackRules::new(&self.registry, &self.engine)
        }

        fn player(&self, team: TeamId, position: Vec3) -> EntityId {
            self.store.spawn_with([
                PlayerCharacter.into(),
                TeamTag::new(team).into(),
                Location::new(position).into(),
            ])
        }

        fn armed(&self, team: TeamId, position: Vec3) -> EntityId {
            let staff = self.store.spawn_with([AuthorizedWeapon.into()]);
            let player = self.player(team, position);
            self.store.insert(player, HeldItem::new(staff));
            player
        }

        fn carrying(&self, team: TeamId, flag: TeamId, position: Vec3) -> (EntityId, EntityId) {
            let player = self.player(team, position);
            let uri = self.registry.flag_identity_for(flag).unwrap().clone();
            let item = self.store.spawn_with([BlockItem::new(uri).into()]);
            self.inventory.give(player, item);
            self.engine.assign_carry(&self.store, flag, player).unwrap();
            (player, item)
        }
    }

    #[test]
    fn test_authorized_attack_drops_flag() {
        let fx = Fixture::new();
        let attacker = fx.armed(BLACK, Vec3::new(0.0, 23.0, 0.0));
        let (carrier, item) = fx.carrying(RED, BLACK, Vec3::new(2.0, 23.0, 1.0));

        let outcome = fx.rules().on_attack(&fx.ctx(), attacker, carrier);

        assert_eq!(
            outcome,
            RuleOutcome::Dropped {
                team: BLACK,
                carrier,
                item
            }
        );
        assert_eq!(
            fx.inventory.drops(),
            vec![DropRequest {
                item,
                owner: carrier,
                impulse: Vec3::new(2.0, 0.0, 1.0),
                position: Vec3::new(2.0, 23.0, 1.0),
            }]
        );
        assert_eq!(
            fx.engine.location(BLACK),
            Some(FlagLocation::Dropped {
                at: Vec3::new(2.0, 23.0, 1.0)
            })
        );
        assert!(!fx.store.has::<FlagCarryState>(carrier));
        assert!(!fx.store.has::<VisualMarker>(carrier));
    }

    #[test]
    fn test_unarmed_attack_is_ignored() {
        let fx = Fixture::new();
        let attacker = fx.player(BLACK, Vec3::ZERO);
        let (carrier, _) = fx.carrying(RED, BLACK, Vec3::ZERO);

        let outcome = fx.rules().on_attack(&fx.ctx(), attacker, carrier);

        assert_eq!(outcome, RuleOutcome::Ignored(IgnoreReason::NotAuthorized));
        assert_eq!(fx.engine.carrier_of(BLACK), Some(carrier));
        assert!(fx.inventory.drops().is_empty());
    }

    #[test]
    fn test_held_item_without_weapon_is_ignored() {
        let fx = Fixture::new();
        let attacker = fx.player(BLACK, Vec3::ZERO);
        let torch = fx.store.spawn();
        fx.store.insert(attacker, HeldItem::new(torch));
        let (carrier, _) = fx.carrying(RED, BLACK, Vec3::ZERO);

        let outcome = fx.rules().on_attack(&fx.ctx(), attacker, carrier);
        assert_eq!(outcome, RuleOutcome::Ignored(IgnoreReason::NotAuthorized));
    }

    #[test]
    fn test_non_player_target_is_ignored() {
        let fx = Fixture::new();
        let attacker = fx.armed(BLACK, Vec3::ZERO);
        let chest = fx.store.spawn_with([VisualMarker::new(MarkerKind::Hearts).into()]);

        let outcome = fx.rules().on_attack(&fx.ctx(), attacker, chest);

        assert_eq!(outcome, RuleOutcome::Ignored(IgnoreReason::NotPlayerCharacter));
        assert!(fx.store.has::<VisualMarker>(chest));
    }

    #[test]
    fn test_stale_marker_is_repaired() {
        let fx = Fixture::new();
        let attacker = fx.armed(BLACK, Vec3::ZERO);
        let target = fx.player(RED, Vec3::ZERO);
        fx.store.insert(target, VisualMarker::new(MarkerKind::Spades));

        let outcome = fx.rules().on_attack(&fx.ctx(), attacker, target);

        assert_eq!(outcome, RuleOutcome::MarkerRepaired);
        assert!(!fx.store.has::<VisualMarker>(target));
        assert!(fx.inventory.drops().is_empty());
    }

    #[test]
    fn test_clean_target_is_ignored() {
        let fx = Fixture::new();
        let attacker = fx.armed(BLACK, Vec3::ZERO);
        let target = fx.player(RED, Vec3::ZERO);

        let outcome = fx.rules().on_attack(&fx.ctx(), attacker, target);
        assert_eq!(outcome, RuleOutcome::Ignored(IgnoreReason::NothingCarried));
    }

    #[test]
    fn test_missing_attacker_position_skips_drop() {
        let fx = Fixture::new();
        let attacker = fx.armed(BLACK, Vec3::ZERO);
        fx.store.remove::<Location>(attacker);
        let (carrier, _) = fx.carrying(RED, BLACK, Vec3::ZERO);

        let outcome = fx.rules().on_attack(&fx.ctx(), attacker, carrier);

        assert_eq!(outcome, RuleOutcome::Ignored(IgnoreReason::MissingPosition));
        assert_eq!(fx.engine.carrier_of(BLACK), Some(carrier));
        assert!(fx.store.has::<VisualMarker>(carrier));
    }

    #[test]
    fn test_missing_target_position_skips_drop() {
        let fx = Fixture::new();
        let attacker = fx.armed(BLACK, Vec3::ZERO);
        let (carrier, item) = fx.carrying(RED, BLACK, Vec3::ZERO);
        fx.store.remove::<Location>(carrier);

        let outcome = fx.rules().on_attack(&fx.ctx(), attacker, carrier);

        assert_eq!(outcome, RuleOutcome::Ignored(IgnoreReason::MissingPosition));
        assert_eq!(fx.engine.carrier_of(BLACK), Some(carrier));
        assert_eq!(fx.inventory.count_of(carrier, item), 1);
        assert!(fx.inventory.drops().is_empty());
    }

    #[test]
    fn test_carry_state_for_unknown_team_is_cleared() {
        let fx = Fixture::new();
        let attacker = fx.armed(BLACK, Vec3::ZERO);
        let target = fx.player(RED, Vec3::ZERO);
        fx.store.insert(target, FlagCarryState::new(TeamId::new(7)));
        fx.store.insert(target, VisualMarker::new(MarkerKind::Diamonds));

        let outcome = fx.rules().on_attack(&fx.ctx(), attacker, target);

        assert_eq!(outcome, RuleOutcome::MarkerRepaired);
        assert!(!fx.store.has::<FlagCarryState>(target));
        assert!(!fx.store.has::<VisualMarker>(target));
        assert!(fx.inventory.drops().is_empty());
    }

    #[test]
    fn test_carry_state_for_uncarried_flag_is_cleared() {
        let fx = Fixture::new();
        let attacker = fx.armed(BLACK, Vec3::ZERO);
        let target = fx.player(RED, Vec3::ZERO);
        fx.store.insert(target, FlagCarryState::new(BLACK));
        fx.store.insert(target, VisualMarker::new(MarkerKind::Spades));

        let outcome = fx.rules().on_attack(&fx.ctx(), attacker, target);

        assert_eq!(outcome, RuleOutcome::MarkerRepaired);
        assert!(!fx.store.has::<FlagCarryState>(target));
        assert!(fx.engine.location(BLACK).unwrap().is_at_base());
    }

    #[test]
    fn test_missing_flag_item_returns_flag() {
        let fx = Fixture::new();
        let attacker = fx.armed(BLACK, Vec3::ZERO);
        let (carrier, item) = fx.carrying(RED, BLACK, Vec3::ZERO);
        fx.inventory.take(carrier, item);

        let outcome = fx.rules().on_attack(&fx.ctx(), attacker, carrier);

        assert_eq!(outcome, RuleOutcome::Returned { team: BLACK });
        assert!(fx.engine.location(BLACK).unwrap().is_at_base());
        assert!(!fx.store.has::<FlagCarryState>(carrier));
        assert!(fx.inventory.drops().is_empty());
        assert_eq!(
            fx.world.block_at(fx.registry.base_location_for(BLACK).unwrap()),
            Some("LightAndShadowResources:blackFlag".into())
        );
    }
}
