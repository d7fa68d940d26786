//! A match: the team registry and flag states, wired to host events.

use std::path::Path;
use std::sync::Arc;

use smallvec::{smallvec, SmallVec};
use tracing::{debug, info};

use crate::config::RulesConfig;
use crate::core::{EntityId, TeamId};
use crate::error::ConfigError;
use crate::events::{EventBus, EventKind, GameEvent, HandlerId};
use crate::flags::{FlagLocation, FlagSnapshot, FlagStateEngine};
use crate::host::HostContext;
use crate::registry::TeamRegistry;

use super::attack::AttackRules;
use super::outcome::RuleOutcome;
use super::pickup::PickupRules;

/// Capture-the-flag rules for one match.
///
/// Owns the [`TeamRegistry`] and the [`FlagStateEngine`]. Event handling
/// takes `&self`, so one game can be shared across threads behind an
/// [`Arc`] and fed events concurrently.
///
/// ## Example
///
/// ```
/// use rust_ctf::components::{BlockItem, ComponentStoreExt, EntityStore, FlagCarryState, TeamTag};
/// use rust_ctf::core::TeamId;
/// use rust_ctf::events::GameEvent;
/// use rust_ctf::host::{HostContext, MemoryInventory, MemoryWorld};
/// use rust_ctf::rules::FlagGame;
///
/// let game = FlagGame::light_and_shadow();
/// let (store, inventory, world) = (EntityStore::new(), MemoryInventory::new(), MemoryWorld::new());
/// let ctx = HostContext::new(&store, &inventory, &world);
///
/// let red_player = store.spawn_with([TeamTag::new(TeamId::new(0)).into()]);
/// let black_flag = store.spawn_with([BlockItem::new("LightAndShadowResources:blackFlag").into()]);
/// inventory.give(red_player, black_flag);
///
/// game.handle_event(&ctx, &GameEvent::item_acquired(red_player, black_flag));
///
/// assert_eq!(game.engine().carrier_of(TeamId::new(1)), Some(red_player));
/// assert!(store.has::<FlagCarryState>(red_player));
/// ```
#[derive(Debug)]
pub struct FlagGame {
    registry: TeamRegistry,
    engine: FlagStateEngine,
}

impl FlagGame {
    /// Start a match with every flag at its base.
    #[must_use]
    pub fn new(registry: TeamRegistry) -> Self {
        let engine = FlagStateEngine::new(&registry);
        info!(teams = registry.len(), "flag game created");
        Self { registry, engine }
    }

    /// Start a match from a config.
    pub fn from_config(config: &RulesConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(TeamRegistry::from_config(config)?))
    }

    /// Start a match from a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_config(&RulesConfig::load(path)?)
    }

    /// The built-in red/black match.
    ///
    /// # Panics
    ///
    /// Panics if the built-in config fails validation.
    #[must_use]
    pub fn light_and_shadow() -> Self {
        Self::from_config(&RulesConfig::light_and_shadow()).expect("built-in config is valid")
    }

    #[must_use]
    pub fn registry(&self) -> &TeamRegistry {
        &self.registry
    }

    #[must_use]
    pub fn engine(&self) -> &FlagStateEngine {
        &self.engine
    }

    #[must_use]
    pub fn attack_rules(&self) -> AttackRules<'_> {
        AttackRules::new(&self.registry, &self.engine)
    }

    #[must_use]
    pub fn pickup_rules(&self) -> PickupRules<'_> {
        PickupRules::new(&self.registry, &self.engine)
    }

    /// See [`AttackRules::on_attack`].
    pub fn on_attack(&self, ctx: &HostContext<'_>, attacker: EntityId, target: EntityId) -> RuleOutcome {
        self.attack_rules().on_attack(ctx, attacker, target)
    }

    /// See [`PickupRules::on_inventory_changed`].
    pub fn on_inventory_changed(&self, ctx: &HostContext<'_>, player: EntityId, item: EntityId) -> RuleOutcome {
        self.pickup_rules().on_inventory_changed(ctx, player, item)
    }

    /// See [`PickupRules::on_slot_changed`].
    pub fn on_slot_changed(
        &self,
        ctx: &HostContext<'_>,
        player: EntityId,
        old_item: Option<EntityId>,
        new_item: Option<EntityId>,
    ) -> SmallVec<[RuleOutcome; 2]> {
        self.pickup_rules().on_slot_changed(ctx, player, old_item, new_item)
    }

    /// Evaluate any host event.
    pub fn handle_event(&self, ctx: &HostContext<'_>, event: &GameEvent) -> SmallVec<[RuleOutcome; 2]> {
        let outcomes = match *event {
            GameEvent::Activate { instigator, target } => smallvec![self.on_attack(ctx, instigator, target)],
            GameEvent::InventorySlotChanged {
                player,
                old_item,
                new_item,
            } => self.on_slot_changed(ctx, player, old_item, new_item),
        };

        for outcome in outcomes.iter().filter(|o| !o.is_ignored()) {
            debug!(kind = %event.kind(), ?outcome, "event handled");
        }
        outcomes
    }

    /// Subscribe this game's handlers on `bus`.
    ///
    /// Returns the handler ids, attack first.
    pub fn install(self: &Arc<Self>, bus: &mut EventBus) -> [HandlerId; 2] {
        let attack = Arc::clone(self);
        let inventory = Arc::clone(self);
        [
            bus.subscribe(EventKind::Activate, move |event, ctx| {
                attack.handle_event(ctx, event);
            }),
            bus.subscribe(EventKind::InventorySlotChanged, move |event, ctx| {
                inventory.handle_event(ctx, event);
            }),
        ]
    }

    /// Current location of a team's flag.
    #[must_use]
    pub fn flag_location(&self, team: TeamId) -> Option<FlagLocation> {
        self.engine.location(team)
    }

    /// Location of every flag.
    #[must_use]
    pub fn snapshot(&self) -> FlagSnapshot {
        self.engine.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_and_shadow_matches_config() {
        let game = FlagGame::light_and_shadow();
        let configured = FlagGame::from_config(&RulesConfig::light_and_shadow()).unwrap();

        assert_eq!(game.registry().team_ids(), configured.registry().team_ids());
        assert_eq!(game.snapshot(), configured.snapshot());
        assert_eq!(game.registry().len(), 2);
    }

    #[test]
    fn test_builtin_config_is_valid() {
        assert!(RulesConfig::light_and_shadow().validate().is_ok());
        assert!(TeamRegistry::from_config(&RulesConfig::light_and_shadow()).is_ok());
    }

    #[test]
    fn test_from_empty_config_fails() {
        assert!(matches!(
            FlagGame::from_config(&RulesConfig::new()),
            Err(ConfigError::NoTeams)
        ));
    }

    #[test]
    fn test_install_registers_both_handlers() {
        let game = Arc::new(FlagGame::light_and_shadow());
        let mut bus = EventBus::new();

        let [attack, inventory] = game.install(&mut bus);

        assert_ne!(attack, inventory);
        assert_eq!(bus.handler_count(EventKind::Activate), 1);
        assert_eq!(bus.handler_count(EventKind::InventorySlotChanged), 1);
        assert_eq!(Arc::strong_count(&game), 3);
    }

    #[test]
    fn test_flag_location_of_unknown_team() {
        let game = FlagGame::light_and_shadow();
        assert!(game.flag_location(TeamId::new(0)).unwrap().is_at_base());
        assert_eq!(game.flag_location(TeamId::new(5)), None);
    }
}
