//! Shared fixture for integration tests: a match on in-memory host services.

#![allow(dead_code)]

use std::sync::Arc;

use rust_ctf::components::{
    AuthorizedWeapon, BlockItem, ComponentStoreExt, EntityStore, FlagCarryState, HeldItem,
    Location, PlayerCharacter, TeamTag, VisualMarker,
};
use rust_ctf::core::{EntityId, TeamId, Vec3};
use rust_ctf::events::{EventBus, GameEvent};
use rust_ctf::flags::FlagLocation;
use rust_ctf::host::{HostContext, MemoryInventory, MemoryWorld};
use rust_ctf::rules::FlagGame;

pub const RED: TeamId = TeamId::new(0);
pub const BLACK: TeamId = TeamId::new(1);

pub struct Match {
    pub game: Arc<FlagGame>,
    pub bus: EventBus,
    pub store: EntityStore,
    pub inventory: MemoryInventory,
    pub world: MemoryWorld,
}

impl Match {
    /// Red/black match with the game installed on the bus.
    pub fn new() -> Self {
        Self::with_game(FlagGame::light_and_shadow())
    }

    pub fn with_game(game: FlagGame) -> Self {
        let game = Arc::new(game);
        let mut bus = EventBus::new();
        game.install(&mut bus);
        Self {
            game,
            bus,
            store: EntityStore::new(),
            inventory: MemoryInventory::new(),
            world: MemoryWorld::new(),
        }
    }

    pub fn ctx(&self) -> HostContext<'_> {
        HostContext::new(&self.store, &self.inventory, &self.world)
    }

    pub fn player(&self, team: TeamId, position: Vec3) -> EntityId {
        self.store.spawn_with([
            PlayerCharacter.into(),
            TeamTag::new(team).into(),
            Location::new(position).into(),
        ])
    }

    /// Give `player` an authorized weapon and put it in their hand.
    pub fn arm(&self, player: EntityId) -> EntityId {
        let weapon = self.store.spawn_with([AuthorizedWeapon.into()]);
        self.store.insert(player, HeldItem::new(weapon));
        weapon
    }

    pub fn flag_item(&self, flag: TeamId) -> EntityId {
        let uri = self
            .game
            .registry()
            .flag_identity_for(flag)
            .expect("registered flag")
            .clone();
        self.store.spawn_with([BlockItem::new(uri).into()])
    }

    /// Put `item` in `player`'s inventory and publish the slot change.
    pub fn pick_up(&self, player: EntityId, item: EntityId) {
        self.inventory.give(player, item);
        self.publish(GameEvent::item_acquired(player, item));
    }

    /// Take `item` out of `player`'s inventory and publish the slot change.
    pub fn throw_away(&self, player: EntityId, item: EntityId) {
        self.inventory.take(player, item);
        self.publish(GameEvent::item_released(player, item));
    }

    pub fn attack(&self, attacker: EntityId, target: EntityId) {
        self.publish(GameEvent::activate(attacker, target));
    }

    pub fn publish(&self, event: GameEvent) -> usize {
        self.bus.publish(&event, &self.ctx())
    }

    pub fn location(&self, flag: TeamId) -> FlagLocation {
        self.game.flag_location(flag).expect("registered flag")
    }

    /// Carry state and marker agree with the engine for every entity.
    pub fn assert_consistent(&self, entities: &[EntityId]) {
        for &entity in entities {
            let carry = self.store.get::<FlagCarryState>(entity);
            let marker = self.store.get::<VisualMarker>(entity);

            match carry {
                Some(carry) => {
                    assert_eq!(self.game.engine().carrier_of(carry.team), Some(entity));
                    let expected = self.game.registry().marker_for(carry.team).map(VisualMarker::new);
                    assert_eq!(marker, expected, "{} marker out of sync", entity);
                }
                None => assert_eq!(marker, None, "{} has marker without flag", entity),
            }
        }

        for team in self.game.engine().teams() {
            if let Some(carrier) = self.game.engine().carrier_of(team) {
                assert_eq!(
                    self.store.get::<FlagCarryState>(carrier),
                    Some(FlagCarryState::new(team)),
                    "carrier of {} lacks carry state",
                    team
                );
            }
        }
    }
}
