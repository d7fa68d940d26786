//! Flag state transition engine.
//!
//! The engine is the single writer of flag locations, of
//! [`FlagCarryState`] and of [`VisualMarker`]. Rule evaluators read
//! components freely but go through the engine for every change.
//!
//! ## Locking
//!
//! Each flag has its own `parking_lot::Mutex`. A transition holds exactly
//! one flag lock while it checks the current location, rewrites the
//! carrier's components and records the new location, so at most one
//! entity can be `Carried` for a flag. Transitions of different flags never
//! contend. No transition takes two flag locks.
//!
//! Host calls are not made under a lock: transitions return a
//! [`SideEffectBatch`] for the caller to dispatch.
//!
//! ## State machine (per flag)
//!
//! ```text
//!            Pickup                    AttackDrop / PlayerDrop / SwapDrop
//!   AtBase ─────────► Carried(p) ───────────────────────────────► Dropped(pos)
//!     ▲                 │    ▲                  Pickup                │
//!     │  Return /       │    └────────────────────────────────────────┘
//!     │  MissingItem    │
//!     └─────────────────┘◄──────────────── Return ───────────────────┘
//! ```

use im::Vector;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use crate::components::{ComponentStore, ComponentStoreExt, FlagCarryState, VisualMarker};
use crate::core::{BlockPosition, BlockUri, EntityId, MarkerKind, TeamId, Vec3};
use crate::effects::{SideEffect, SideEffectBatch};
use crate::error::TransitionError;
use crate::host::{DropRequest, RemoveRequest};
use crate::registry::TeamRegistry;

use super::location::{FlagLocation, FlagSnapshot, TransitionCause, TransitionRecord};

#[derive(Clone, Debug)]
struct FlagState {
    location: FlagLocation,
    history: Vector<TransitionRecord>,
}

impl FlagState {
    fn transition(&mut self, team: TeamId, to: FlagLocation, cause: TransitionCause) -> TransitionRecord {
        let record = TransitionRecord {
            sequence: self.history.len() as u64 + 1,
            team,
            from: self.location,
            to,
            cause,
        };
        self.location = to;
        self.history.push_back(record);
        record
    }
}

#[derive(Debug)]
struct FlagSlot {
    base: BlockPosition,
    flag_block: BlockUri,
    marker: MarkerKind,
    state: Mutex<FlagState>,
}

/// Owner of every flag's state machine.
///
/// ## Example
///
/// ```
/// use rust_ctf::components::{ComponentStoreExt, EntityStore, FlagCarryState};
/// use rust_ctf::config::RulesConfig;
/// use rust_ctf::core::TeamId;
/// use rust_ctf::flags::FlagStateEngine;
/// use rust_ctf::registry::TeamRegistry;
///
/// let registry = TeamRegistry::from_config(&RulesConfig::light_and_shadow()).unwrap();
/// let engine = FlagStateEngine::new(&registry);
/// let store = EntityStore::new();
/// let player = store.spawn();
/// let black = TeamId::new(1);
///
/// assert!(engine.location(black).unwrap().is_at_base());
///
/// engine.assign_carry(&store, black, player).unwrap();
/// assert_eq!(engine.carrier_of(black), Some(player));
/// assert_eq!(store.get::<FlagCarryState>(player), Some(FlagCarryState::new(black)));
/// ```
#[derive(Debug)]
pub struct FlagStateEngine {
    slots: FxHashMap<TeamId, FlagSlot>,
}

impl FlagStateEngine {
    /// One flag per registered team, each starting at its base.
    #[must_use]
    pub fn new(registry: &TeamRegistry) -> Self {
        let slots = registry
            .iter()
            .map(|team| {
                let slot = FlagSlot {
                    base: team.base_location,
                    flag_block: team.flag_block.clone(),
                    marker: team.marker,
                    state: Mutex::new(FlagState {
                        location: FlagLocation::AtBase {
                            position: team.base_location,
                        },
                        history: Vector::new(),
                    }),
                };
                (team.id, slot)
            })
            .collect();

        Self { slots }
    }

    fn slot(&self, team: TeamId) -> Result<&FlagSlot, TransitionError> {
        self.slots.get(&team).ok_or(TransitionError::UnknownFlag(team))
    }

    // === Queries ===

    /// Teams with a flag, ascending.
    #[must_use]
    pub fn teams(&self) -> Vec<TeamId> {
        let mut teams: Vec<_> = self.slots.keys().copied().collect();
        teams.sort_unstable();
        teams
    }

    /// Current location of a team's flag.
    #[must_use]
    pub fn location(&self, team: TeamId) -> Option<FlagLocation> {
        self.slots.get(&team).map(|slot| slot.state.lock().location)
    }

    /// Current carrier of a team's flag.
    #[must_use]
    pub fn carrier_of(&self, team: TeamId) -> Option<EntityId> {
        self.location(team)?.carrier()
    }

    /// Committed transitions of a team's flag, oldest first.
    ///
    /// The returned vector shares structure with the engine's copy; cloning
    /// it is O(1).
    #[must_use]
    pub fn history(&self, team: TeamId) -> Option<Vector<TransitionRecord>> {
        self.slots.get(&team).map(|slot| slot.state.lock().history.clone())
    }

    /// Location of every flag. Each flag is read under its own lock, so the
    /// snapshot is consistent per flag, not across flags.
    #[must_use]
    pub fn snapshot(&self) -> FlagSnapshot {
        let flags = self
            .teams()
            .into_iter()
            .filter_map(|team| self.location(team).map(|location| (team, location)))
            .collect();
        FlagSnapshot { flags }
    }

    // === Transitions ===

    /// `AtBase | Dropped → Carried(player)`.
    ///
    /// Sets the player's [`FlagCarryState`] and attaches the flag's
    /// [`VisualMarker`]. Re-assigning a flag to its current carrier only
    /// re-asserts the marker.
    ///
    /// Fails if another entity carries the flag, or if the player carries a
    /// different flag (release that one first).
    pub fn assign_carry<S: ComponentStore + ?Sized>(
        &self,
        store: &S,
        team: TeamId,
        player: EntityId,
    ) -> Result<SideEffectBatch, TransitionError> {
        let slot = self.slot(team)?;
        let mut state = slot.state.lock();

        match state.location {
            FlagLocation::Carried { by } if by == player => {
                store.insert(player, VisualMarker::new(slot.marker));
                debug!(%team, %player, "flag already carried by this player");
                return Ok(SideEffectBatch::new());
            }
            FlagLocation::Carried { by } => {
                return Err(TransitionError::AlreadyCarried { team, carrier: by });
            }
            FlagLocation::AtBase { .. } | FlagLocation::Dropped { .. } => {}
        }

        if let Some(other) = store.get::<FlagCarryState>(player) {
            return Err(TransitionError::CarryingOther {
                entity: player,
                carrying: other.team,
            });
        }

        store.insert(player, FlagCarryState::new(team));
        store.insert(player, VisualMarker::new(slot.marker));
        let record = state.transition(team, FlagLocation::Carried { by: player }, TransitionCause::Pickup);
        info!(%team, %player, from = %record.from, sequence = record.sequence, "flag picked up");

        Ok(SideEffectBatch::new())
    }

    /// `Carried(carrier) → Dropped(at)`.
    ///
    /// Clears the carrier's [`FlagCarryState`] and [`VisualMarker`]. The
    /// drop request, if any, is returned for dispatch; pass `None` when the
    /// host already moved the item (the player threw it away).
    pub fn drop_carried<S: ComponentStore + ?Sized>(
        &self,
        store: &S,
        team: TeamId,
        carrier: EntityId,
        at: Vec3,
        request: Option<DropRequest>,
        cause: TransitionCause,
    ) -> Result<SideEffectBatch, TransitionError> {
        let slot = self.slot(team)?;
        let mut state = slot.state.lock();

        if state.location.carrier() != Some(carrier) {
            return Err(TransitionError::NotCarriedBy {
                team,
                entity: carrier,
            });
        }

        Self::clear_carrier(store, carrier, team);
        let record = state.transition(team, FlagLocation::Dropped { at }, cause);
        info!(%team, %carrier, %at, ?cause, sequence = record.sequence, "flag dropped");

        Ok(request.map(SideEffect::DropItem).into_iter().collect())
    }

    /// Any state `→ AtBase`.
    ///
    /// Clears the previous carrier's components, if any, and returns the
    /// block placement at base plus the optional item removal. A flag that
    /// is already at base is not recorded again, but the block and removal
    /// are still requested.
    pub fn return_to_base<S: ComponentStore + ?Sized>(
        &self,
        store: &S,
        team: TeamId,
        consumed: Option<RemoveRequest>,
        cause: TransitionCause,
    ) -> Result<SideEffectBatch, TransitionError> {
        let slot = self.slot(team)?;
        let mut state = slot.state.lock();
        Ok(Self::send_home(store, slot, &mut state, team, consumed, cause))
    }

    /// `Carried(carrier) → AtBase`, for a carried flag whose item is gone.
    ///
    /// Like [`return_to_base`](Self::return_to_base), but fails if the flag
    /// is no longer carried by `carrier`.
    pub fn reclaim_from<S: ComponentStore + ?Sized>(
        &self,
        store: &S,
        team: TeamId,
        carrier: EntityId,
        cause: TransitionCause,
    ) -> Result<SideEffectBatch, TransitionError> {
        let slot = self.slot(team)?;
        let mut state = slot.state.lock();

        if state.location.carrier() != Some(carrier) {
            return Err(TransitionError::NotCarriedBy {
                team,
                entity: carrier,
            });
        }
        Ok(Self::send_home(store, slot, &mut state, team, None, cause))
    }

    fn send_home<S: ComponentStore + ?Sized>(
        store: &S,
        slot: &FlagSlot,
        state: &mut FlagState,
        team: TeamId,
        consumed: Option<RemoveRequest>,
        cause: TransitionCause,
    ) -> SideEffectBatch {
        if let Some(carrier) = state.location.carrier() {
            Self::clear_carrier(store, carrier, team);
        }

        let home = FlagLocation::AtBase {
            position: slot.base,
        };
        if state.location != home {
            let record = state.transition(team, home, cause);
            info!(%team, from = %record.from, ?cause, sequence = record.sequence, "flag returned to base");
        }

        let mut batch = SideEffectBatch::new();
        batch.push(SideEffect::set_block(slot.base, slot.flag_block.clone()));
        if let Some(request) = consumed {
            batch.push(SideEffect::RemoveItem(request));
        }
        batch
    }

    /// Remove a [`VisualMarker`] that has no [`FlagCarryState`] behind it.
    ///
    /// Returns whether a marker was removed. A no-op on an entity with
    /// neither component, or with both.
    pub fn repair_stale_marker<S: ComponentStore + ?Sized>(&self, store: &S, entity: EntityId) -> bool {
        if store.has::<FlagCarryState>(entity) || !store.has::<VisualMarker>(entity) {
            return false;
        }

        store.remove::<VisualMarker>(entity);

        // A pickup may have landed between the checks and the removal.
        if let Some(carry) = store.get::<FlagCarryState>(entity) {
            if let Some(slot) = self.slots.get(&carry.team) {
                store.insert(entity, VisualMarker::new(slot.marker));
            }
            return false;
        }

        warn!(%entity, "removed marker without carried flag");
        true
    }

    /// Remove a [`FlagCarryState`] naming a flag the entity does not carry,
    /// along with its [`VisualMarker`].
    ///
    /// Covers carry states for unregistered teams and for flags whose
    /// location says otherwise. Returns whether anything was removed.
    pub fn repair_stale_carry<S: ComponentStore + ?Sized>(&self, store: &S, entity: EntityId) -> bool {
        let Some(carry) = store.get::<FlagCarryState>(entity) else {
            return false;
        };

        match self.slots.get(&carry.team) {
            Some(slot) => {
                let state = slot.state.lock();
                if state.location.carrier() == Some(entity) {
                    return false;
                }
                Self::clear_carrier(store, entity, carry.team);
            }
            None => {
                store.remove::<FlagCarryState>(entity);
                store.remove::<VisualMarker>(entity);
            }
        }

        warn!(%entity, team = %carry.team, "removed carry state without carried flag");
        true
    }

    fn clear_carrier<S: ComponentStore + ?Sized>(store: &S, carrier: EntityId, team: TeamId) {
        match store.get::<FlagCarryState>(carrier) {
            Some(carry) if carry.team == team => {
                store.remove::<FlagCarryState>(carrier);
                store.remove::<VisualMarker>(carrier);
            }
            other => {
                warn!(%team, %carrier, carrying = ?other.map(|c| c.team), "carrier components out of sync");
            }
        }
    }
}
