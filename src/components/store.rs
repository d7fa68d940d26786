//! Entity & component storage.
//!
//! [`ComponentStore`] is the capability the host provides: has/get/insert/
//! remove by [`ComponentKind`]. Methods take `&self` because host entity
//! managers are shared between event handlers; implementations provide
//! their own interior mutability.
//!
//! [`ComponentStoreExt`] layers the typed interface on top, so rule code
//! reads `store.get::<TeamTag>(player)` instead of matching on
//! [`Component`].
//!
//! [`EntityStore`] is a thread-safe in-memory implementation for tests and
//! simple hosts.

use std::sync::atomic::{AtomicU32, Ordering};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::core::EntityId;

use super::component::{Component, ComponentData, ComponentKind};

/// Host-provided component access.
pub trait ComponentStore: Send + Sync {
    /// Whether `entity` has a component of `kind`.
    fn contains(&self, entity: EntityId, kind: ComponentKind) -> bool;

    /// Copy of the component of `kind` on `entity`.
    fn component(&self, entity: EntityId, kind: ComponentKind) -> Option<Component>;

    /// Add or replace a component, returning the previous value.
    fn insert_component(&self, entity: EntityId, component: Component) -> Option<Component>;

    /// Remove a component, returning it.
    fn remove_component(&self, entity: EntityId, kind: ComponentKind) -> Option<Component>;
}

/// Typed access over any [`ComponentStore`].
///
/// ```
/// use rust_ctf::components::{ComponentStoreExt, EntityStore, TeamTag};
/// use rust_ctf::core::TeamId;
///
/// let store = EntityStore::new();
/// let player = store.spawn();
///
/// assert!(!store.has::<TeamTag>(player));
/// store.insert(player, TeamTag::new(TeamId::new(0)));
/// assert_eq!(store.get::<TeamTag>(player), Some(TeamTag::new(TeamId::new(0))));
/// ```
pub trait ComponentStoreExt: ComponentStore {
    /// Whether `entity` has a `T`.
    fn has<T: ComponentData>(&self, entity: EntityId) -> bool {
        self.contains(entity, T::KIND)
    }

    /// Copy of `entity`'s `T`.
    fn get<T: ComponentData>(&self, entity: EntityId) -> Option<T> {
        self.component(entity, T::KIND).and_then(T::from_component)
    }

    /// Add or replace `entity`'s `T`, returning the previous value.
    fn insert<T: ComponentData>(&self, entity: EntityId, value: T) -> Option<T> {
        self.insert_component(entity, value.into())
            .and_then(T::from_component)
    }

    /// Remove `entity`'s `T`, returning it.
    fn remove<T: ComponentData>(&self, entity: EntityId) -> Option<T> {
        self.remove_component(entity, T::KIND).and_then(T::from_component)
    }
}

impl<S: ComponentStore + ?Sized> ComponentStoreExt for S {}

type ComponentMap = FxHashMap<ComponentKind, Component>;

/// In-memory, thread-safe component store.
///
/// Entity ids are allocated sequentially starting at 1.
#[derive(Debug)]
pub struct EntityStore {
    entities: RwLock<FxHashMap<EntityId, ComponentMap>>,
    next_id: AtomicU32,
}

impl Default for EntityStore {
    fn default() -> Self {
        Self {
            entities: RwLock::new(FxHashMap::default()),
            next_id: AtomicU32::new(1),
        }
    }
}

impl EntityStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new entity with no components.
    pub fn spawn(&self) -> EntityId {
        let id = EntityId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.entities.write().insert(id, ComponentMap::default());
        id
    }

    /// Allocate a new entity with the given components.
    pub fn spawn_with(&self, components: impl IntoIterator<Item = Component>) -> EntityId {
        let id = self.spawn();
        let mut entities = self.entities.write();
        let map = entities.entry(id).or_default();
        for component in components {
            map.insert(component.kind(), component);
        }
        id
    }

    /// Destroy an entity and all its components.
    pub fn despawn(&self, entity: EntityId) -> bool {
        self.entities.write().remove(&entity).is_some()
    }

    /// Check if an entity exists.
    #[must_use]
    pub fn exists(&self, entity: EntityId) -> bool {
        self.entities.read().contains_key(&entity)
    }

    /// Number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.read().len()
    }

    /// Check if the store holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.read().is_empty()
    }

    /// Copy of all components on an entity, ordered by kind.
    #[must_use]
    pub fn components_of(&self, entity: EntityId) -> Vec<Component> {
        let entities = self.entities.read();
        let mut components: Vec<_> = entities
            .get(&entity)
            .map(|map| map.values().cloned().collect())
            .unwrap_or_default();
        components.sort_by_key(Component::kind);
        components
    }
}

impl ComponentStore for EntityStore {
    fn contains(&self, entity: EntityId, kind: ComponentKind) -> bool {
        self.entities
            .read()
            .get(&entity)
            .is_some_and(|map| map.contains_key(&kind))
    }

    fn component(&self, entity: EntityId, kind: ComponentKind) -> Option<Component> {
        self.entities.read().get(&entity)?.get(&kind).cloned()
    }

    /// Inserting on an unknown entity creates it, the way host entity
    /// managers accept components for handles they were just given.
    fn insert_component(&self, entity: EntityId, component: Component) -> Option<Component> {
        self.entities
            .write()
            .entry(entity)
            .or_default()
            .insert(component.kind(), component)
    }

    fn remove_component(&self, entity: EntityId, kind: ComponentKind) -> Option<Component> {
        self.entities.write().get_mut(&entity)?.remove(&kind)
    }
}
