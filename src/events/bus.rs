//! Event bus.
//!
//! Handlers are indexed by [`EventKind`] and run in subscription order.
//! Publishing is synchronous: every handler has returned before `publish`
//! does.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::host::HostContext;

use super::event::{EventKind, GameEvent};

/// Identifier returned by [`EventBus::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandlerId(pub u32);

impl HandlerId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for HandlerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Handler({})", self.0)
    }
}

/// Event handler. Receives the event and the host capabilities for it.
pub type EventHandler = Box<dyn Fn(&GameEvent, &HostContext<'_>) + Send + Sync>;

/// Handler registry and dispatcher.
///
/// ## Example
///
/// ```
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// use rust_ctf::components::EntityStore;
/// use rust_ctf::core::EntityId;
/// use rust_ctf::events::{EventBus, EventKind, GameEvent};
/// use rust_ctf::host::{HostContext, MemoryInventory, MemoryWorld};
///
/// let hits = Arc::new(AtomicUsize::new(0));
/// let mut bus = EventBus::new();
/// let counter = Arc::clone(&hits);
/// bus.subscribe(EventKind::Activate, move |_, _| {
///     counter.fetch_add(1, Ordering::Relaxed);
/// });
///
/// let (store, inventory, world) = (EntityStore::new(), MemoryInventory::new(), MemoryWorld::new());
/// let ctx = HostContext::new(&store, &inventory, &world);
///
/// assert_eq!(bus.publish(&GameEvent::activate(EntityId(1), EntityId(2)), &ctx), 1);
/// assert_eq!(bus.publish(&GameEvent::item_acquired(EntityId(1), EntityId(3)), &ctx), 0);
/// assert_eq!(hits.load(Ordering::Relaxed), 1);
/// ```
#[derive(Default)]
pub struct EventBus {
    handlers: FxHashMap<EventKind, Vec<(HandlerId, EventHandler)>>,
    next_id: u32,
}

impl EventBus {
    /// Create a bus with no handlers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for one event kind.
    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F) -> HandlerId
    where
        F: Fn(&GameEvent, &HostContext<'_>) + Send + Sync + 'static,
    {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.handlers
            .entry(kind)
            .or_default()
            .push((id, Box::new(handler)));
        id
    }

    /// Remove a handler. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: HandlerId) -> bool {
        for handlers in self.handlers.values_mut() {
            if let Some(index) = handlers.iter().position(|(h, _)| *h == id) {
                handlers.remove(index);
                return true;
            }
        }
        false
    }

    /// Deliver an event to every handler of its kind. Returns how many ran.
    pub fn publish(&self, event: &GameEvent, ctx: &HostContext<'_>) -> usize {
        let Some(handlers) = self.handlers.get(&event.kind()) else {
            trace!(kind = %event.kind(), "no handlers");
            return 0;
        };

        for (_, handler) in handlers {
            handler(event, ctx);
        }
        handlers.len()
    }

    /// Number of handlers registered for a kind.
    #[must_use]
    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut counts: Vec<_> = self
            .handlers
            .iter()
            .map(|(kind, handlers)| (*kind, handlers.len()))
            .collect();
        counts.sort_by_key(|(kind, _)| *kind as u8);
        f.debug_struct("EventBus").field("handlers", &counts).finish()
    }
}
