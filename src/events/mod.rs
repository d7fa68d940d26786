//! Host events and the bus that delivers them.
//!
//! - `GameEvent`: activation (attack) and inventory slot changes
//! - `EventKind`: the tag handlers subscribe by
//! - `EventBus`: explicit handler registration and synchronous dispatch

mod bus;
mod event;

pub use bus::{EventBus, EventHandler, HandlerId};
pub use event::{EventKind, GameEvent};
