//! Capture-the-flag rule evaluators.
//!
//! - [`AttackRules`]: an authorized hit knocks a carried flag loose
//! - [`PickupRules`]: flags entering or leaving an inventory
//! - [`FlagGame`]: both evaluators over one match, with event bus wiring
//!
//! Evaluators never fail outward. Every evaluation returns a
//! [`RuleOutcome`]; refused transitions come back as
//! [`RuleOutcome::Ignored`] and are logged.

mod attack;
mod game;
mod outcome;
mod pickup;
mod release;

pub use attack::AttackRules;
pub use game::FlagGame;
pub use outcome::{IgnoreReason, RuleOutcome};
pub use pickup::PickupRules;
pub use release::find_flag_item;
