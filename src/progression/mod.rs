//! Ability tracks, the cubic experience curve, and the player's ledger.

pub mod ledger;
pub mod types;

pub use ledger::*;
pub use types::*;
