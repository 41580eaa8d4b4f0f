//! Turn/round state machine: player commands, the boss turn, round-end
//! processing and end-of-battle experience.

pub mod round;
pub mod session;
pub mod tally;
pub mod types;

pub use session::BattleSession;
pub use tally::ExperienceTally;
pub use types::*;
