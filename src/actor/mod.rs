//! Battle participants: shared combatant state plus the player and boss
//! variants, each rebuilding its stats from its own [`StatSource`].

pub mod boss;
pub mod combatant;
pub mod player;
pub mod stats;
pub mod vitals;

pub use boss::BossActor;
pub use combatant::CombatantState;
pub use player::{PlayerActor, PlayerLoadout};
pub use stats::{BaseStats, StatSource};
pub use vitals::Vitals;
