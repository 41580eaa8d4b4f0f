//! Action resolution: player skills, consumables and boss actions, all
//! reporting through [`SkillOutcome`].

pub mod boss_actions;
pub mod catalog;
pub mod resolve;
pub mod types;

pub use boss_actions::resolve_boss_action;
pub use catalog::SkillCatalog;
pub use resolve::*;
pub use types::*;
