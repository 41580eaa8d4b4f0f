//! Bossfight - turn-based boss battle engine.
//!
//! Resolves one player against one boss, round by round: status effects with
//! composable modifiers, skills with MP escalation, restraint and struggle
//! mechanics, and ability progression fed by what happened in the fight.
//!
//! ```no_run
//! use bossfight::actor::{PlayerActor, PlayerLoadout};
//! use bossfight::battle::BattleSession;
//! use bossfight::boss::mire_serpent;
//! use bossfight::catalog::Catalogs;
//! use bossfight::core::BattleConfig;
//! use rand::SeedableRng;
//! use std::sync::Arc;
//!
//! let catalogs = Arc::new(Catalogs::standard());
//! let player = PlayerActor::new("Hero", PlayerLoadout::default(), Arc::clone(&catalogs.status));
//! let mut battle = BattleSession::new(
//!     player,
//!     Arc::new(mire_serpent::definition()),
//!     Box::new(mire_serpent::selector()),
//!     catalogs,
//!     BattleConfig::default(),
//! );
//! let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(7);
//! battle.start().unwrap();
//! battle.player_attack(&mut rng).unwrap();
//! battle.boss_turn(&mut rng).unwrap();
//! ```

pub mod actor;
pub mod battle;
pub mod boss;
pub mod build_info;
pub mod catalog;
pub mod core;
pub mod items;
pub mod progression;
pub mod skills;
pub mod status;
