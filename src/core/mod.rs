//! Shared engine plumbing: tuning constants, runtime config, the hit law and
//! error types.

pub mod combat_math;
pub mod config;
pub mod constants;
pub mod error;

pub use config::BattleConfig;
pub use error::{ActionRejected, BattleError, CatalogError};
