//! Status effects: the closed set of effect types, the definition catalog,
//! and the per-actor manager that composes their modifiers.

pub mod catalog;
pub mod manager;
pub mod types;

pub use catalog::*;
pub use manager::*;
pub use types::*;
