//! Boss content: static definitions, the action-selection seam and the sample
//! boss.

pub mod definition;
pub mod mire_serpent;
pub mod selector;

pub use definition::*;
pub use selector::*;
