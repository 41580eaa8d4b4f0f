//! Gear and consumable catalogs.

pub mod consumables;
pub mod equipment;

pub use consumables::*;
pub use equipment::*;
