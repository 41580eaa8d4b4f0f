/// Max stats an actor is rebuilt from at battle start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BaseStats {
    pub max_hp: u32,
    pub max_mp: u32,
    pub attack_power: u32,
    pub defense: u32,
}

/// Where an actor's max stats come from. The player derives them from ability
/// levels and gear; a boss reads its static definition.
pub trait StatSource {
    fn base_stats(&self) -> BaseStats;
}

impl StatSource for BaseStats {
    fn base_stats(&self) -> BaseStats {
        *self
    }
}
