use serde::{Deserialize, Serialize};

/// HP/MP pool of an actor. Every writer keeps `hp <= max_hp` and
/// `mp <= max_mp`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vitals {
    pub hp: u32,
    pub max_hp: u32,
    pub mp: u32,
    pub max_mp: u32,
}

impl Vitals {
    pub fn full(max_hp: u32, max_mp: u32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            mp: max_mp,
            max_mp,
        }
    }

    pub fn lose_hp(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    pub fn gain_hp(&mut self, amount: u32) {
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
    }

    pub fn lose_mp(&mut self, amount: u32) {
        self.mp = self.mp.saturating_sub(amount);
    }

    pub fn gain_mp(&mut self, amount: u32) {
        self.mp = self.mp.saturating_add(amount).min(self.max_mp);
    }

    pub fn hp_fraction(&self) -> f64 {
        if self.max_hp == 0 {
            return 0.0;
        }
        self.hp as f64 / self.max_hp as f64
    }
}
