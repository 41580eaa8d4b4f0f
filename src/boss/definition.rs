use crate::actor::{BaseStats, StatSource};
use crate::core::constants::{DEFAULT_CRIT_RATE, DEFAULT_DAMAGE_VARIANCE, DEFAULT_HIT_RATE};
use crate::core::CatalogError;
use crate::status::StatusEffectType;
use serde::{Deserialize, Serialize};

/// What a boss action does once it lands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BossActionKind {
    Attack {
        power: f64,
    },
    /// Optional damage (`power` 0 skips it) plus a chance to inflict an effect.
    Inflict {
        power: f64,
        effect: StatusEffectType,
        chance: f64,
        duration: Option<u32>,
    },
    Restrain {
        power: f64,
    },
    /// Converts a restraint into Eaten.
    Swallow,
    /// Drains max HP from an eaten player and heals the boss by the same.
    Devour {
        max_hp_loss: u32,
    },
    Cocoon,
    HealSelf {
        fraction: f64,
    },
    Idle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossActionDef {
    pub id: String,
    pub name: String,
    pub kind: BossActionKind,
    pub hit_rate: f64,
    pub crit_rate: f64,
    pub variance: f64,
    pub guaranteed: bool,
    pub mp_cost: u32,
    /// Opening line; `{name}` is the boss.
    pub announce: String,
}

impl BossActionDef {
    pub fn new(id: &str, name: &str, kind: BossActionKind, announce: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            hit_rate: DEFAULT_HIT_RATE,
            crit_rate: DEFAULT_CRIT_RATE,
            variance: DEFAULT_DAMAGE_VARIANCE,
            guaranteed: false,
            mp_cost: 0,
            announce: announce.to_string(),
        }
    }

    pub fn hit_rate(mut self, hit_rate: f64) -> Self {
        self.hit_rate = hit_rate;
        self
    }

    pub fn crit_rate(mut self, crit_rate: f64) -> Self {
        self.crit_rate = crit_rate;
        self
    }

    pub fn variance(mut self, variance: f64) -> Self {
        self.variance = variance;
        self
    }

    pub fn guaranteed(mut self) -> Self {
        self.guaranteed = true;
        self
    }

    pub fn mp_cost(mut self, mp_cost: u32) -> Self {
        self.mp_cost = mp_cost;
        self
    }
}

/// Static description of a boss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossDefinition {
    pub id: String,
    pub name: String,
    pub max_hp: u32,
    pub max_mp: u32,
    pub attack_power: u32,
    pub defense: u32,
    pub actions: Vec<BossActionDef>,
    pub intro: Vec<String>,
    /// Played once when a doomed player is finished off.
    pub finishing: Vec<String>,
}

impl BossDefinition {
    pub fn action(&self, id: &str) -> Result<&BossActionDef, CatalogError> {
        self.actions
            .iter()
            .find(|a| a.id == id)
            .ok_or_else(|| CatalogError::UnknownBossAction {
                boss: self.name.clone(),
                action: id.to_string(),
            })
    }
}

impl StatSource for BossDefinition {
    fn base_stats(&self) -> BaseStats {
        BaseStats {
            max_hp: self.max_hp,
            max_mp: self.max_mp,
            attack_power: self.attack_power,
            defense: self.defense,
        }
    }
}
