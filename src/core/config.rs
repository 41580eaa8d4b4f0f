//! Runtime-tunable battle parameters.
//!
//! Defaults come from [`crate::core::constants`]. Callers that want to tune
//! balance without recompiling can deserialize a [`BattleConfig`] from JSON;
//! every field is optional in the file and falls back to its default.

use super::constants::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Crit damage multiplier shared by every attack path.
    pub crit_multiplier: f64,
    /// Variance used by basic attacks (fraction, e.g. 0.2 = ±20%).
    pub attack_variance: f64,
    pub struggle_base_rate: f64,
    pub struggle_rate_per_failure: f64,
    /// Hard ceiling on struggle success probability.
    pub struggle_rate_cap: f64,
    pub struggle_agility_bonus_per_level: f64,
    /// Attempt-counter increment for a failed struggle paid without MP.
    pub struggle_exhausted_failure_weight: u32,
    pub escape_recovery_min_agility: u32,
    pub escape_recovery_ratio: f64,
    pub desperation_multiplier: f64,
    pub victory_bonus_exp: u64,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            crit_multiplier: DEFAULT_CRIT_MULTIPLIER,
            attack_variance: DEFAULT_DAMAGE_VARIANCE,
            struggle_base_rate: STRUGGLE_BASE_RATE,
            struggle_rate_per_failure: STRUGGLE_RATE_PER_FAILURE,
            struggle_rate_cap: STRUGGLE_RATE_CAP,
            struggle_agility_bonus_per_level: STRUGGLE_AGILITY_BONUS_PER_LEVEL,
            struggle_exhausted_failure_weight: STRUGGLE_EXHAUSTED_FAILURE_WEIGHT,
            escape_recovery_min_agility: ESCAPE_RECOVERY_MIN_AGILITY,
            escape_recovery_ratio: ESCAPE_RECOVERY_RATIO,
            desperation_multiplier: DESPERATION_MULTIPLIER,
            victory_bonus_exp: VICTORY_BONUS_EXP,
        }
    }
}

impl BattleConfig {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}
