use crate::core::constants::*;
use crate::progression::AbilityType;
use serde::{Deserialize, Serialize};

/// What the player did during one battle, converted to ability experience
/// when the battle ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceTally {
    pub damage_dealt: u64,
    pub damage_taken: u64,
    pub mp_spent: u64,
    pub struggles: u64,
    pub items_used: u64,
}

impl ExperienceTally {
    /// Experience per ability. A victory adds `victory_bonus` to every
    /// ability that earned something.
    pub fn gains(&self, victory: bool, victory_bonus: u64) -> Vec<(AbilityType, u64)> {
        let raw = [
            (
                AbilityType::Combat,
                (self.damage_dealt as f64 * EXP_PER_DAMAGE_DEALT).floor() as u64,
            ),
            (
                AbilityType::Toughness,
                (self.damage_taken as f64 * EXP_PER_DAMAGE_TAKEN).floor() as u64,
            ),
            (
                AbilityType::Endurance,
                (self.mp_spent as f64 * EXP_PER_MP_SPENT).floor() as u64,
            ),
            (AbilityType::Agility, self.struggles * EXP_PER_STRUGGLE),
            (AbilityType::CraftWork, self.items_used * EXP_PER_ITEM_USE),
        ];

        raw.into_iter()
            .filter(|&(_, amount)| amount > 0)
            .map(|(ability, amount)| {
                let bonus = if victory { victory_bonus } else { 0 };
                (ability, amount + bonus)
            })
            .collect()
    }
}
