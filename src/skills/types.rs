use crate::progression::AbilityType;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Every player action, including the basic attack, defend and struggle
/// commands.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SkillId {
    BasicAttack,
    Defend,
    Struggle,
    PowerStrike,
    ShieldBash,
    SecondWind,
    EscapeArtist,
}

impl SkillId {
    pub fn all() -> Vec<SkillId> {
        SkillId::iter().collect()
    }

    /// Always-available commands that are not gated as skills.
    pub fn is_basic(&self) -> bool {
        matches!(self, SkillId::BasicAttack | SkillId::Defend | SkillId::Struggle)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SkillEffect {
    Attack {
        power: f64,
        guaranteed: bool,
    },
    /// Attack that may stun on a hit.
    Stun {
        power: f64,
        chance: f64,
        duration: u32,
    },
    Defend,
    /// Restores a fraction of max HP.
    Heal {
        fraction: f64,
    },
    Struggle {
        multiplier: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockGate {
    pub ability: AbilityType,
    pub level: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDefinition {
    pub id: SkillId,
    pub name: String,
    pub description: String,
    pub mp_cost: u32,
    pub unlock: Option<UnlockGate>,
    /// Still runs when MP is short, draining MP and doubling its multiplier.
    pub desperation: bool,
    /// Usable while restrained, eaten or cocooned.
    pub usable_while_bound: bool,
    pub hit_rate: f64,
    pub crit_rate: f64,
    pub variance: f64,
    pub effect: SkillEffect,
}

/// Result of resolving one skill, item or boss action.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillOutcome {
    pub success: bool,
    pub messages: Vec<String>,
    /// Damage dealt to the target, if the action attacked.
    pub damage: Option<u32>,
    pub heal: Option<u32>,
    /// MP actually paid. Zero when the cost could not be covered.
    pub mp_spent: u32,
    /// Whether a cost was attempted and fully paid.
    pub resource_consumed: bool,
    /// Power/struggle multiplier after MP escalation.
    pub multiplier: f64,
    pub missed: bool,
    pub critical: bool,
}

impl SkillOutcome {
    pub fn new() -> Self {
        Self {
            multiplier: 1.0,
            ..Self::default()
        }
    }

    pub fn say(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_skill_ids_parse() {
        assert_eq!(SkillId::from_str("power_strike").unwrap(), SkillId::PowerStrike);
        assert_eq!(SkillId::EscapeArtist.to_string(), "escape_artist");
        assert!(SkillId::from_str("Power Strike").is_err());
    }

    #[test]
    fn test_basic_commands() {
        assert!(SkillId::BasicAttack.is_basic());
        assert!(SkillId::Struggle.is_basic());
        assert!(!SkillId::ShieldBash.is_basic());
    }
}
