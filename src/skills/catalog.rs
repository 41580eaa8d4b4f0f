use super::types::*;
use crate::core::constants::{DEFAULT_CRIT_RATE, DEFAULT_DAMAGE_VARIANCE, DEFAULT_HIT_RATE};
use crate::progression::AbilityType;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct SkillCatalog {
    skills: HashMap<SkillId, SkillDefinition>,
}

impl SkillCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, definition: SkillDefinition) {
        self.skills.insert(definition.id, definition);
    }

    pub fn get(&self, id: SkillId) -> Option<&SkillDefinition> {
        self.skills.get(&id)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn standard() -> Self {
        let mut catalog = Self::empty();

        catalog.insert(skill(
            SkillId::BasicAttack,
            "Attack",
            "A plain weapon strike.",
            0,
            None,
            SkillEffect::Attack {
                power: 1.0,
                guaranteed: false,
            },
        ));
        catalog.insert(skill(
            SkillId::Defend,
            "Defend",
            "Halve incoming damage until the end of the round.",
            0,
            None,
            SkillEffect::Defend,
        ));
        catalog.insert(SkillDefinition {
            usable_while_bound: true,
            ..skill(
                SkillId::Struggle,
                "Struggle",
                "Try to break free.",
                0,
                None,
                SkillEffect::Struggle { multiplier: 1.0 },
            )
        });
        catalog.insert(SkillDefinition {
            crit_rate: 0.15,
            ..skill(
                SkillId::PowerStrike,
                "Power Strike",
                "A heavy blow that never misses.",
                15,
                Some((AbilityType::Combat, 3)),
                SkillEffect::Attack {
                    power: 1.8,
                    guaranteed: true,
                },
            )
        });
        catalog.insert(SkillDefinition {
            hit_rate: 0.85,
            ..skill(
                SkillId::ShieldBash,
                "Shield Bash",
                "A stunning shove.",
                12,
                Some((AbilityType::Toughness, 2)),
                SkillEffect::Stun {
                    power: 0.8,
                    chance: 0.5,
                    duration: 1,
                },
            )
        });
        catalog.insert(skill(
            SkillId::SecondWind,
            "Second Wind",
            "Recover a quarter of your health.",
            20,
            Some((AbilityType::Endurance, 2)),
            SkillEffect::Heal { fraction: 0.25 },
        ));
        catalog.insert(SkillDefinition {
            desperation: true,
            usable_while_bound: true,
            ..skill(
                SkillId::EscapeArtist,
                "Escape Artist",
                "A practiced wriggle. Pushes harder when out of breath.",
                10,
                Some((AbilityType::Agility, 2)),
                SkillEffect::Struggle { multiplier: 1.5 },
            )
        });

        catalog
    }
}

fn skill(
    id: SkillId,
    name: &str,
    description: &str,
    mp_cost: u32,
    unlock: Option<(AbilityType, u32)>,
    effect: SkillEffect,
) -> SkillDefinition {
    SkillDefinition {
        id,
        name: name.to_string(),
        description: description.to_string(),
        mp_cost,
        unlock: unlock.map(|(ability, level)| UnlockGate { ability, level }),
        desperation: false,
        usable_while_bound: false,
        hit_rate: DEFAULT_HIT_RATE,
        crit_rate: DEFAULT_CRIT_RATE,
        variance: DEFAULT_DAMAGE_VARIANCE,
        effect,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_has_every_skill() {
        let catalog = SkillCatalog::standard();
        for id in SkillId::all() {
            assert!(catalog.get(id).is_some(), "missing {id}");
        }
    }

    #[test]
    fn test_basic_commands_are_free_and_ungated() {
        let catalog = SkillCatalog::standard();
        for id in SkillId::all().into_iter().filter(SkillId::is_basic) {
            let def = catalog.get(id).unwrap();
            assert_eq!(def.mp_cost, 0);
            assert!(def.unlock.is_none());
        }
    }

    #[test]
    fn test_only_struggles_work_while_bound() {
        let catalog = SkillCatalog::standard();
        for id in SkillId::all() {
            let def = catalog.get(id).unwrap();
            let is_struggle = matches!(def.effect, SkillEffect::Struggle { .. });
            assert_eq!(def.usable_while_bound, is_struggle, "{id}");
        }
    }
}
