use super::types::*;
use crate::core::constants::KNOCKOUT_REVIVE_FRACTION;
use std::collections::HashMap;

/// Lookup table of effect definitions, built once and shared by reference.
#[derive(Debug, Clone, Default)]
pub struct StatusEffectCatalog {
    definitions: HashMap<StatusEffectType, StatusEffectDefinition>,
}

impl StatusEffectCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Adds or replaces a definition.
    pub fn with_definition(mut self, definition: StatusEffectDefinition) -> Self {
        self.insert(definition);
        self
    }

    pub fn insert(&mut self, definition: StatusEffectDefinition) {
        self.definitions.insert(definition.effect_type, definition);
    }

    pub fn get(&self, effect_type: StatusEffectType) -> Option<&StatusEffectDefinition> {
        self.definitions.get(&effect_type)
    }

    pub fn contains(&self, effect_type: StatusEffectType) -> bool {
        self.definitions.contains_key(&effect_type)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// The stock effect set used by the sample content.
    pub fn standard() -> Self {
        use StatusEffectType::*;

        let mut catalog = Self::empty();

        // Guarding halves incoming damage until the end of the round.
        catalog.insert(
            StatusEffectDefinition::new(Defending, "Defending", 1)
                .describe("Bracing for impact")
                .modifiers(EffectModifiers {
                    damage_received: Some(0.5),
                    ..EffectModifiers::none()
                })
                .apply_message("You brace yourself.", "{name} takes a defensive stance.")
                .remove_message("", ""),
        );

        catalog.insert(
            StatusEffectDefinition::new(Stunned, "Stunned", 1)
                .describe("Cannot act")
                .debuff()
                .modifiers(EffectModifiers::incapacitating())
                .apply_message("You are stunned!", "{name} is stunned!")
                .remove_message("You shake off the stun.", "{name} recovers from the stun."),
        );

        catalog.insert(
            StatusEffectDefinition::new(Sleeping, "Sleeping", 2)
                .describe("Fast asleep")
                .debuff()
                .modifiers(EffectModifiers {
                    damage_received: Some(1.25),
                    ..EffectModifiers::incapacitating()
                })
                .apply_message("You fall asleep...", "{name} falls asleep.")
                .remove_message("You wake up.", "{name} wakes up."),
        );

        catalog.insert(
            StatusEffectDefinition::new(Restrained, "Restrained", 0)
                .describe("Held fast; can only struggle")
                .debuff()
                .modifiers(EffectModifiers::binding())
                .apply_message("You are pinned down!", "{name} is pinned down!")
                .remove_message("You break free!", "{name} breaks free!"),
        );

        catalog.insert(
            StatusEffectDefinition::new(Eaten, "Eaten", 0)
                .describe("Swallowed whole; no regeneration")
                .debuff()
                .modifiers(EffectModifiers {
                    hp_regen: Some(0.0),
                    mp_regen: Some(0.0),
                    ..EffectModifiers::binding()
                })
                .on_tick(TickHook::Damage(4))
                .apply_message("You have been swallowed!", "{name} has been swallowed!")
                .tick_message(
                    "Digestive juices sting you for {amount} damage.",
                    "{name} is digested for {amount} damage.",
                )
                .remove_message("You escape into the open air!", "{name} escapes!"),
        );

        catalog.insert(
            StatusEffectDefinition::new(Cocoon, "Cocoon", 0)
                .describe("Wrapped in silk")
                .debuff()
                .modifiers(EffectModifiers {
                    attack: Some(0.5),
                    ..EffectModifiers::binding()
                })
                .apply_message("You are wrapped in a cocoon!", "{name} is wrapped in a cocoon!")
                .remove_message("You tear through the cocoon!", "{name} tears free!"),
        );

        catalog.insert(
            StatusEffectDefinition::new(Charmed, "Charmed", 3)
                .describe("Will to resist is weakened")
                .debuff()
                .modifiers(EffectModifiers {
                    struggle: Some(0.5),
                    accuracy: Some(0.8),
                    ..EffectModifiers::none()
                })
                .apply_message("Your mind grows hazy...", "{name} looks dazed.")
                .remove_message("Your head clears.", "{name} snaps out of it."),
        );

        catalog.insert(
            StatusEffectDefinition::new(Poisoned, "Poisoned", 3)
                .describe("Loses HP every round")
                .debuff()
                .potency(5)
                .on_tick(TickHook::PotencyDamage)
                .apply_message("You are poisoned!", "{name} is poisoned!")
                .tick_message(
                    "Poison deals {amount} damage to you.",
                    "Poison deals {amount} damage to {name}.",
                ),
        );

        catalog.insert(
            StatusEffectDefinition::new(Burning, "Burning", 2)
                .describe("On fire")
                .debuff()
                .on_tick(TickHook::Damage(8))
                .modifiers(EffectModifiers {
                    attack: Some(0.9),
                    ..EffectModifiers::none()
                })
                .apply_message("You catch fire!", "{name} catches fire!")
                .tick_message(
                    "Flames sear you for {amount} damage.",
                    "Flames sear {name} for {amount} damage.",
                ),
        );

        catalog.insert(
            StatusEffectDefinition::new(Weakened, "Weakened", 3)
                .describe("Attack halved")
                .debuff()
                .modifiers(EffectModifiers {
                    attack: Some(0.5),
                    ..EffectModifiers::none()
                })
                .apply_message("Your strength drains away.", "{name} looks weaker."),
        );

        catalog.insert(
            StatusEffectDefinition::new(Vulnerable, "Vulnerable", 3)
                .describe("Takes 50% more damage")
                .debuff()
                .modifiers(EffectModifiers {
                    damage_received: Some(1.5),
                    ..EffectModifiers::none()
                })
                .apply_message("Your guard is broken!", "{name}'s guard is broken!"),
        );

        catalog.insert(
            StatusEffectDefinition::new(Dizzy, "Dizzy", 2)
                .describe("Accuracy halved")
                .debuff()
                .modifiers(EffectModifiers {
                    accuracy: Some(0.5),
                    ..EffectModifiers::none()
                })
                .apply_message("The world spins around you.", "{name} staggers dizzily."),
        );

        catalog.insert(
            StatusEffectDefinition::new(Exhausted, "Exhausted", 3)
                .describe("Overexerted: weaker attacks, slower MP recovery")
                .debuff()
                .modifiers(EffectModifiers {
                    attack: Some(0.8),
                    mp_regen: Some(0.5),
                    ..EffectModifiers::none()
                })
                .apply_message("You are exhausted!", "{name} is exhausted!")
                .remove_message("You catch your breath.", "{name} catches its breath."),
        );

        catalog.insert(
            StatusEffectDefinition::new(Empowered, "Empowered", 3)
                .describe("Attack increased by 50%")
                .modifiers(EffectModifiers {
                    attack: Some(1.5),
                    ..EffectModifiers::none()
                })
                .apply_message("Power surges through you!", "{name} surges with power!"),
        );

        catalog.insert(
            StatusEffectDefinition::new(Regenerating, "Regenerating", 3)
                .describe("Recovers HP every round")
                .on_tick(TickHook::Regenerate(10))
                .apply_message("You feel your wounds closing.", "{name}'s wounds begin to close.")
                .tick_message("You regenerate {amount} HP.", "{name} regenerates {amount} HP."),
        );

        catalog.insert(
            StatusEffectDefinition::new(KnockedOut, "Knocked Out", 3)
                .describe("Unconscious")
                .debuff()
                .modifiers(EffectModifiers::incapacitating())
                .on_remove(RemoveHook::ReviveFraction(KNOCKOUT_REVIVE_FRACTION))
                .apply_message("You collapse!", "{name} collapses!")
                .remove_message("You come to your senses.", "{name} gets back up."),
        );

        catalog.insert(
            StatusEffectDefinition::new(Doomed, "Doomed", 0)
                .describe("Nothing left to lose")
                .modifiers(EffectModifiers::incapacitating())
                .apply_message(
                    "Your body has nothing left to give. You are doomed.",
                    "{name} is doomed.",
                ),
        );

        catalog.insert(
            StatusEffectDefinition::new(Dead, "Dead", 0)
                .describe("The end")
                .modifiers(EffectModifiers::incapacitating())
                .apply_message("Everything goes dark.", "{name} has fallen for good."),
        );

        catalog
    }
}
