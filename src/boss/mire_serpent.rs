//! Sample boss: a swamp serpent that pins, swallows and slowly digests its
//! prey.

use super::definition::{BossActionDef, BossActionKind, BossDefinition};
use super::selector::{SelectCondition, WeightedSelector};
use crate::status::StatusEffectType;

pub const ID: &str = "mire_serpent";

pub fn definition() -> BossDefinition {
    use BossActionKind::*;

    BossDefinition {
        id: ID.to_string(),
        name: "Mire Serpent".to_string(),
        max_hp: 400,
        max_mp: 60,
        attack_power: 22,
        defense: 6,
        actions: vec![
            BossActionDef::new("bite", "Bite", Attack { power: 1.0 }, "{name} lunges with its fangs!")
                .hit_rate(0.9)
                .crit_rate(0.1),
            BossActionDef::new(
                "tail_sweep",
                "Tail Sweep",
                Inflict {
                    power: 0.8,
                    effect: StatusEffectType::Dizzy,
                    chance: 0.5,
                    duration: None,
                },
                "{name} sweeps its tail through the muck!",
            ),
            BossActionDef::new(
                "venom_fang",
                "Venom Fang",
                Inflict {
                    power: 0.6,
                    effect: StatusEffectType::Poisoned,
                    chance: 0.7,
                    duration: None,
                },
                "{name} strikes with dripping fangs!",
            )
            .mp_cost(10),
            BossActionDef::new(
                "hypnotic_gaze",
                "Hypnotic Gaze",
                Inflict {
                    power: 0.0,
                    effect: StatusEffectType::Charmed,
                    chance: 0.8,
                    duration: None,
                },
                "{name} fixes you with swaying, golden eyes...",
            )
            .mp_cost(15),
            // A dazing headbutt. Two turns so the stun outlasts this round's decay.
            BossActionDef::new(
                "skull_bash",
                "Skull Bash",
                Inflict {
                    power: 1.2,
                    effect: StatusEffectType::Stunned,
                    chance: 0.35,
                    duration: Some(2),
                },
                "{name} rears back and slams its skull down!",
            )
            .hit_rate(0.8),
            BossActionDef::new("coil", "Coil", Restrain { power: 0.5 }, "{name} coils around you!")
                .hit_rate(0.75),
            BossActionDef::new("constrict", "Constrict", Attack { power: 0.7 }, "{name} squeezes!")
                .guaranteed(),
            BossActionDef::new("swallow", "Swallow", Swallow, "{name} unhinges its jaw...")
                .hit_rate(0.85),
            BossActionDef::new(
                "digest",
                "Digest",
                Devour { max_hp_loss: 25 },
                "{name}'s gullet churns around you.",
            )
            .guaranteed(),
            BossActionDef::new("shed_skin", "Shed Skin", HealSelf { fraction: 0.1 }, "{name} sheds its skin!")
                .mp_cost(20),
            BossActionDef::new("bask", "Bask", Idle, "{name} basks lazily in the mud."),
        ],
        intro: vec![
            "The bog water ripples.".to_string(),
            "A Mire Serpent rises from the muck, hissing!".to_string(),
        ],
        finishing: vec![
            "The Mire Serpent's gullet clenches one final time.".to_string(),
            "Your strength is gone. The serpent slips back beneath the bog.".to_string(),
        ],
    }
}

pub fn selector() -> WeightedSelector {
    use SelectCondition::*;

    WeightedSelector::new()
        .rule("bite", 4, PlayerFree)
        .rule("tail_sweep", 2, PlayerFree)
        .rule("venom_fang", 2, PlayerFree)
        .rule("hypnotic_gaze", 1, PlayerFree)
        .rule("skull_bash", 1, PlayerFree)
        .rule("coil", 2, PlayerFree)
        .rule("shed_skin", 1, FromRound(6))
        .rule("bask", 1, Always)
        .rule("constrict", 2, PlayerRestrained)
        .rule("swallow", 3, PlayerRestrained)
        .rule("swallow", 3, PlayerKnockedOut)
        .rule("digest", 4, PlayerEaten)
}
