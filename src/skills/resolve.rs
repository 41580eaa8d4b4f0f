//! Player-side resolution: skills, the struggle law and consumables.
//!
//! Nothing here checks whether an action is allowed; the battle session
//! validates turn, status gates, unlocks and stock before calling in.

use super::types::{SkillDefinition, SkillEffect, SkillId, SkillOutcome};
use crate::actor::{CombatantState, PlayerActor};
use crate::core::combat_math::{
    calculate_base_damage, resolve_hit, roll_chance, AttackResult, HitParams,
};
use crate::core::BattleConfig;
use crate::items::{ItemDefinition, ItemEffect};
use crate::progression::AbilityType;
use crate::status::StatusEffectType;
use rand::Rng;

/// Hit parameters for one strike, before the attacker's modifiers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strike {
    pub power: f64,
    pub guaranteed: bool,
    pub hit_rate: f64,
    pub crit_rate: f64,
    pub variance: f64,
}

/// Rolls a strike from `attacker` into `target` and applies the damage.
///
/// # Arguments
/// * `attacker` - Source of attack power and attack/accuracy modifiers
/// * `target` - Takes the damage through its damage modifier
/// * `strike` - Power and roll rates of this strike
/// * `config` - Supplies the crit multiplier
/// * `rng` - Random number generator
///
/// # Returns
/// AttackResult carrying the damage actually dealt
pub fn strike<R: Rng + ?Sized>(
    attacker: &CombatantState,
    target: &mut CombatantState,
    strike: Strike,
    config: &BattleConfig,
    rng: &mut R,
) -> AttackResult {
    let effects = attacker.effects();
    let params = HitParams {
        base_damage: calculate_base_damage(
            attacker.attack_power(),
            effects.attack_modifier(),
            strike.power,
            target.defense(),
        ),
        guaranteed: strike.guaranteed,
        hit_rate: strike.hit_rate,
        crit_rate: strike.crit_rate,
        variance: strike.variance,
        crit_multiplier: config.crit_multiplier,
    };
    let mut result = resolve_hit(&params, effects.accuracy_modifier(), rng);
    log::debug!(
        "{} -> {}: base {:.1}, rolled {:?}",
        attacker.name(),
        target.name(),
        params.base_damage,
        result
    );
    if !result.missed {
        result.damage = target.take_damage(result.damage);
    }
    result
}

/// Runs a player skill against `target`.
///
/// The MP cost is paid up front. When it cannot be covered the skill runs
/// with the desperation multiplier, and MP is drained (adding Exhausted)
/// once it has resolved.
///
/// # Returns
/// SkillOutcome with messages, damage/heal and MP spent
pub fn resolve_skill<R: Rng + ?Sized>(
    skill: &SkillDefinition,
    player: &mut PlayerActor,
    target: &mut CombatantState,
    config: &BattleConfig,
    rng: &mut R,
) -> SkillOutcome {
    let mut outcome = SkillOutcome::new();
    if !skill.id.is_basic() {
        outcome.say(format!("You use {}!", skill.name));
    }

    // A desperate action drains MP and exhausts the actor only after it
    // resolves, so the Exhausted attack penalty starts with the next action.
    let available = player.state().mp();
    let desperate = skill.mp_cost > available;
    if skill.mp_cost > 0 {
        if desperate {
            outcome.mp_spent = available;
            outcome.multiplier = config.desperation_multiplier;
            outcome.say("Out of breath, you push past your limits!");
        } else {
            player.state_mut().consume_mp(skill.mp_cost);
            outcome.mp_spent = skill.mp_cost;
            outcome.resource_consumed = true;
        }
    }

    match skill.effect {
        SkillEffect::Attack { power, guaranteed } => {
            let variance = if skill.id == SkillId::BasicAttack {
                config.attack_variance
            } else {
                skill.variance
            };
            let params = Strike {
                power: power * outcome.multiplier,
                guaranteed,
                hit_rate: skill.hit_rate,
                crit_rate: skill.crit_rate,
                variance,
            };
            player_strike(player, target, params, config, rng, &mut outcome);
        }
        SkillEffect::Stun {
            power,
            chance,
            duration,
        } => {
            let params = Strike {
                power: power * outcome.multiplier,
                guaranteed: false,
                hit_rate: skill.hit_rate,
                crit_rate: skill.crit_rate,
                variance: skill.variance,
            };
            if player_strike(player, target, params, config, rng, &mut outcome)
                && !target.is_knocked_out()
                && roll_chance(chance, rng)
            {
                target.inflict(StatusEffectType::Stunned, Some(duration), None);
            }
        }
        SkillEffect::Defend => {
            player
                .state_mut()
                .inflict(StatusEffectType::Defending, None, None);
            outcome.success = true;
        }
        SkillEffect::Heal { fraction } => {
            let state = player.state_mut();
            let amount = (state.max_hp() as f64 * fraction * outcome.multiplier).floor() as u32;
            let healed = state.heal(amount);
            outcome.heal = Some(healed);
            outcome.success = healed > 0;
            outcome.say(format!("You recover {} HP.", healed));
        }
        SkillEffect::Struggle { multiplier } => {
            let multiplier = multiplier * outcome.multiplier;
            resolve_struggle(player, multiplier, desperate, config, rng, &mut outcome);
        }
    }

    if desperate {
        player.state_mut().consume_mp(skill.mp_cost);
    }
    outcome
}

fn player_strike<R: Rng + ?Sized>(
    player: &PlayerActor,
    target: &mut CombatantState,
    params: Strike,
    config: &BattleConfig,
    rng: &mut R,
    outcome: &mut SkillOutcome,
) -> bool {
    let result = strike(player.state(), target, params, config, rng);
    if result.missed {
        outcome.missed = true;
        outcome.say(format!("You miss {}!", target.name()));
        return false;
    }
    outcome.success = true;
    outcome.critical = result.is_crit;
    outcome.damage = Some(result.damage);
    if result.is_crit {
        outcome.say("A critical hit!");
    }
    outcome.say(format!("You hit {} for {} damage.", target.name(), result.damage));
    true
}

/// Escape probability for the next struggle.
///
/// # Arguments
/// * `attempts` - Weighted count of failed struggles so far
/// * `agility_level` - Player's Agility level
/// * `struggle_modifier` - Product of the player's struggle modifiers
/// * `skill_multiplier` - Skill multiplier, doubled when desperate
/// * `config` - Base rate, per-failure increment, cap and agility bonus
///
/// # Returns
/// Probability in `[0, cap]`; a negative cap yields 0
pub fn struggle_success_chance(
    attempts: u32,
    agility_level: u32,
    struggle_modifier: f64,
    skill_multiplier: f64,
    config: &BattleConfig,
) -> f64 {
    let base = (config.struggle_base_rate + config.struggle_rate_per_failure * attempts as f64)
        .min(config.struggle_rate_cap);
    let agility_bonus = 1.0 + config.struggle_agility_bonus_per_level * agility_level as f64;
    (base * agility_bonus * struggle_modifier * skill_multiplier)
        .min(config.struggle_rate_cap)
        .max(0.0)
}

/// One attempt to break every restraint. `exhausted` marks an attempt whose MP
/// cost could not be paid; a failure then counts double toward the next try.
pub fn resolve_struggle<R: Rng + ?Sized>(
    player: &mut PlayerActor,
    skill_multiplier: f64,
    exhausted: bool,
    config: &BattleConfig,
    rng: &mut R,
    outcome: &mut SkillOutcome,
) {
    if !player.state().is_bound() {
        outcome.say("There is nothing holding you.");
        return;
    }

    let agility = player.level(AbilityType::Agility);
    let chance = struggle_success_chance(
        player.struggle_attempts(),
        agility,
        player.state().effects().struggle_modifier(),
        skill_multiplier,
        config,
    );
    log::debug!(
        "Struggle: attempts {}, chance {:.2}",
        player.struggle_attempts(),
        chance
    );

    if !roll_chance(chance, rng) {
        let weight = if exhausted {
            config.struggle_exhausted_failure_weight
        } else {
            1
        };
        player.record_failed_struggle(weight);
        outcome.say("You struggle, but can't break free.");
        return;
    }

    outcome.success = true;
    player.reset_struggle_attempts();
    let mut released = player.state_mut().release_restraints();
    outcome.messages.append(&mut released);

    let state = player.state_mut();
    if agility >= config.escape_recovery_min_agility && state.max_hp() < state.initial_max_hp() {
        let lost = state.initial_max_hp() - state.max_hp();
        let restored = (lost as f64 * config.escape_recovery_ratio).floor() as u32;
        if restored > 0 {
            state.gain_max_hp(restored);
            outcome.say(format!("You shake off the ordeal and recover {} max HP.", restored));
        }
    }
}

/// Uses a consumable and counts it against the per-battle allowance.
pub fn resolve_item(item: &ItemDefinition, player: &mut PlayerActor) -> SkillOutcome {
    let mut outcome = SkillOutcome::new();
    player.record_item_use(item.id);
    outcome.say(format!("You use the {}.", item.name));
    outcome.success = true;

    let state = player.state_mut();
    match item.effect {
        ItemEffect::Heal(amount) => {
            let healed = state.heal(amount);
            outcome.heal = Some(healed);
            outcome.say(format!("You recover {} HP.", healed));
        }
        ItemEffect::RestoreMp(amount) => {
            let restored = state.recover_mp(amount);
            outcome.say(format!("You recover {} MP.", restored));
        }
        ItemEffect::Cleanse { heal } => {
            if !state.cleanse().is_empty() {
                outcome.say("Your ailments wash away.");
            }
            let healed = state.heal(heal);
            if healed > 0 {
                outcome.heal = Some(healed);
                outcome.say(format!("You recover {} HP.", healed));
            }
        }
        ItemEffect::Buff { effect, duration } => {
            state.inflict(effect, duration, None);
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{BaseStats, PlayerLoadout};
    use crate::items::{ItemCatalog, ItemId};
    use crate::progression::ProgressionLedger;
    use crate::skills::SkillCatalog;
    use crate::status::{Side, StatusEffectCatalog};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::sync::Arc;
    use StatusEffectType::*;

    fn catalog() -> Arc<StatusEffectCatalog> {
        Arc::new(StatusEffectCatalog::standard())
    }

    fn player_with(levels: &[(AbilityType, u32)]) -> PlayerActor {
        let loadout = PlayerLoadout::new(ProgressionLedger::with_levels(levels));
        PlayerActor::new("Hero", loadout, catalog())
    }

    fn dummy(defense: u32) -> CombatantState {
        let stats = BaseStats {
            max_hp: 1000,
            max_mp: 0,
            attack_power: 10,
            defense,
        };
        CombatantState::new("Dummy", Side::Boss, stats, catalog())
    }

    #[test]
    fn test_struggle_chance_formula() {
        let config = BattleConfig::default();
        let p = struggle_success_chance(0, 0, 1.0, 1.0, &config);
        assert!((p - 0.3).abs() < 1e-9);
        let p = struggle_success_chance(2, 4, 1.0, 1.0, &config);
        assert!((p - 0.5 * 1.2).abs() < 1e-9);
        let p = struggle_success_chance(1, 0, 0.5, 1.0, &config);
        assert!((p - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_struggle_chance_capped() {
        let config = BattleConfig::default();
        assert_eq!(struggle_success_chance(50, 10, 1.0, 2.0, &config), 0.9);
        assert_eq!(struggle_success_chance(0, 0, 10.0, 10.0, &config), 0.9);
    }

    #[test]
    fn test_failed_struggle_counts_up() {
        let config = BattleConfig {
            struggle_base_rate: 0.0,
            struggle_rate_per_failure: 0.0,
            ..BattleConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut player = player_with(&[]);
        player.state_mut().inflict(Restrained, None, None);

        let mut outcome = SkillOutcome::new();
        resolve_struggle(&mut player, 1.0, false, &config, &mut rng, &mut outcome);
        assert!(!outcome.success);
        assert_eq!(player.struggle_attempts(), 1);

        resolve_struggle(&mut player, 1.0, true, &config, &mut rng, &mut outcome);
        assert_eq!(player.struggle_attempts(), 3);
        assert!(player.state().is_bound());
    }

    #[test]
    fn test_successful_struggle_frees_and_recovers() {
        let config = BattleConfig {
            struggle_base_rate: 1.0,
            struggle_rate_cap: 1.0,
            ..BattleConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut player = player_with(&[(AbilityType::Agility, 5)]);
        let state = player.state_mut();
        state.inflict(Restrained, None, None);
        state.inflict(Eaten, None, None);
        state.lose_max_hp(40);
        player.record_failed_struggle(3);

        let mut outcome = SkillOutcome::new();
        resolve_struggle(&mut player, 1.0, false, &config, &mut rng, &mut outcome);
        assert!(outcome.success);
        assert!(!player.state().is_bound());
        assert_eq!(player.struggle_attempts(), 0);
        assert_eq!(player.state().max_hp(), 80);
    }

    #[test]
    fn test_no_recovery_below_agility_threshold() {
        let config = BattleConfig {
            struggle_base_rate: 1.0,
            struggle_rate_cap: 1.0,
            ..BattleConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut player = player_with(&[(AbilityType::Agility, 4)]);
        player.state_mut().inflict(Cocoon, None, None);
        player.state_mut().lose_max_hp(40);

        let mut outcome = SkillOutcome::new();
        resolve_struggle(&mut player, 1.0, false, &config, &mut rng, &mut outcome);
        assert!(outcome.success);
        assert_eq!(player.state().max_hp(), 60);
    }

    #[test]
    fn test_basic_attack_damage_band() {
        let skills = SkillCatalog::standard();
        let attack = skills.get(SkillId::BasicAttack).unwrap();
        let config = BattleConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        // 10 + 3 * 3 = 19 attack against 4 defense: base 15.
        let mut player = player_with(&[(AbilityType::Combat, 3)]);
        let mut misses = 0;
        for _ in 0..300 {
            let mut target = dummy(4);
            let outcome = resolve_skill(attack, &mut player, &mut target, &config, &mut rng);
            match outcome.damage {
                None => misses += 1,
                Some(d) if outcome.critical => assert!((24..=36).contains(&d), "crit {d}"),
                Some(d) => assert!((12..=18).contains(&d), "hit {d}"),
            }
        }
        assert!(misses < 60);
    }

    #[test]
    fn test_desperation_doubles_multiplier() {
        let skills = SkillCatalog::standard();
        let escape = skills.get(SkillId::EscapeArtist).unwrap();
        let config = BattleConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut player = player_with(&[(AbilityType::Agility, 2)]);
        player.state_mut().inflict(Restrained, None, None);
        let spend = player.state().mp() - 5;
        player.state_mut().consume_mp(spend);
        assert_eq!(player.state().mp(), 5);

        let mut boss = dummy(0);
        let outcome = resolve_skill(escape, &mut player, &mut boss, &config, &mut rng);
        assert!(!outcome.resource_consumed);
        assert_eq!(outcome.multiplier, 2.0);
        assert_eq!(player.state().mp(), 0);
        assert!(player.state().has_status(Exhausted));
    }

    fn heavy_blow() -> SkillDefinition {
        SkillDefinition {
            id: SkillId::PowerStrike,
            name: "Heavy Blow".to_string(),
            description: String::new(),
            mp_cost: 20,
            unlock: None,
            desperation: true,
            usable_while_bound: false,
            hit_rate: 1.0,
            crit_rate: 0.0,
            variance: 0.0,
            effect: SkillEffect::Attack {
                power: 1.0,
                guaranteed: true,
            },
        }
    }

    #[test]
    fn test_desperate_attack_deals_double_damage() {
        let skill = heavy_blow();
        let config = BattleConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        // 10 + 3 * 5 = 25 attack against 0 defense.
        let mut player = player_with(&[(AbilityType::Combat, 5)]);

        let mut boss = dummy(0);
        let paid = resolve_skill(&skill, &mut player, &mut boss, &config, &mut rng);
        assert_eq!(paid.damage, Some(25));
        assert!(!player.state().has_status(Exhausted));

        let spend = player.state().mp() - 5;
        player.state_mut().consume_mp(spend);
        let mut boss = dummy(0);
        let desperate = resolve_skill(&skill, &mut player, &mut boss, &config, &mut rng);
        assert_eq!(desperate.damage, Some(50));
        assert_eq!(desperate.mp_spent, 5);
        assert_eq!(player.state().mp(), 0);
        assert!(player.state().has_status(Exhausted));

        // The exhaustion penalty lands on the following action.
        player.state_mut().recover_mp(20);
        let mut boss = dummy(0);
        let tired = resolve_skill(&skill, &mut player, &mut boss, &config, &mut rng);
        assert_eq!(tired.damage, Some(20));
    }

    #[test]
    fn test_negative_cap_means_no_escape() {
        let config = BattleConfig {
            struggle_rate_cap: -0.1,
            ..BattleConfig::default()
        };
        assert_eq!(struggle_success_chance(3, 5, 1.0, 2.0, &config), 0.0);
    }

    #[test]
    fn test_paid_skill_keeps_multiplier() {
        let skills = SkillCatalog::standard();
        let strike = skills.get(SkillId::PowerStrike).unwrap();
        let config = BattleConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut player = player_with(&[(AbilityType::Combat, 3)]);
        let mut boss = dummy(0);
        let outcome = resolve_skill(strike, &mut player, &mut boss, &config, &mut rng);
        assert!(outcome.resource_consumed);
        assert_eq!(outcome.mp_spent, 15);
        assert_eq!(outcome.multiplier, 1.0);
        assert!(outcome.damage.is_some());
    }

    #[test]
    fn test_defend_halves_next_hit() {
        let skills = SkillCatalog::standard();
        let defend = skills.get(SkillId::Defend).unwrap();
        let config = BattleConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut player = player_with(&[]);
        let mut boss = dummy(0);
        resolve_skill(defend, &mut player, &mut boss, &config, &mut rng);
        assert!(player.state().effects().is_defending());
        assert_eq!(player.state_mut().take_damage(20), 10);
    }

    #[test]
    fn test_items() {
        let items = ItemCatalog::standard();
        let mut player = player_with(&[]);
        player.state_mut().take_damage(60);
        player.state_mut().inflict(Poisoned, None, None);

        let outcome = resolve_item(items.get(ItemId::HealingDraught).unwrap(), &mut player);
        assert_eq!(outcome.heal, Some(40));
        assert_eq!(player.item_uses(ItemId::HealingDraught), 1);

        resolve_item(items.get(ItemId::PurifyingSalts).unwrap(), &mut player);
        assert!(!player.state().has_status(Poisoned));
        assert_eq!(player.state().hp(), 90);

        resolve_item(items.get(ItemId::BerserkerTonic).unwrap(), &mut player);
        assert!(player.state().has_status(Empowered));
    }
}
