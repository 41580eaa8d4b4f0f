use super::resolve::{strike, Strike};
use super::types::SkillOutcome;
use crate::actor::{BossActor, CombatantState, PlayerActor};
use crate::boss::{BossActionDef, BossActionKind};
use crate::core::combat_math::roll_chance;
use crate::core::BattleConfig;
use crate::status::StatusEffectType;
use rand::Rng;

/// Runs one boss action against the player. `outcome.damage` is the damage
/// the player took.
pub fn resolve_boss_action<R: Rng + ?Sized>(
    action: &BossActionDef,
    boss: &mut BossActor,
    player: &mut PlayerActor,
    config: &BattleConfig,
    rng: &mut R,
) -> SkillOutcome {
    let mut outcome = SkillOutcome::new();
    let boss_name = boss.name().to_string();
    outcome.say(action.announce.replace("{name}", &boss_name));

    if action.mp_cost > 0 {
        let before = boss.state().mp();
        outcome.resource_consumed = boss.state_mut().consume_mp(action.mp_cost);
        outcome.mp_spent = before - boss.state().mp();
    }

    let attacker = boss.state();
    let target = player.state_mut();

    match action.kind {
        BossActionKind::Attack { power } => {
            boss_strike(action, power, attacker, target, config, rng, &mut outcome);
        }
        BossActionKind::Inflict {
            power,
            effect,
            chance,
            duration,
        } => {
            let landed = if power > 0.0 {
                boss_strike(action, power, attacker, target, config, rng, &mut outcome)
            } else {
                true
            };
            if landed {
                if roll_chance(chance, rng) {
                    target.inflict(effect, duration, None);
                    outcome.success = true;
                } else if power <= 0.0 {
                    outcome.say("You shake it off.");
                }
            }
        }
        BossActionKind::Restrain { power } => {
            if boss_strike(action, power, attacker, target, config, rng, &mut outcome) {
                target.inflict(StatusEffectType::Restrained, None, None);
            }
        }
        BossActionKind::Swallow => {
            if lands(action, attacker, rng) {
                target.remove_status(StatusEffectType::Restrained);
                target.remove_status(StatusEffectType::Cocoon);
                target.inflict(StatusEffectType::Eaten, None, None);
                outcome.success = true;
            } else {
                outcome.say(format!("You twist out of {}'s reach!", boss_name));
            }
        }
        BossActionKind::Devour { max_hp_loss } => {
            if !target.effects().is_eaten() {
                outcome.say(format!("{} snaps at empty air.", boss_name));
            } else {
                let lost = target.lose_max_hp(max_hp_loss);
                outcome.success = lost > 0;
                outcome.say(format!("Your strength seeps away. Max HP -{}.", lost));
                let healed = boss.state_mut().heal(lost);
                if healed > 0 {
                    outcome.heal = Some(healed);
                    outcome.say(format!("{} recovers {} HP.", boss_name, healed));
                }
            }
        }
        BossActionKind::Cocoon => {
            if lands(action, attacker, rng) {
                target.inflict(StatusEffectType::Cocoon, None, None);
                outcome.success = true;
            } else {
                outcome.say("You dodge the silk!");
            }
        }
        BossActionKind::HealSelf { fraction } => {
            let state = boss.state_mut();
            let amount = (state.max_hp() as f64 * fraction).floor() as u32;
            let healed = state.heal(amount);
            outcome.heal = Some(healed);
            outcome.success = true;
            outcome.say(format!("{} recovers {} HP.", boss_name, healed));
        }
        BossActionKind::Idle => {
            outcome.success = true;
        }
    }

    outcome
}

/// Miss roll for actions that land without dealing damage.
fn lands<R: Rng + ?Sized>(action: &BossActionDef, attacker: &CombatantState, rng: &mut R) -> bool {
    action.guaranteed || roll_chance(action.hit_rate * attacker.effects().accuracy_modifier(), rng)
}

fn boss_strike<R: Rng + ?Sized>(
    action: &BossActionDef,
    power: f64,
    attacker: &CombatantState,
    target: &mut CombatantState,
    config: &BattleConfig,
    rng: &mut R,
    outcome: &mut SkillOutcome,
) -> bool {
    let params = Strike {
        power,
        guaranteed: action.guaranteed,
        hit_rate: action.hit_rate,
        crit_rate: action.crit_rate,
        variance: action.variance,
    };
    let result = strike(attacker, target, params, config, rng);
    if result.missed {
        outcome.missed = true;
        outcome.say(format!("{} misses!", attacker.name()));
        return false;
    }
    outcome.success = true;
    outcome.critical = result.is_crit;
    outcome.damage = Some(outcome.damage.unwrap_or(0) + result.damage);
    if result.is_crit {
        outcome.say("A crushing blow!");
    }
    outcome.say(format!("You take {} damage.", result.damage));
    true
}
