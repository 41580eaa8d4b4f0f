//! Property tests for the composition, clamp and leveling laws.

use bossfight::actor::{BaseStats, CombatantState};
use bossfight::core::BattleConfig;
use bossfight::progression::{
    required_experience_for_level, AbilityTrack, AbilityType, ProgressionLedger,
};
use bossfight::skills::struggle_success_chance;
use bossfight::status::{Side, StatusEffectCatalog, StatusEffectManager, StatusEffectType};
use proptest::prelude::*;
use proptest::sample::subsequence;
use std::sync::Arc;

fn standard() -> Arc<StatusEffectCatalog> {
    Arc::new(StatusEffectCatalog::standard())
}

fn combatant() -> CombatantState {
    let stats = BaseStats {
        max_hp: 120,
        max_mp: 40,
        attack_power: 15,
        defense: 3,
    };
    CombatantState::new("Hero", Side::Player, stats, standard())
}

fn any_effect() -> impl Strategy<Value = StatusEffectType> {
    prop::sample::select(StatusEffectType::all())
}

#[derive(Debug, Clone)]
enum Op {
    Damage(u32),
    Heal(u32),
    ConsumeMp(u32),
    RecoverMp(u32),
    LoseMaxHp(u32),
    GainMaxHp(u32),
    Inflict(StatusEffectType),
    Remove(StatusEffectType),
    StartTurn,
    Tick,
    Decay,
}

fn any_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u32..200).prop_map(Op::Damage),
        (0u32..200).prop_map(Op::Heal),
        (0u32..60).prop_map(Op::ConsumeMp),
        (0u32..60).prop_map(Op::RecoverMp),
        (0u32..80).prop_map(Op::LoseMaxHp),
        (0u32..80).prop_map(Op::GainMaxHp),
        any_effect().prop_map(Op::Inflict),
        any_effect().prop_map(Op::Remove),
        Just(Op::StartTurn),
        Just(Op::Tick),
        Just(Op::Decay),
    ]
}

fn apply(actor: &mut CombatantState, op: &Op) {
    match *op {
        Op::Damage(n) => {
            actor.take_damage(n);
        }
        Op::Heal(n) => {
            actor.heal(n);
        }
        Op::ConsumeMp(n) => {
            actor.consume_mp(n);
        }
        Op::RecoverMp(n) => {
            actor.recover_mp(n);
        }
        Op::LoseMaxHp(n) => {
            actor.lose_max_hp(n);
        }
        Op::GainMaxHp(n) => {
            actor.gain_max_hp(n);
        }
        Op::Inflict(t) => {
            actor.inflict(t, None, None);
        }
        Op::Remove(t) => {
            actor.remove_status(t);
        }
        Op::StartTurn => {
            actor.start_turn();
        }
        Op::Tick => {
            actor.apply_effects();
        }
        Op::Decay => {
            actor.decrease_durations();
        }
    }
}

proptest! {
    #[test]
    fn damage_modifier_is_order_independent_product(
        picked in subsequence(
            vec![
                StatusEffectType::Defending,
                StatusEffectType::Sleeping,
                StatusEffectType::Vulnerable,
                StatusEffectType::Weakened,
                StatusEffectType::Empowered,
            ],
            0..=5,
        ),
        reverse in any::<bool>(),
    ) {
        let catalog = standard();
        let mut order = picked.clone();
        if reverse {
            order.reverse();
        }
        let mut manager = StatusEffectManager::new(Arc::clone(&catalog));
        for t in &order {
            manager.add_effect(*t, None, None);
        }
        let expected: f64 = picked
            .iter()
            .filter_map(|t| catalog.get(*t).and_then(|d| d.modifiers.damage_received))
            .product();
        prop_assert!((manager.damage_modifier() - expected).abs() < 1e-12);
    }

    #[test]
    fn refresh_keeps_one_instance_with_latest_values(
        t in any_effect(),
        first in (1u32..10, 0u32..20),
        second in (1u32..10, 0u32..20),
    ) {
        let mut manager = StatusEffectManager::new(standard());
        prop_assert!(manager.add_effect(t, Some(first.0), Some(first.1)));
        prop_assert!(!manager.add_effect(t, Some(second.0), Some(second.1)));
        prop_assert_eq!(manager.count(t), 1);
        let active = manager.get(t).unwrap();
        prop_assert_eq!(active.duration, second.0);
        prop_assert_eq!(active.potency, second.1);
    }

    #[test]
    fn timed_effect_expires_after_exactly_its_duration(duration in 1u32..8) {
        let mut actor = combatant();
        actor.inflict(StatusEffectType::Dizzy, Some(duration), None);
        for _ in 0..duration - 1 {
            actor.decrease_durations();
        }
        prop_assert!(actor.has_status(StatusEffectType::Dizzy));
        actor.decrease_durations();
        prop_assert!(!actor.has_status(StatusEffectType::Dizzy));
    }

    #[test]
    fn vitals_stay_clamped_and_zero_hp_means_knocked_out(ops in prop::collection::vec(any_op(), 0..60)) {
        let mut actor = combatant();
        for op in &ops {
            apply(&mut actor, op);
            prop_assert!(actor.hp() <= actor.max_hp(), "{:?}", op);
            prop_assert!(actor.mp() <= actor.max_mp(), "{:?}", op);
            if actor.hp() == 0 && !actor.is_doomed() && !actor.is_dead() {
                prop_assert!(actor.is_knocked_out(), "{:?}", op);
            }
        }
    }

    #[test]
    fn healing_from_zero_clears_knockout(damage in 120u32..500, heal in 1u32..200) {
        let mut actor = combatant();
        actor.take_damage(damage);
        prop_assert!(actor.is_knocked_out());
        actor.heal(heal);
        prop_assert!(!actor.is_knocked_out());
    }

    #[test]
    fn zero_experience_never_levels(level in 0u32..=10, ability in prop::sample::select(AbilityType::all())) {
        let mut ledger = ProgressionLedger::new();
        ledger.set_level(ability, level);
        let change = ledger.add_experience(ability, 0);
        prop_assert!(!change.leveled_up);
        prop_assert_eq!(ledger.level(ability), level);
    }

    #[test]
    fn level_is_monotonic_in_experience(a in 0u64..200_000, b in 0u64..200_000) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(
            AbilityTrack::from_experience(low).level() <= AbilityTrack::from_experience(high).level()
        );
    }

    #[test]
    fn experience_curve_is_total_and_monotonic(a in any::<u32>(), b in any::<u32>()) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(required_experience_for_level(low) <= required_experience_for_level(high));
    }

    #[test]
    fn struggle_chance_never_exceeds_cap(
        attempts in 0u32..100,
        agility in 0u32..=10,
        modifier in 0.0f64..4.0,
        multiplier in 0.0f64..4.0,
        cap in 0.1f64..1.0,
    ) {
        let config = BattleConfig {
            struggle_rate_cap: cap,
            ..BattleConfig::default()
        };
        let p = struggle_success_chance(attempts, agility, modifier, multiplier, &config);
        prop_assert!((0.0..=cap).contains(&p));
    }
}
