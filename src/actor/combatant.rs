//! Shared actor state and the mutators every HP/MP change goes through.

use super::stats::{BaseStats, StatSource};
use super::vitals::Vitals;
use crate::core::constants::MP_REGEN_DIVISOR;
use crate::status::{
    render_template, ActionPriority, Side, StatusEffectCatalog, StatusEffectManager,
    StatusEffectType,
};
use std::sync::Arc;

/// Runtime state common to the player and bosses.
///
/// Status-driven messages raised inside a mutator (a knockout from
/// `take_damage`, exhaustion from `consume_mp`) are queued and picked up by the
/// battle with [`CombatantState::drain_notices`].
#[derive(Debug, Clone)]
pub struct CombatantState {
    name: String,
    side: Side,
    vitals: Vitals,
    attack_power: u32,
    defense: u32,
    initial_max_hp: u32,
    initial_max_mp: u32,
    effects: StatusEffectManager,
    notices: Vec<String>,
}

impl CombatantState {
    pub fn new(name: &str, side: Side, stats: BaseStats, catalog: Arc<StatusEffectCatalog>) -> Self {
        Self {
            name: name.to_string(),
            side,
            vitals: Vitals::full(stats.max_hp, stats.max_mp),
            attack_power: stats.attack_power,
            defense: stats.defense,
            initial_max_hp: stats.max_hp,
            initial_max_mp: stats.max_mp,
            effects: StatusEffectManager::new(catalog),
            notices: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn vitals(&self) -> Vitals {
        self.vitals
    }

    pub fn hp(&self) -> u32 {
        self.vitals.hp
    }

    pub fn max_hp(&self) -> u32 {
        self.vitals.max_hp
    }

    pub fn mp(&self) -> u32 {
        self.vitals.mp
    }

    pub fn max_mp(&self) -> u32 {
        self.vitals.max_mp
    }

    pub fn attack_power(&self) -> u32 {
        self.attack_power
    }

    pub fn defense(&self) -> u32 {
        self.defense
    }

    /// Max HP at battle start, before any devouring.
    pub fn initial_max_hp(&self) -> u32 {
        self.initial_max_hp
    }

    pub fn initial_max_mp(&self) -> u32 {
        self.initial_max_mp
    }

    pub fn effects(&self) -> &StatusEffectManager {
        &self.effects
    }

    pub fn action_priority(&self) -> ActionPriority {
        self.effects.action_priority()
    }

    pub fn can_act(&self) -> bool {
        self.effects.can_act()
    }

    pub fn has_status(&self, effect_type: StatusEffectType) -> bool {
        self.effects.has(effect_type)
    }

    pub fn is_knocked_out(&self) -> bool {
        self.effects.is_knocked_out()
    }

    pub fn is_doomed(&self) -> bool {
        self.effects.is_doomed()
    }

    pub fn is_dead(&self) -> bool {
        self.effects.is_dead()
    }

    pub fn is_bound(&self) -> bool {
        self.effects.is_bound()
    }

    /// Messages queued by mutators since the last drain.
    pub fn drain_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    /// Applies `floor(amount × damage modifier)` and returns that figure.
    /// Reaching 0 HP knocks the actor out.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        if amount == 0 {
            return 0;
        }
        let actual = (amount as f64 * self.effects.damage_modifier()).floor().max(0.0) as u32;
        self.vitals.lose_hp(actual);
        self.ensure_knocked_out();
        actual
    }

    /// Restores up to `amount` HP and returns what was actually restored.
    /// Healing a knocked-out actor above 0 revives it.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if amount == 0 || self.vitals.hp >= self.vitals.max_hp {
            return 0;
        }
        let before = self.vitals.hp;
        self.vitals.gain_hp(amount);
        let restored = self.vitals.hp - before;
        if before == 0 && self.vitals.hp > 0 && self.effects.remove_effect(StatusEffectType::KnockedOut) {
            self.notices.push(match self.side {
                Side::Player => "You get back on your feet!".to_string(),
                Side::Boss => format!("{} gets back up!", self.name),
            });
        }
        restored
    }

    /// Pays `amount` MP. With too little MP the pool is drained to 0, the
    /// actor becomes Exhausted and the call returns false.
    pub fn consume_mp(&mut self, amount: u32) -> bool {
        if self.vitals.mp >= amount {
            self.vitals.lose_mp(amount);
            return true;
        }
        self.vitals.mp = 0;
        self.inflict(StatusEffectType::Exhausted, None, None);
        false
    }

    pub fn recover_mp(&mut self, amount: u32) -> u32 {
        let before = self.vitals.mp;
        self.vitals.gain_mp(amount);
        self.vitals.mp - before
    }

    /// Permanently (for this battle) lowers max HP. Dropping to 0 dooms the
    /// actor. Returns the max HP actually lost.
    pub fn lose_max_hp(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.vitals.max_hp);
        if lost == 0 {
            return 0;
        }
        self.vitals.max_hp -= lost;
        self.vitals.hp = self.vitals.hp.min(self.vitals.max_hp);

        if self.vitals.max_hp == 0 {
            self.effects.remove_effect(StatusEffectType::KnockedOut);
            self.inflict(StatusEffectType::Doomed, None, None);
        } else {
            self.ensure_knocked_out();
        }
        lost
    }

    /// Raises max HP. Current HP rises by the same amount unless the actor is
    /// down at 0.
    pub fn gain_max_hp(&mut self, amount: u32) -> u32 {
        if amount == 0 {
            return 0;
        }
        self.vitals.max_hp = self.vitals.max_hp.saturating_add(amount);
        if self.vitals.hp > 0 {
            self.vitals.gain_hp(amount);
        }
        amount
    }

    /// Start-of-turn MP regeneration. Returns the MP recovered.
    pub fn start_turn(&mut self) -> u32 {
        if self.effects.is_eaten() {
            return 0;
        }
        let base = self.vitals.max_mp / MP_REGEN_DIVISOR;
        let regen = (base as f64 * self.effects.mp_regen_modifier()).floor().max(0.0) as u32;
        self.recover_mp(regen)
    }

    /// Clears every effect and rebuilds stats from `source` at full HP/MP.
    pub fn reset_battle_state(&mut self, source: &dyn StatSource) {
        let stats = source.base_stats();
        self.effects.clear();
        self.notices.clear();
        self.vitals = Vitals::full(stats.max_hp, stats.max_mp);
        self.attack_power = stats.attack_power;
        self.defense = stats.defense;
        self.initial_max_hp = stats.max_hp;
        self.initial_max_mp = stats.max_mp;
    }

    /// Adds an effect and queues its apply message. Returns true when a new
    /// instance was inserted (false on refresh).
    pub fn inflict(
        &mut self,
        effect_type: StatusEffectType,
        duration: Option<u32>,
        potency: Option<u32>,
    ) -> bool {
        if !self.effects.catalog().contains(effect_type) {
            return false;
        }
        let inserted = self.effects.add_effect(effect_type, duration, potency);
        if let Some(message) = self.effects.apply_message(effect_type, &self.name, self.side) {
            self.notices.push(message);
        }
        inserted
    }

    /// Removes an effect without running its remove hook. An actor left at
    /// 0 HP is knocked out again.
    pub fn remove_status(&mut self, effect_type: StatusEffectType) -> bool {
        let removed = self.effects.remove_effect(effect_type);
        self.ensure_knocked_out();
        removed
    }

    /// Removes every restraint-family effect and returns their remove messages.
    pub fn release_restraints(&mut self) -> Vec<String> {
        let mut messages = Vec::new();
        for effect_type in StatusEffectType::restraints() {
            if self.effects.remove_effect(effect_type) {
                let Some(definition) = self.effects.definition(effect_type) else {
                    continue;
                };
                if let Some(template) = definition
                    .messages
                    .remove
                    .for_side(self.side)
                    .filter(|t| !t.is_empty())
                {
                    messages.push(render_template(template, &self.name, &definition.name, 0));
                }
            }
        }
        messages
    }

    /// Removes every debuff. A knockout is restored if HP is still 0.
    pub fn cleanse(&mut self) -> Vec<StatusEffectType> {
        let removed = self.effects.remove_debuffs();
        self.ensure_knocked_out();
        removed
    }

    /// Start-of-round tick hooks.
    pub fn apply_effects(&mut self) -> Vec<String> {
        let mut messages = self.effects.apply_effects(&mut self.vitals, &self.name, self.side);
        self.ensure_knocked_out();
        messages.append(&mut self.notices);
        messages
    }

    /// End-of-round duration countdown.
    pub fn decrease_durations(&mut self) -> Vec<String> {
        let mut messages = self
            .effects
            .decrease_durations(&mut self.vitals, &self.name, self.side);
        self.ensure_knocked_out();
        messages.append(&mut self.notices);
        messages
    }

    /// Keeps "0 HP means KnockedOut" true outside the Doomed/Dead states.
    fn ensure_knocked_out(&mut self) {
        if self.vitals.hp == 0
            && !self.effects.is_knocked_out()
            && !self.effects.is_doomed()
            && !self.effects.is_dead()
        {
            self.inflict(StatusEffectType::KnockedOut, None, None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use StatusEffectType::*;

    fn actor(side: Side) -> CombatantState {
        let stats = BaseStats {
            max_hp: 100,
            max_mp: 50,
            attack_power: 20,
            defense: 5,
        };
        CombatantState::new("Hero", side, stats, Arc::new(StatusEffectCatalog::standard()))
    }

    #[test]
    fn test_damage_respects_modifier() {
        let mut a = actor(Side::Player);
        a.inflict(Defending, None, None);
        assert_eq!(a.take_damage(15), 7);
        assert_eq!(a.hp(), 93);
    }

    #[test]
    fn test_zero_hp_knocks_out_once() {
        let mut a = actor(Side::Player);
        a.take_damage(500);
        assert_eq!(a.hp(), 0);
        assert!(a.is_knocked_out());
        a.take_damage(10);
        assert_eq!(a.effects().count(KnockedOut), 1);
        let notices = a.drain_notices();
        assert_eq!(notices.len(), 1);
    }

    #[test]
    fn test_heal_revives() {
        let mut a = actor(Side::Player);
        a.take_damage(100);
        a.drain_notices();
        assert_eq!(a.heal(30), 30);
        assert!(!a.is_knocked_out());
        assert_eq!(a.drain_notices(), vec!["You get back on your feet!".to_string()]);
    }

    #[test]
    fn test_removing_knockout_at_zero_hp_does_not_stick() {
        let mut a = actor(Side::Player);
        a.take_damage(100);
        a.remove_status(KnockedOut);
        assert!(a.is_knocked_out());

        let mut b = actor(Side::Player);
        b.lose_max_hp(100);
        b.inflict(Dead, None, None);
        b.remove_status(Doomed);
        assert!(b.is_dead());
        assert!(!b.is_knocked_out());
    }

    #[test]
    fn test_heal_clamps_to_max() {
        let mut a = actor(Side::Boss);
        a.take_damage(10);
        assert_eq!(a.heal(50), 10);
        assert_eq!(a.heal(5), 0);
    }

    #[test]
    fn test_consume_mp_shortfall_exhausts() {
        let mut a = actor(Side::Player);
        assert!(a.consume_mp(20));
        assert_eq!(a.mp(), 30);
        assert!(!a.consume_mp(40));
        assert_eq!(a.mp(), 0);
        assert!(a.has_status(Exhausted));
    }

    #[test]
    fn test_lose_max_hp_to_zero_dooms() {
        let mut a = actor(Side::Player);
        a.take_damage(90);
        assert_eq!(a.lose_max_hp(40), 40);
        assert_eq!(a.max_hp(), 60);
        assert_eq!(a.hp(), 10);

        assert_eq!(a.lose_max_hp(100), 60);
        assert_eq!(a.max_hp(), 0);
        assert_eq!(a.hp(), 0);
        assert!(a.is_doomed());
        assert!(!a.is_knocked_out());
    }

    #[test]
    fn test_gain_max_hp_does_not_revive() {
        let mut a = actor(Side::Player);
        a.lose_max_hp(40);
        a.take_damage(200);
        a.gain_max_hp(20);
        assert_eq!(a.max_hp(), 80);
        assert_eq!(a.hp(), 0);
        assert!(a.is_knocked_out());
    }

    #[test]
    fn test_gain_max_hp_raises_current() {
        let mut a = actor(Side::Player);
        a.lose_max_hp(40);
        a.gain_max_hp(20);
        assert_eq!(a.max_hp(), 80);
        assert_eq!(a.hp(), 80);
    }

    #[test]
    fn test_mp_regen() {
        let mut a = actor(Side::Player);
        a.consume_mp(50);
        assert_eq!(a.start_turn(), 5);
        a.inflict(Exhausted, None, None);
        assert_eq!(a.start_turn(), 2);
        a.inflict(Eaten, None, None);
        assert_eq!(a.start_turn(), 0);
    }

    #[test]
    fn test_knockout_expiry_revives() {
        let mut a = actor(Side::Player);
        a.take_damage(100);
        for _ in 0..2 {
            a.decrease_durations();
            assert_eq!(a.hp(), 0);
        }
        a.decrease_durations();
        assert_eq!(a.hp(), 25);
        assert!(!a.is_knocked_out());
    }

    #[test]
    fn test_reset_battle_state() {
        let mut a = actor(Side::Player);
        a.take_damage(50);
        a.lose_max_hp(10);
        a.inflict(Poisoned, None, None);
        let fresh = BaseStats {
            max_hp: 120,
            max_mp: 60,
            attack_power: 25,
            defense: 6,
        };
        a.reset_battle_state(&fresh);
        assert_eq!(a.hp(), 120);
        assert_eq!(a.max_hp(), 120);
        assert_eq!(a.initial_max_hp(), 120);
        assert_eq!(a.attack_power(), 25);
        assert!(a.effects().is_empty());
    }

    #[test]
    fn test_release_restraints() {
        let mut a = actor(Side::Player);
        a.inflict(Restrained, None, None);
        a.inflict(Eaten, None, None);
        let messages = a.release_restraints();
        assert_eq!(messages.len(), 2);
        assert!(!a.is_bound());
    }
}
