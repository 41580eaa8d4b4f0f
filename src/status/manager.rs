use super::catalog::StatusEffectCatalog;
use super::types::*;
use crate::actor::Vitals;
use std::sync::Arc;

/// The live effects on one actor, plus the composition rules over them.
#[derive(Debug, Clone)]
pub struct StatusEffectManager {
    catalog: Arc<StatusEffectCatalog>,
    effects: Vec<ActiveStatusEffect>,
}

impl StatusEffectManager {
    pub fn new(catalog: Arc<StatusEffectCatalog>) -> Self {
        Self {
            catalog,
            effects: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &StatusEffectCatalog {
        &self.catalog
    }

    pub fn definition(&self, effect_type: StatusEffectType) -> Option<&StatusEffectDefinition> {
        self.catalog.get(effect_type)
    }

    pub fn effects(&self) -> &[ActiveStatusEffect] {
        &self.effects
    }

    pub fn get(&self, effect_type: StatusEffectType) -> Option<&ActiveStatusEffect> {
        self.effects.iter().find(|e| e.effect_type == effect_type)
    }

    pub fn has(&self, effect_type: StatusEffectType) -> bool {
        self.get(effect_type).is_some()
    }

    pub fn count(&self, effect_type: StatusEffectType) -> usize {
        self.effects
            .iter()
            .filter(|e| e.effect_type == effect_type)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Adds an effect, or refreshes the existing instance of a non-stackable
    /// type. Returns true only when a new instance was inserted. A type with no
    /// catalog entry is ignored.
    pub fn add_effect(
        &mut self,
        effect_type: StatusEffectType,
        duration: Option<u32>,
        potency: Option<u32>,
    ) -> bool {
        let Some(definition) = self.catalog.get(effect_type) else {
            log::debug!("Ignoring {} with no catalog definition", effect_type);
            return false;
        };
        let duration = duration.unwrap_or(definition.duration);
        let potency = potency.unwrap_or(definition.potency);

        if !definition.stackable {
            if let Some(existing) = self
                .effects
                .iter_mut()
                .find(|e| e.effect_type == effect_type)
            {
                existing.duration = duration;
                existing.potency = potency;
                log::debug!("Refreshed {} (duration {})", effect_type, duration);
                return false;
            }
        }

        let name = definition.name.clone();
        self.effects.push(ActiveStatusEffect {
            effect_type,
            duration,
            potency,
            name,
        });
        log::debug!("Added {} (duration {})", effect_type, duration);
        true
    }

    /// Removes every instance of `effect_type` without running its remove
    /// hook. Returns false if none was active.
    pub fn remove_effect(&mut self, effect_type: StatusEffectType) -> bool {
        let before = self.effects.len();
        self.effects.retain(|e| e.effect_type != effect_type);
        let removed = self.effects.len() != before;
        if removed {
            log::debug!("Removed {}", effect_type);
        }
        removed
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    /// Apply message for a freshly added or refreshed effect, if any.
    pub fn apply_message(
        &self,
        effect_type: StatusEffectType,
        owner_name: &str,
        side: Side,
    ) -> Option<String> {
        let definition = self.catalog.get(effect_type)?;
        let template = definition.messages.apply.for_side(side)?;
        if template.is_empty() {
            return None;
        }
        Some(render_template(template, owner_name, &definition.name, 0))
    }

    /// Start-of-round phase: runs every tick hook against `vitals`.
    ///
    /// Hooks write HP directly and skip the damage-modifier pipeline. Each
    /// non-zero HP change produces one message.
    pub fn apply_effects(&self, vitals: &mut Vitals, owner_name: &str, side: Side) -> Vec<String> {
        let mut messages = Vec::new();
        let hp_regen = self.hp_regen_modifier();

        for effect in &self.effects {
            let Some(definition) = self.catalog.get(effect.effect_type) else {
                continue;
            };
            let Some(hook) = definition.on_tick else {
                continue;
            };

            let before = vitals.hp;
            match hook {
                TickHook::Damage(amount) => vitals.lose_hp(amount),
                TickHook::PotencyDamage => vitals.lose_hp(effect.potency),
                TickHook::Regenerate(amount) => {
                    vitals.gain_hp((amount as f64 * hp_regen).floor() as u32)
                }
            }

            let delta = vitals.hp.abs_diff(before);
            if delta == 0 {
                continue;
            }
            let message = match definition.messages.tick.for_side(side) {
                Some("") => continue,
                Some(template) => render_template(template, owner_name, &definition.name, delta),
                None if vitals.hp < before => {
                    format!("{} takes {} damage from {}.", owner_name, delta, definition.name)
                }
                None => format!("{} recovers {} HP from {}.", owner_name, delta, definition.name),
            };
            messages.push(message);
        }

        messages
    }

    /// End-of-round phase: counts down every timed effect and removes the ones
    /// that reach zero, running their remove hooks. Untimed effects persist.
    pub fn decrease_durations(
        &mut self,
        vitals: &mut Vitals,
        owner_name: &str,
        side: Side,
    ) -> Vec<String> {
        let mut expired = Vec::new();
        self.effects.retain_mut(|effect| {
            if effect.duration == 0 {
                return true;
            }
            effect.duration -= 1;
            if effect.duration == 0 {
                expired.push(effect.effect_type);
                return false;
            }
            true
        });

        let mut messages = Vec::new();
        for effect_type in expired {
            log::debug!("{} expired on {}", effect_type, owner_name);
            let Some(definition) = self.catalog.get(effect_type) else {
                continue;
            };

            if let Some(RemoveHook::ReviveFraction(fraction)) = definition.on_remove {
                if vitals.hp == 0 && vitals.max_hp > 0 {
                    let revived = ((vitals.max_hp as f64 * fraction).floor() as u32).max(1);
                    vitals.gain_hp(revived);
                }
            }

            match definition.messages.remove.for_side(side) {
                Some("") => {}
                Some(template) => {
                    messages.push(render_template(template, owner_name, &definition.name, 0))
                }
                None => messages.push(format!("{}'s {} wore off.", owner_name, definition.name)),
            }
        }

        messages
    }

    fn fold_modifier(&self, pick: impl Fn(&EffectModifiers) -> Option<f64>) -> f64 {
        self.effects
            .iter()
            .filter_map(|e| self.catalog.get(e.effect_type))
            .filter_map(|d| pick(&d.modifiers))
            .product()
    }

    pub fn attack_modifier(&self) -> f64 {
        self.fold_modifier(|m| m.attack)
    }

    /// Multiplier on incoming damage.
    pub fn damage_modifier(&self) -> f64 {
        self.fold_modifier(|m| m.damage_received)
    }

    pub fn struggle_modifier(&self) -> f64 {
        self.fold_modifier(|m| m.struggle)
    }

    pub fn accuracy_modifier(&self) -> f64 {
        self.fold_modifier(|m| m.accuracy)
    }

    pub fn hp_regen_modifier(&self) -> f64 {
        self.fold_modifier(|m| m.hp_regen)
    }

    pub fn mp_regen_modifier(&self) -> f64 {
        self.fold_modifier(|m| m.mp_regen)
    }

    fn any_definition(&self, pred: impl Fn(&StatusEffectDefinition) -> bool) -> bool {
        self.effects
            .iter()
            .filter_map(|e| self.catalog.get(e.effect_type))
            .any(pred)
    }

    pub fn can_act(&self) -> bool {
        !self.any_definition(|d| d.modifiers.can_act == Some(false))
    }

    pub fn can_use_skills(&self) -> bool {
        !self.any_definition(|d| d.modifiers.can_use_skills == Some(false))
    }

    /// Most restrictive priority among active effects.
    pub fn action_priority(&self) -> ActionPriority {
        self.effects
            .iter()
            .filter_map(|e| self.catalog.get(e.effect_type))
            .filter_map(|d| d.modifiers.action_priority)
            .max()
            .unwrap_or_default()
    }

    pub fn debuff_level(&self) -> usize {
        self.effects
            .iter()
            .filter(|e| self.catalog.get(e.effect_type).is_some_and(|d| d.is_debuff))
            .count()
    }

    /// Removes every debuff and returns the removed types (each listed once).
    pub fn remove_debuffs(&mut self) -> Vec<StatusEffectType> {
        let catalog = Arc::clone(&self.catalog);
        let mut removed: Vec<StatusEffectType> = Vec::new();
        self.effects.retain(|e| {
            let is_debuff = catalog.get(e.effect_type).is_some_and(|d| d.is_debuff);
            if is_debuff && !removed.contains(&e.effect_type) {
                removed.push(e.effect_type);
            }
            !is_debuff
        });
        removed
    }

    pub fn is_knocked_out(&self) -> bool {
        self.has(StatusEffectType::KnockedOut)
    }

    pub fn is_doomed(&self) -> bool {
        self.has(StatusEffectType::Doomed)
    }

    pub fn is_dead(&self) -> bool {
        self.has(StatusEffectType::Dead)
    }

    pub fn is_restrained(&self) -> bool {
        self.has(StatusEffectType::Restrained)
    }

    pub fn is_eaten(&self) -> bool {
        self.has(StatusEffectType::Eaten)
    }

    pub fn is_cocoon(&self) -> bool {
        self.has(StatusEffectType::Cocoon)
    }

    pub fn is_sleeping(&self) -> bool {
        self.has(StatusEffectType::Sleeping)
    }

    pub fn is_stunned(&self) -> bool {
        self.has(StatusEffectType::Stunned)
    }

    pub fn is_exhausted(&self) -> bool {
        self.has(StatusEffectType::Exhausted)
    }

    pub fn is_defending(&self) -> bool {
        self.has(StatusEffectType::Defending)
    }

    /// Any restraint-family effect.
    pub fn is_bound(&self) -> bool {
        self.effects.iter().any(|e| e.effect_type.is_restraint())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use StatusEffectType::*;

    fn manager() -> StatusEffectManager {
        StatusEffectManager::new(Arc::new(StatusEffectCatalog::standard()))
    }

    fn vitals(hp: u32, max_hp: u32) -> Vitals {
        Vitals {
            hp,
            max_hp,
            mp: 0,
            max_mp: 0,
        }
    }

    #[test]
    fn test_add_then_refresh() {
        let mut m = manager();
        assert!(m.add_effect(Poisoned, Some(3), Some(5)));
        assert!(!m.add_effect(Poisoned, Some(6), Some(9)));
        assert_eq!(m.count(Poisoned), 1);
        let effect = m.get(Poisoned).unwrap();
        assert_eq!(effect.duration, 6);
        assert_eq!(effect.potency, 9);
    }

    #[test]
    fn test_add_uses_catalog_defaults() {
        let mut m = manager();
        m.add_effect(Poisoned, None, None);
        let effect = m.get(Poisoned).unwrap();
        assert_eq!(effect.duration, 3);
        assert_eq!(effect.potency, 5);
        assert_eq!(effect.name, "Poisoned");
    }

    #[test]
    fn test_stackable_creates_new_instance() {
        let catalog = StatusEffectCatalog::standard().with_definition(
            StatusEffectDefinition::new(Poisoned, "Venom", 3)
                .stackable()
                .on_tick(TickHook::PotencyDamage),
        );
        let mut m = StatusEffectManager::new(Arc::new(catalog));
        assert!(m.add_effect(Poisoned, None, Some(2)));
        assert!(m.add_effect(Poisoned, None, Some(3)));
        assert_eq!(m.count(Poisoned), 2);

        let mut v = vitals(50, 50);
        m.apply_effects(&mut v, "Hero", Side::Player);
        assert_eq!(v.hp, 45);

        assert!(m.remove_effect(Poisoned));
        assert_eq!(m.count(Poisoned), 0);
    }

    #[test]
    fn test_unknown_type_is_noop() {
        let mut m = StatusEffectManager::new(Arc::new(StatusEffectCatalog::empty()));
        assert!(!m.add_effect(Stunned, None, None));
        assert!(m.is_empty());
        assert!(!m.remove_effect(Stunned));
    }

    #[test]
    fn test_damage_modifiers_multiply() {
        let mut m = manager();
        m.add_effect(Defending, None, None); // 0.5
        m.add_effect(Vulnerable, None, None); // 1.5
        assert!((m.damage_modifier() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_two_halvings_compound() {
        let catalog = StatusEffectCatalog::standard().with_definition(
            StatusEffectDefinition::new(Empowered, "Sapped", 2).modifiers(EffectModifiers {
                attack: Some(0.5),
                ..EffectModifiers::none()
            }),
        );
        let mut m = StatusEffectManager::new(Arc::new(catalog));
        m.add_effect(Weakened, None, None);
        m.add_effect(Empowered, None, None);
        assert!((m.attack_modifier() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_empty_modifiers_are_one() {
        let m = manager();
        assert_eq!(m.attack_modifier(), 1.0);
        assert_eq!(m.damage_modifier(), 1.0);
        assert_eq!(m.struggle_modifier(), 1.0);
        assert_eq!(m.accuracy_modifier(), 1.0);
        assert_eq!(m.hp_regen_modifier(), 1.0);
        assert_eq!(m.mp_regen_modifier(), 1.0);
        assert!(m.can_act());
        assert!(m.can_use_skills());
        assert_eq!(m.action_priority(), ActionPriority::Normal);
    }

    #[test]
    fn test_priority_most_restrictive_wins() {
        let mut m = manager();
        m.add_effect(Restrained, None, None);
        assert_eq!(m.action_priority(), ActionPriority::StruggleOnly);
        assert!(m.can_act());
        assert!(!m.can_use_skills());

        m.add_effect(Stunned, None, None);
        assert_eq!(m.action_priority(), ActionPriority::CannotAct);
        assert!(!m.can_act());

        m.remove_effect(Stunned);
        assert_eq!(m.action_priority(), ActionPriority::StruggleOnly);
    }

    #[test]
    fn test_tick_then_no_message_on_zero_delta() {
        let mut m = manager();
        m.add_effect(Regenerating, None, None);
        let mut v = vitals(50, 50);
        let messages = m.apply_effects(&mut v, "Hero", Side::Player);
        assert!(messages.is_empty());
        assert_eq!(v.hp, 50);
    }

    #[test]
    fn test_tick_message_uses_side_variant() {
        let mut m = manager();
        m.add_effect(Poisoned, None, None);
        let mut v = vitals(50, 50);
        let messages = m.apply_effects(&mut v, "Mire Serpent", Side::Boss);
        assert_eq!(messages, vec!["Poison deals 5 damage to Mire Serpent."]);

        let messages = m.apply_effects(&mut v, "Hero", Side::Player);
        assert_eq!(messages, vec!["Poison deals 5 damage to you."]);
        assert_eq!(v.hp, 40);
    }

    #[test]
    fn test_regeneration_scaled_by_hp_regen() {
        let mut m = manager();
        m.add_effect(Regenerating, None, None);
        m.add_effect(Eaten, None, None); // hp_regen 0.0, ticks 4 damage
        let mut v = vitals(30, 50);
        m.apply_effects(&mut v, "Hero", Side::Player);
        assert_eq!(v.hp, 26);
    }

    #[test]
    fn test_duration_countdown() {
        let mut m = manager();
        m.add_effect(Weakened, Some(3), None);
        let mut v = vitals(10, 10);
        m.decrease_durations(&mut v, "Hero", Side::Player);
        m.decrease_durations(&mut v, "Hero", Side::Player);
        assert!(m.has(Weakened));
        m.decrease_durations(&mut v, "Hero", Side::Player);
        assert!(!m.has(Weakened));
    }

    #[test]
    fn test_untimed_effects_persist() {
        let mut m = manager();
        m.add_effect(Restrained, None, None);
        let mut v = vitals(10, 10);
        for _ in 0..20 {
            m.decrease_durations(&mut v, "Hero", Side::Player);
        }
        assert!(m.is_restrained());
    }

    #[test]
    fn test_removal_messages() {
        let mut m = manager();
        m.add_effect(Defending, None, None); // empty template: silent
        m.add_effect(Weakened, Some(1), None); // no template: generic
        m.add_effect(Stunned, Some(1), None); // explicit template
        let mut v = vitals(10, 10);
        let messages = m.decrease_durations(&mut v, "Hero", Side::Player);
        assert_eq!(
            messages,
            vec![
                "Hero's Weakened wore off.".to_string(),
                "You shake off the stun.".to_string()
            ]
        );
        assert!(m.is_empty());
    }

    #[test]
    fn test_knockout_expiry_revives() {
        let mut m = manager();
        m.add_effect(KnockedOut, Some(1), None);
        let mut v = vitals(0, 100);
        m.decrease_durations(&mut v, "Hero", Side::Player);
        assert!(!m.is_knocked_out());
        assert_eq!(v.hp, 25);
    }

    #[test]
    fn test_explicit_remove_skips_hook() {
        let mut m = manager();
        m.add_effect(KnockedOut, None, None);
        m.remove_effect(KnockedOut);
        let mut v = vitals(0, 100);
        m.decrease_durations(&mut v, "Hero", Side::Player);
        assert_eq!(v.hp, 0);
    }

    #[test]
    fn test_remove_debuffs() {
        let mut m = manager();
        m.add_effect(Poisoned, None, None);
        m.add_effect(Charmed, None, None);
        m.add_effect(Empowered, None, None);
        assert_eq!(m.debuff_level(), 2);
        let removed = m.remove_debuffs();
        assert_eq!(removed, vec![Poisoned, Charmed]);
        assert_eq!(m.debuff_level(), 0);
        assert!(m.has(Empowered));
    }

    #[test]
    fn test_terminal_queries() {
        let mut m = manager();
        m.add_effect(Eaten, None, None);
        m.add_effect(Doomed, None, None);
        assert!(m.is_eaten());
        assert!(m.is_bound());
        assert!(m.is_doomed());
        assert!(!m.is_dead());
        assert!(!m.is_cocoon());
        assert!(!m.is_sleeping());
    }
}
