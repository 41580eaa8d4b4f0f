//! Boss AI seam. The battle asks an [`ActionSelector`] for an action id each
//! boss turn and resolves whatever comes back against the boss's definition.

use crate::actor::PlayerActor;
use crate::status::ActionPriority;
use rand::{Rng, RngCore};

/// What a selector is allowed to know about the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerView {
    pub hp: u32,
    pub max_hp: u32,
    pub mp: u32,
    pub max_mp: u32,
    pub priority: ActionPriority,
    pub restrained: bool,
    pub eaten: bool,
    pub cocooned: bool,
    pub knocked_out: bool,
    pub doomed: bool,
    pub debuff_level: usize,
    pub struggle_attempts: u32,
}

impl PlayerView {
    pub fn of(player: &PlayerActor) -> Self {
        let state = player.state();
        let effects = state.effects();
        Self {
            hp: state.hp(),
            max_hp: state.max_hp(),
            mp: state.mp(),
            max_mp: state.max_mp(),
            priority: state.action_priority(),
            restrained: effects.is_restrained(),
            eaten: effects.is_eaten(),
            cocooned: effects.is_cocoon(),
            knocked_out: effects.is_knocked_out(),
            doomed: effects.is_doomed(),
            debuff_level: effects.debuff_level(),
            struggle_attempts: player.struggle_attempts(),
        }
    }

    pub fn hp_fraction(&self) -> f64 {
        if self.max_hp == 0 {
            return 0.0;
        }
        self.hp as f64 / self.max_hp as f64
    }

    /// Neither held nor down.
    pub fn is_free(&self) -> bool {
        !self.restrained && !self.eaten && !self.cocooned && !self.knocked_out
    }
}

/// Chooses the boss's action each turn.
///
/// Selection is two-phase: `select_action` proposes an id and `commit` is
/// called only after the id has been found in the boss's action table.
/// Selectors that keep state advance it in `commit`, so a rejected id
/// leaves them where they were.
pub trait ActionSelector {
    /// Picks the next action id, or `None` to idle this turn.
    fn select_action(&mut self, player: &PlayerView, round: u32, rng: &mut dyn RngCore) -> Option<String>;

    /// Confirms that the proposed `action_id` is being used this turn.
    fn commit(&mut self, _action_id: &str) {}
}

/// Cycles through a fixed list of action ids.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSelector {
    rotation: Vec<String>,
    next: usize,
}

impl ScriptedSelector {
    pub fn new<S: Into<String>>(rotation: impl IntoIterator<Item = S>) -> Self {
        Self {
            rotation: rotation.into_iter().map(Into::into).collect(),
            next: 0,
        }
    }
}

impl ActionSelector for ScriptedSelector {
    fn select_action(&mut self, _player: &PlayerView, _round: u32, _rng: &mut dyn RngCore) -> Option<String> {
        if self.rotation.is_empty() {
            return None;
        }
        Some(self.rotation[self.next % self.rotation.len()].clone())
    }

    fn commit(&mut self, _action_id: &str) {
        self.next += 1;
    }
}

/// When a weighted rule is eligible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectCondition {
    Always,
    PlayerFree,
    /// Restrained but not yet swallowed.
    PlayerRestrained,
    PlayerEaten,
    PlayerCocooned,
    PlayerKnockedOut,
    PlayerHpBelow(f64),
    FromRound(u32),
}

impl SelectCondition {
    pub fn matches(&self, player: &PlayerView, round: u32) -> bool {
        match *self {
            SelectCondition::Always => true,
            SelectCondition::PlayerFree => player.is_free(),
            SelectCondition::PlayerRestrained => player.restrained && !player.eaten,
            SelectCondition::PlayerEaten => player.eaten,
            SelectCondition::PlayerCocooned => player.cocooned,
            SelectCondition::PlayerKnockedOut => player.knocked_out,
            SelectCondition::PlayerHpBelow(fraction) => player.hp_fraction() < fraction,
            SelectCondition::FromRound(first) => round >= first,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectionRule {
    pub action_id: String,
    pub weight: u32,
    pub condition: SelectCondition,
}

/// Picks among the rules whose condition holds, proportionally to weight.
#[derive(Debug, Clone, Default)]
pub struct WeightedSelector {
    rules: Vec<SelectionRule>,
}

impl WeightedSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule(mut self, action_id: &str, weight: u32, condition: SelectCondition) -> Self {
        self.rules.push(SelectionRule {
            action_id: action_id.to_string(),
            weight,
            condition,
        });
        self
    }

    pub fn rules(&self) -> &[SelectionRule] {
        &self.rules
    }
}

impl ActionSelector for WeightedSelector {
    fn select_action(&mut self, player: &PlayerView, round: u32, rng: &mut dyn RngCore) -> Option<String> {
        let eligible: Vec<&SelectionRule> = self
            .rules
            .iter()
            .filter(|r| r.weight > 0 && r.condition.matches(player, round))
            .collect();
        let total: u32 = eligible.iter().map(|r| r.weight).sum();
        if total == 0 {
            return None;
        }

        let mut roll = rng.gen_range(0..total);
        for rule in eligible {
            if roll < rule.weight {
                return Some(rule.action_id.clone());
            }
            roll -= rule.weight;
        }
        None
    }
}
