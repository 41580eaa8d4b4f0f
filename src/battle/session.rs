//! The battle state machine and its command surface.
//!
//! Every command validates first and mutates second: a rejected command
//! leaves the battle exactly as it was.

use super::round::resolve_round_end;
use super::tally::ExperienceTally;
use super::types::{BattleOutcome, BattlePhase, BattleStats, PlayerCommand, TurnReport};
use crate::actor::{BossActor, PlayerActor};
use crate::boss::{ActionSelector, BossActionDef, BossDefinition, PlayerView};
use crate::catalog::Catalogs;
use crate::core::{ActionRejected, BattleConfig, BattleError};
use crate::items::ItemId;
use crate::skills::{resolve_boss_action, resolve_item, resolve_skill, SkillEffect, SkillId};
use crate::status::{ActionPriority, StatusEffectType};
use rand::Rng;
use std::str::FromStr;
use std::sync::Arc;

/// What the boss will do this turn, decided before anything mutates.
enum BossPlan {
    Finish,
    Incapacitated,
    Idle,
    Act(BossActionDef),
}

pub struct BattleSession {
    player: PlayerActor,
    boss: BossActor,
    selector: Box<dyn ActionSelector>,
    catalogs: Arc<Catalogs>,
    config: BattleConfig,
    phase: BattlePhase,
    round: u32,
    outcome: Option<BattleOutcome>,
    tally: ExperienceTally,
    stats: BattleStats,
    experience_collected: bool,
}

impl BattleSession {
    pub fn new(
        player: PlayerActor,
        boss: Arc<BossDefinition>,
        selector: Box<dyn ActionSelector>,
        catalogs: Arc<Catalogs>,
        config: BattleConfig,
    ) -> Self {
        let boss = BossActor::new(boss, Arc::clone(&catalogs.status));
        Self {
            player,
            boss,
            selector,
            catalogs,
            config,
            phase: BattlePhase::PreBattle,
            round: 0,
            outcome: None,
            tally: ExperienceTally::default(),
            stats: BattleStats::default(),
            experience_collected: false,
        }
    }

    pub fn player(&self) -> &PlayerActor {
        &self.player
    }

    pub fn boss(&self) -> &BossActor {
        &self.boss
    }

    /// Hands the player back, e.g. to persist its ledger after the battle.
    pub fn into_player(self) -> PlayerActor {
        self.player
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// True once the player is Dead. The battle itself is not latched; the
    /// caller decides how to frame the loss.
    pub fn player_defeated(&self) -> bool {
        self.player.is_defeated()
    }

    pub fn tally(&self) -> &ExperienceTally {
        &self.tally
    }

    pub fn stats(&self) -> &BattleStats {
        &self.stats
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    /// Resets both sides and opens round 1.
    pub fn start(&mut self) -> Result<TurnReport, ActionRejected> {
        if self.outcome.is_some() {
            return Err(ActionRejected::BattleOver);
        }
        if self.phase != BattlePhase::PreBattle {
            return Err(ActionRejected::AlreadyStarted);
        }

        self.player.reset_battle_state();
        self.boss.reset_battle_state();
        self.tally = ExperienceTally::default();
        self.stats = BattleStats::default();
        self.round = 1;
        self.phase = BattlePhase::PlayerTurn;
        log::info!(
            "Battle started: {} vs {}",
            self.player.state().name(),
            self.boss.name()
        );

        let mut messages = self.boss.definition().intro.clone();
        messages.push(round_divider(self.round));
        Ok(self.report(messages))
    }

    pub fn player_attack<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<TurnReport, ActionRejected> {
        self.perform_skill(SkillId::BasicAttack, rng)
    }

    pub fn player_defend<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<TurnReport, ActionRejected> {
        self.perform_skill(SkillId::Defend, rng)
    }

    pub fn attempt_struggle<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<TurnReport, ActionRejected> {
        self.perform_skill(SkillId::Struggle, rng)
    }

    /// Uses a skill by its snake_case id, e.g. `"power_strike"`.
    pub fn use_skill<R: Rng + ?Sized>(&mut self, id: &str, rng: &mut R) -> Result<TurnReport, ActionRejected> {
        let skill = SkillId::from_str(id).map_err(|_| ActionRejected::UnknownSkill(id.to_string()))?;
        self.perform_skill(skill, rng)
    }

    fn perform_skill<R: Rng + ?Sized>(&mut self, id: SkillId, rng: &mut R) -> Result<TurnReport, ActionRejected> {
        self.ensure_player_turn()?;
        let skill = self
            .catalogs
            .skills
            .get(id)
            .cloned()
            .ok_or_else(|| ActionRejected::UnknownSkill(id.to_string()))?;

        if let Some(gate) = skill.unlock {
            if !self.player.ledger().meets(gate.ability, gate.level) {
                return Err(ActionRejected::SkillLocked {
                    skill: skill.name.clone(),
                    ability: gate.ability,
                    required: gate.level,
                });
            }
        }

        let state = self.player.state();
        match state.action_priority() {
            ActionPriority::CannotAct => return Err(ActionRejected::CannotAct),
            ActionPriority::StruggleOnly if !skill.usable_while_bound => {
                return Err(if skill.id.is_basic() {
                    ActionRejected::StruggleOnly
                } else {
                    ActionRejected::NotUsableWhileBound(skill.name.clone())
                });
            }
            _ => {}
        }
        let is_struggle = matches!(skill.effect, SkillEffect::Struggle { .. });
        if is_struggle && !state.is_bound() {
            return Err(ActionRejected::NotRestrained);
        }
        if !skill.id.is_basic() && !skill.usable_while_bound && !state.effects().can_use_skills() {
            return Err(ActionRejected::SkillsSealed);
        }
        if skill.mp_cost > state.mp() && !skill.desperation {
            return Err(ActionRejected::NotEnoughMp {
                skill: skill.name.clone(),
                cost: skill.mp_cost,
            });
        }

        log::debug!("Round {}: player uses {}", self.round, skill.id);
        let outcome = resolve_skill(&skill, &mut self.player, self.boss.state_mut(), &self.config, rng);
        self.tally.damage_dealt += outcome.damage.unwrap_or(0) as u64;
        self.tally.mp_spent += outcome.mp_spent as u64;
        if is_struggle {
            self.tally.struggles += 1;
        }
        self.stats.player_crits += outcome.critical as u32;
        self.stats.player_misses += outcome.missed as u32;
        Ok(self.finish_player_action(outcome.messages))
    }

    /// Uses a consumable by its snake_case id, e.g. `"healing_draught"`.
    pub fn use_item(&mut self, id: &str) -> Result<TurnReport, ActionRejected> {
        self.ensure_player_turn()?;
        let item_id = ItemId::from_str(id).map_err(|_| ActionRejected::UnknownItem(id.to_string()))?;
        let item = self
            .catalogs
            .items
            .get(item_id)
            .cloned()
            .ok_or_else(|| ActionRejected::UnknownItem(id.to_string()))?;

        if !self.player.ledger().meets(item.required_ability, item.required_level) {
            return Err(ActionRejected::ItemLocked {
                item: item.name.clone(),
                ability: item.required_ability,
                required: item.required_level,
            });
        }
        self.ensure_normal_priority()?;
        if self.player.item_uses(item_id) >= item.uses_per_battle {
            return Err(ActionRejected::ItemDepleted(item.name.clone()));
        }

        log::debug!("Round {}: player uses {}", self.round, item_id);
        let outcome = resolve_item(&item, &mut self.player);
        self.tally.items_used += 1;
        Ok(self.finish_player_action(outcome.messages))
    }

    /// Passes the turn. This is the only move while unable to act.
    pub fn stay_still(&mut self) -> Result<TurnReport, ActionRejected> {
        self.ensure_player_turn()?;
        let effects = self.player.state().effects();
        let message = if effects.is_knocked_out() {
            "You lie senseless on the ground."
        } else if effects.is_doomed() {
            "You cannot move."
        } else if effects.is_sleeping() {
            "You are fast asleep."
        } else if effects.is_stunned() {
            "You are stunned and cannot move!"
        } else if effects.is_bound() {
            "You stop resisting for a moment."
        } else {
            "You hold still and watch."
        };
        Ok(self.finish_player_action(vec![message.to_string()]))
    }

    /// Abandons the battle. Both sides are reset and the outcome is latched.
    /// Still allowed once the player is Dead.
    pub fn give_up(&mut self) -> Result<TurnReport, ActionRejected> {
        if self.outcome.is_some() {
            return Err(ActionRejected::BattleOver);
        }
        match self.phase {
            BattlePhase::PreBattle => return Err(ActionRejected::NotStarted),
            BattlePhase::PlayerTurn => {}
            _ => return Err(ActionRejected::NotPlayerTurn),
        }

        self.player.reset_battle_state();
        self.boss.reset_battle_state();
        self.outcome = Some(BattleOutcome::Abandoned);
        self.phase = BattlePhase::Ended;
        log::info!("Battle abandoned in round {}", self.round);
        Ok(self.report(vec!["You give up the fight.".to_string()]))
    }

    /// Runs the boss's turn and the round end that follows it.
    pub fn boss_turn<R: Rng>(&mut self, rng: &mut R) -> Result<TurnReport, BattleError> {
        if self.outcome.is_some() {
            return Err(ActionRejected::BattleOver.into());
        }
        match self.phase {
            BattlePhase::BossTurn => {}
            BattlePhase::PreBattle => return Err(ActionRejected::NotStarted.into()),
            _ => return Err(ActionRejected::NotBossTurn.into()),
        }

        let plan = self.plan_boss_turn(rng)?;
        let mut messages = Vec::new();
        self.boss.state_mut().start_turn();

        match plan {
            BossPlan::Finish => {
                log::info!("{} finishes off {}", self.boss.name(), self.player.state().name());
                messages.extend(self.boss.definition().finishing.iter().cloned());
                let state = self.player.state_mut();
                state.inflict(StatusEffectType::Dead, None, None);
                state.remove_status(StatusEffectType::Doomed);
            }
            BossPlan::Incapacitated => {
                let effects = self.boss.state().effects();
                if effects.is_stunned() || effects.is_sleeping() {
                    messages.push(format!("{} cannot act!", self.boss.name()));
                }
            }
            BossPlan::Idle => {
                messages.push(format!("{} watches you warily.", self.boss.name()));
            }
            BossPlan::Act(action) => {
                log::debug!("Round {}: {} uses {}", self.round, self.boss.name(), action.id);
                let outcome =
                    resolve_boss_action(&action, &mut self.boss, &mut self.player, &self.config, rng);
                self.tally.damage_taken += outcome.damage.unwrap_or(0) as u64;
                self.stats.boss_crits += outcome.critical as u32;
                self.stats.boss_misses += outcome.missed as u32;
                messages.extend(outcome.messages);
            }
        }
        self.drain_notices(&mut messages);

        self.phase = BattlePhase::RoundEnd;
        log::debug!("Round {} ending", self.round);
        messages.extend(resolve_round_end(
            self.player.state_mut(),
            self.boss.state_mut(),
        ));
        if self.boss.is_defeated() {
            self.latch_victory(&mut messages);
            return Ok(self.report(messages));
        }

        self.round += 1;
        messages.push(round_divider(self.round));
        self.phase = BattlePhase::PlayerTurn;
        self.player.state_mut().start_turn();
        Ok(self.report(messages))
    }

    fn plan_boss_turn<R: Rng>(&mut self, rng: &mut R) -> Result<BossPlan, BattleError> {
        let player = self.player.state();
        if player.is_doomed() && !player.is_dead() {
            return Ok(BossPlan::Finish);
        }
        if !self.boss.state().can_act() {
            return Ok(BossPlan::Incapacitated);
        }

        let view = PlayerView::of(&self.player);
        let Some(id) = self.selector.select_action(&view, self.round, rng) else {
            return Ok(BossPlan::Idle);
        };
        let action = self.boss.action(&id)?.clone();
        self.selector.commit(&id);
        Ok(BossPlan::Act(action))
    }

    /// Executes a menu command.
    pub fn dispatch<R: Rng + ?Sized>(
        &mut self,
        command: PlayerCommand,
        rng: &mut R,
    ) -> Result<TurnReport, ActionRejected> {
        match command {
            PlayerCommand::Attack => self.player_attack(rng),
            PlayerCommand::Defend => self.player_defend(rng),
            PlayerCommand::Skill(id) => self.perform_skill(id, rng),
            PlayerCommand::Item(id) => self.use_item(&id.to_string()),
            PlayerCommand::Struggle => self.attempt_struggle(rng),
            PlayerCommand::StayStill => self.stay_still(),
            PlayerCommand::GiveUp => self.give_up(),
        }
    }

    /// Commands the player may issue right now, in menu order.
    pub fn available_commands(&self) -> Vec<PlayerCommand> {
        if self.outcome.is_some() || self.phase != BattlePhase::PlayerTurn {
            return Vec::new();
        }
        if self.player.is_defeated() {
            return vec![PlayerCommand::GiveUp];
        }

        let state = self.player.state();
        let priority = state.action_priority();
        let mut commands = Vec::new();

        match priority {
            ActionPriority::CannotAct => {}
            ActionPriority::StruggleOnly => {
                commands.push(PlayerCommand::Struggle);
            }
            ActionPriority::Normal => {
                commands.push(PlayerCommand::Attack);
                commands.push(PlayerCommand::Defend);
                if state.is_bound() {
                    commands.push(PlayerCommand::Struggle);
                }
            }
        }

        if priority != ActionPriority::CannotAct {
            let can_use_skills = state.effects().can_use_skills();
            for id in SkillId::all().into_iter().filter(|id| !id.is_basic()) {
                let Some(skill) = self.catalogs.skills.get(id) else {
                    continue;
                };
                let unlocked = skill
                    .unlock
                    .map_or(true, |gate| self.player.ledger().meets(gate.ability, gate.level));
                let allowed = if priority == ActionPriority::StruggleOnly {
                    skill.usable_while_bound
                } else {
                    can_use_skills || skill.usable_while_bound
                };
                let is_struggle = matches!(skill.effect, SkillEffect::Struggle { .. });
                let affordable = skill.desperation || skill.mp_cost <= state.mp();
                if unlocked && allowed && affordable && (!is_struggle || state.is_bound()) {
                    commands.push(PlayerCommand::Skill(id));
                }
            }
        }

        if priority == ActionPriority::Normal {
            for id in ItemId::all() {
                let Some(item) = self.catalogs.items.get(id) else {
                    continue;
                };
                if self.player.ledger().meets(item.required_ability, item.required_level)
                    && self.player.item_uses(id) < item.uses_per_battle
                {
                    commands.push(PlayerCommand::Item(id));
                }
            }
        }

        commands.push(PlayerCommand::StayStill);
        commands.push(PlayerCommand::GiveUp);
        commands
    }

    /// Converts the battle's tally into ability experience, once, after the
    /// battle has ended. Giving up forfeits it. Returns progress messages.
    pub fn collect_experience(&mut self) -> Vec<String> {
        if self.experience_collected || self.outcome != Some(BattleOutcome::Victory) {
            return Vec::new();
        }
        self.experience_collected = true;

        let mut messages = Vec::new();
        for (ability, amount) in self.tally.gains(true, self.config.victory_bonus_exp) {
            let change = self.player.ledger_mut().add_experience(ability, amount);
            messages.push(format!("{} experience +{}.", ability, amount));
            if change.leveled_up {
                messages.push(format!("{} rose to level {}!", ability, change.new_level));
            }
        }
        messages
    }

    fn ensure_player_turn(&self) -> Result<(), ActionRejected> {
        if self.outcome.is_some() {
            return Err(ActionRejected::BattleOver);
        }
        match self.phase {
            BattlePhase::PlayerTurn => {}
            BattlePhase::PreBattle => return Err(ActionRejected::NotStarted),
            _ => return Err(ActionRejected::NotPlayerTurn),
        }
        if self.player.is_defeated() {
            return Err(ActionRejected::PlayerDefeated);
        }
        Ok(())
    }

    fn ensure_normal_priority(&self) -> Result<(), ActionRejected> {
        match self.player.state().action_priority() {
            ActionPriority::Normal => Ok(()),
            ActionPriority::StruggleOnly => Err(ActionRejected::StruggleOnly),
            ActionPriority::CannotAct => Err(ActionRejected::CannotAct),
        }
    }

    fn finish_player_action(&mut self, mut messages: Vec<String>) -> TurnReport {
        self.drain_notices(&mut messages);
        if self.boss.is_defeated() {
            self.latch_victory(&mut messages);
        } else {
            self.phase = BattlePhase::BossTurn;
        }
        self.report(messages)
    }

    fn drain_notices(&mut self, messages: &mut Vec<String>) {
        messages.extend(self.player.state_mut().drain_notices());
        messages.extend(self.boss.state_mut().drain_notices());
    }

    fn latch_victory(&mut self, messages: &mut Vec<String>) {
        self.outcome = Some(BattleOutcome::Victory);
        self.phase = BattlePhase::Ended;
        log::info!("Victory over {} in round {}", self.boss.name(), self.round);
        messages.push(format!("{} is defeated! Victory!", self.boss.name()));
    }

    fn report(&self, messages: Vec<String>) -> TurnReport {
        TurnReport {
            messages,
            phase: self.phase,
        }
    }
}

fn round_divider(round: u32) -> String {
    format!("--- Round {} ---", round)
}
