use crate::items::ItemId;
use crate::skills::SkillId;
use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum BattlePhase {
    PreBattle,
    PlayerTurn,
    BossTurn,
    RoundEnd,
    Ended,
}

/// How a battle ended. A dead player is reported separately through
/// `player_defeated`, not latched here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum BattleOutcome {
    Victory,
    Abandoned,
}

/// Everything a command produced, in order, and where the battle stands now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    pub messages: Vec<String>,
    pub phase: BattlePhase,
}

/// A player command as offered to menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerCommand {
    Attack,
    Defend,
    Skill(SkillId),
    Item(ItemId),
    Struggle,
    StayStill,
    GiveUp,
}

/// Hit-roll counters for balance reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleStats {
    pub player_crits: u32,
    pub player_misses: u32,
    pub boss_crits: u32,
    pub boss_misses: u32,
}
