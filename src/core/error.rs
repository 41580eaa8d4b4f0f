//! Error types for the battle engine.
//!
//! Two families: [`ActionRejected`] is invalid input at the command surface
//! (its `Display` text is what the player sees), and [`CatalogError`] is a
//! content defect that the caller has to surface. Running out of MP or
//! reaching the end of a battle are not errors.

use crate::progression::AbilityType;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionRejected {
    #[error("The battle is already over.")]
    BattleOver,

    #[error("The battle has not started yet.")]
    NotStarted,

    #[error("The battle has already begun.")]
    AlreadyStarted,

    #[error("It is not your turn.")]
    NotPlayerTurn,

    #[error("It is not the boss's turn.")]
    NotBossTurn,

    #[error("You have been defeated and can no longer act.")]
    PlayerDefeated,

    #[error("You cannot act right now.")]
    CannotAct,

    #[error("You are held fast and can only struggle or stay still.")]
    StruggleOnly,

    #[error("There is nothing to struggle against.")]
    NotRestrained,

    #[error("You cannot use skills right now.")]
    SkillsSealed,

    #[error("Unknown skill '{0}'.")]
    UnknownSkill(String),

    #[error("{skill} requires {ability} level {required}.")]
    SkillLocked {
        skill: String,
        ability: AbilityType,
        required: u32,
    },

    #[error("Not enough MP for {skill} (needs {cost}).")]
    NotEnoughMp { skill: String, cost: u32 },

    #[error("{0} cannot be used while held.")]
    NotUsableWhileBound(String),

    #[error("Unknown item '{0}'.")]
    UnknownItem(String),

    #[error("{item} requires {ability} level {required}.")]
    ItemLocked {
        item: String,
        ability: AbilityType,
        required: u32,
    },

    #[error("No {0} left for this battle.")]
    ItemDepleted(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Unknown equipment id '{0}'")]
    UnknownEquipment(String),

    #[error("Equipment '{id}' requires {ability} level {required}")]
    EquipmentLocked {
        id: String,
        ability: AbilityType,
        required: u32,
    },

    #[error("Boss '{boss}' has no action '{action}'")]
    UnknownBossAction { boss: String, action: String },
}

/// Anything `boss_turn` can fail with.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BattleError {
    #[error(transparent)]
    Rejected(#[from] ActionRejected),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
