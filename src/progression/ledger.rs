use super::types::{AbilityTrack, AbilityType, LevelChange};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One ability as exported to the save layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedAbility {
    pub level: u32,
    pub experience: u64,
}

/// Flat save shape: ability id → `{ level, experience }`.
pub type AbilitySaveData = BTreeMap<String, SavedAbility>;

/// All ability tracks of the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionLedger {
    tracks: BTreeMap<AbilityType, AbilityTrack>,
}

impl Default for ProgressionLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressionLedger {
    pub fn new() -> Self {
        Self {
            tracks: AbilityType::all()
                .into_iter()
                .map(|ability| (ability, AbilityTrack::new()))
                .collect(),
        }
    }

    /// Builder for tests and tooling: starts every listed ability at a level.
    pub fn with_levels(levels: &[(AbilityType, u32)]) -> Self {
        let mut ledger = Self::new();
        for &(ability, level) in levels {
            ledger.set_level(ability, level);
        }
        ledger
    }

    pub fn track(&self, ability: AbilityType) -> AbilityTrack {
        self.tracks.get(&ability).copied().unwrap_or_default()
    }

    fn track_mut(&mut self, ability: AbilityType) -> &mut AbilityTrack {
        self.tracks.entry(ability).or_default()
    }

    pub fn level(&self, ability: AbilityType) -> u32 {
        self.track(ability).level()
    }

    pub fn experience(&self, ability: AbilityType) -> u64 {
        self.track(ability).experience()
    }

    pub fn meets(&self, ability: AbilityType, required_level: u32) -> bool {
        self.level(ability) >= required_level
    }

    pub fn add_experience(&mut self, ability: AbilityType, amount: u64) -> LevelChange {
        let change = self.track_mut(ability).add_experience(amount);
        if change.leveled_up {
            log::info!(
                "{} leveled up: {} -> {}",
                ability,
                change.previous_level,
                change.new_level
            );
        }
        change
    }

    pub fn experience_to_next_level(&self, ability: AbilityType) -> u64 {
        self.track(ability).experience_to_next_level()
    }

    /// Debug override.
    pub fn set_level(&mut self, ability: AbilityType, level: u32) {
        self.track_mut(ability).set_level(level);
    }

    /// Debug override.
    pub fn set_experience(&mut self, ability: AbilityType, experience: u64) {
        self.track_mut(ability).set_experience(experience);
    }

    pub fn export_for_save(&self) -> AbilitySaveData {
        self.tracks
            .iter()
            .map(|(ability, track)| {
                (
                    ability.id().to_string(),
                    SavedAbility {
                        level: track.level(),
                        experience: track.experience(),
                    },
                )
            })
            .collect()
    }

    /// Loads saved tracks. Experience is authoritative; the stored level is
    /// recomputed from it. Unknown ids are skipped, missing ones stay as-is.
    pub fn load_from_save_data(&mut self, data: &AbilitySaveData) {
        for (id, saved) in data {
            let Some(ability) = AbilityType::from_id(id) else {
                log::warn!("Skipping unknown ability '{}' in save data", id);
                continue;
            };
            let track = AbilityTrack::from_experience(saved.experience);
            if track.level() != saved.level {
                log::warn!(
                    "Saved level {} for {} disagrees with experience {}; using level {}",
                    saved.level,
                    ability,
                    saved.experience,
                    track.level()
                );
            }
            self.tracks.insert(ability, track);
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.export_for_save())
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let data: AbilitySaveData = serde_json::from_str(json)?;
        let mut ledger = Self::new();
        ledger.load_from_save_data(&data);
        Ok(ledger)
    }
}
