use crate::core::constants::{EXP_CURVE_FACTOR, MAX_ABILITY_LEVEL};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

/// A growth track. Levels feed player stat derivation and unlock gates.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumIter,
)]
pub enum AbilityType {
    Combat,
    Toughness,
    Endurance,
    Agility,
    CraftWork,
}

impl AbilityType {
    pub fn all() -> Vec<AbilityType> {
        AbilityType::iter().collect()
    }

    /// Stable id used in save data.
    pub fn id(&self) -> &'static str {
        match self {
            AbilityType::Combat => "combat",
            AbilityType::Toughness => "toughness",
            AbilityType::Endurance => "endurance",
            AbilityType::Agility => "agility",
            AbilityType::CraftWork => "craftwork",
        }
    }

    pub fn from_id(id: &str) -> Option<AbilityType> {
        AbilityType::iter().find(|ability| ability.id() == id)
    }
}

/// Outcome of an experience grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelChange {
    pub leveled_up: bool,
    pub previous_level: u32,
    pub new_level: u32,
}

/// Cumulative experience required to reach `level`: `L^3 × 50`, saturating
/// at `u64::MAX`.
pub fn required_experience_for_level(level: u32) -> u64 {
    let level = level as u64;
    level
        .saturating_mul(level)
        .saturating_mul(level)
        .saturating_mul(EXP_CURVE_FACTOR)
}

/// Highest level whose threshold `experience` meets, capped at the max level.
pub fn level_for_experience(experience: u64) -> u32 {
    (1..=MAX_ABILITY_LEVEL)
        .take_while(|&level| required_experience_for_level(level) <= experience)
        .last()
        .unwrap_or(0)
}

/// Level and cumulative experience of one ability.
///
/// `level` is always `level_for_experience(experience)`; the only writers are
/// the methods below. Deserializing recomputes the level from experience.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredTrack")]
pub struct AbilityTrack {
    level: u32,
    experience: u64,
}

/// Wire shape of a track. A stored `level` is ignored.
#[derive(Deserialize)]
struct StoredTrack {
    experience: u64,
}

impl From<StoredTrack> for AbilityTrack {
    fn from(stored: StoredTrack) -> Self {
        AbilityTrack::from_experience(stored.experience)
    }
}

impl AbilityTrack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_experience(experience: u64) -> Self {
        Self {
            level: level_for_experience(experience),
            experience,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn experience(&self) -> u64 {
        self.experience
    }

    pub fn is_max_level(&self) -> bool {
        self.level >= MAX_ABILITY_LEVEL
    }

    /// Adds experience and recomputes the level.
    pub fn add_experience(&mut self, amount: u64) -> LevelChange {
        let previous_level = self.level;
        self.experience = self.experience.saturating_add(amount);
        self.level = level_for_experience(self.experience);
        LevelChange {
            leveled_up: self.level > previous_level,
            previous_level,
            new_level: self.level,
        }
    }

    /// Signed entry point for callers holding untrusted deltas. Negative
    /// grants are ignored.
    pub fn grant_experience(&mut self, amount: i64) -> LevelChange {
        if amount < 0 {
            return LevelChange {
                leveled_up: false,
                previous_level: self.level,
                new_level: self.level,
            };
        }
        self.add_experience(amount as u64)
    }

    /// Debug override. Unlike grants this may lower experience.
    pub fn set_experience(&mut self, experience: u64) {
        self.experience = experience;
        self.level = level_for_experience(experience);
    }

    /// Debug override: jumps to exactly the threshold of `level`.
    pub fn set_level(&mut self, level: u32) {
        self.set_experience(required_experience_for_level(level.min(MAX_ABILITY_LEVEL)));
    }

    /// Gap to the next threshold, or 0 at max level.
    pub fn experience_to_next_level(&self) -> u64 {
        if self.is_max_level() {
            return 0;
        }
        required_experience_for_level(self.level + 1).saturating_sub(self.experience)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_experience_curve() {
        assert_eq!(required_experience_for_level(0), 0);
        assert_eq!(required_experience_for_level(1), 50);
        assert_eq!(required_experience_for_level(2), 400);
        assert_eq!(required_experience_for_level(3), 1350);
        assert_eq!(required_experience_for_level(10), 50_000);
    }

    #[test]
    fn test_required_experience_saturates() {
        assert_eq!(required_experience_for_level(1_000_000), u64::MAX);
        assert_eq!(required_experience_for_level(u32::MAX), u64::MAX);
    }

    #[test]
    fn test_deserialize_recomputes_level() {
        let track: AbilityTrack = serde_json::from_str(r#"{ "level": 9, "experience": 400 }"#).unwrap();
        assert_eq!(track.level(), 2);
        assert_eq!(track.experience(), 400);

        let track: AbilityTrack = serde_json::from_str(r#"{ "experience": 1350 }"#).unwrap();
        assert_eq!(track.level(), 3);
    }

    #[test]
    fn test_level_for_experience_boundaries() {
        assert_eq!(level_for_experience(0), 0);
        assert_eq!(level_for_experience(49), 0);
        assert_eq!(level_for_experience(50), 1);
        assert_eq!(level_for_experience(399), 1);
        assert_eq!(level_for_experience(400), 2);
        assert_eq!(level_for_experience(50_000), 10);
        assert_eq!(level_for_experience(u64::MAX), MAX_ABILITY_LEVEL);
    }

    #[test]
    fn test_add_experience_reports_level_up() {
        let mut track = AbilityTrack::new();
        let change = track.add_experience(60);
        assert!(change.leveled_up);
        assert_eq!(change.previous_level, 0);
        assert_eq!(change.new_level, 1);

        let change = track.add_experience(10);
        assert!(!change.leveled_up);
        assert_eq!(track.experience(), 70);
    }

    #[test]
    fn test_add_experience_can_cross_several_levels() {
        let mut track = AbilityTrack::new();
        let change = track.add_experience(1_400);
        assert_eq!(change.new_level, 3);
        assert!(change.leveled_up);
    }

    #[test]
    fn test_negative_grant_is_noop() {
        let mut track = AbilityTrack::from_experience(500);
        let change = track.grant_experience(-200);
        assert!(!change.leveled_up);
        assert_eq!(track.experience(), 500);
        assert_eq!(track.level(), 2);
    }

    #[test]
    fn test_max_level_clamp() {
        let mut track = AbilityTrack::new();
        track.add_experience(1_000_000);
        assert_eq!(track.level(), MAX_ABILITY_LEVEL);
        assert_eq!(track.experience(), 1_000_000);
        assert_eq!(track.experience_to_next_level(), 0);
    }

    #[test]
    fn test_experience_to_next_level() {
        let track = AbilityTrack::from_experience(100);
        assert_eq!(track.level(), 1);
        assert_eq!(track.experience_to_next_level(), 300);
    }

    #[test]
    fn test_set_level_roundtrip() {
        let mut track = AbilityTrack::new();
        for level in 0..=MAX_ABILITY_LEVEL {
            track.set_level(level);
            assert_eq!(track.level(), level);
            assert_eq!(track.experience(), required_experience_for_level(level));
        }
        track.set_level(99);
        assert_eq!(track.level(), MAX_ABILITY_LEVEL);
    }

    #[test]
    fn test_ability_ids_roundtrip() {
        for ability in AbilityType::all() {
            assert_eq!(AbilityType::from_id(ability.id()), Some(ability));
        }
        assert_eq!(AbilityType::from_id("cooking"), None);
    }
}
