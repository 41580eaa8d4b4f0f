use super::combatant::CombatantState;
use super::stats::{BaseStats, StatSource};
use crate::core::constants::*;
use crate::core::CatalogError;
use crate::items::{EquipmentCatalog, EquipmentDefinition, EquipmentSlot, EquippedGear, ItemId};
use crate::progression::{AbilityType, ProgressionLedger};
use crate::status::{Side, StatusEffectCatalog};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Persistent character data: ability levels and worn gear.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerLoadout {
    pub ledger: ProgressionLedger,
    pub gear: EquippedGear,
}

impl PlayerLoadout {
    pub fn new(ledger: ProgressionLedger) -> Self {
        Self {
            ledger,
            gear: EquippedGear::new(),
        }
    }
}

impl StatSource for PlayerLoadout {
    fn base_stats(&self) -> BaseStats {
        let bonus = self.gear.total_bonuses();
        let toughness = self.ledger.level(AbilityType::Toughness);
        BaseStats {
            max_hp: PLAYER_BASE_HP + HP_PER_TOUGHNESS_LEVEL * toughness + bonus.max_hp,
            max_mp: PLAYER_BASE_MP
                + MP_PER_ENDURANCE_LEVEL * self.ledger.level(AbilityType::Endurance)
                + bonus.max_mp,
            attack_power: PLAYER_BASE_ATTACK
                + ATTACK_PER_COMBAT_LEVEL * self.ledger.level(AbilityType::Combat)
                + bonus.attack,
            defense: PLAYER_BASE_DEFENSE + DEFENSE_PER_TOUGHNESS_LEVEL * toughness + bonus.defense,
        }
    }
}

/// The player in battle. Unlike a boss, the player is only defeated once
/// Dead; a knockout is survivable.
#[derive(Debug, Clone)]
pub struct PlayerActor {
    state: CombatantState,
    loadout: PlayerLoadout,
    struggle_attempts: u32,
    item_uses: HashMap<ItemId, u32>,
}

impl PlayerActor {
    pub fn new(name: &str, loadout: PlayerLoadout, catalog: Arc<StatusEffectCatalog>) -> Self {
        let state = CombatantState::new(name, Side::Player, loadout.base_stats(), catalog);
        Self {
            state,
            loadout,
            struggle_attempts: 0,
            item_uses: HashMap::new(),
        }
    }

    pub fn state(&self) -> &CombatantState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut CombatantState {
        &mut self.state
    }

    pub fn loadout(&self) -> &PlayerLoadout {
        &self.loadout
    }

    pub fn ledger(&self) -> &ProgressionLedger {
        &self.loadout.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut ProgressionLedger {
        &mut self.loadout.ledger
    }

    pub fn level(&self, ability: AbilityType) -> u32 {
        self.loadout.ledger.level(ability)
    }

    pub fn is_defeated(&self) -> bool {
        self.state.is_dead()
    }

    pub fn struggle_attempts(&self) -> u32 {
        self.struggle_attempts
    }

    pub fn record_failed_struggle(&mut self, weight: u32) {
        self.struggle_attempts += weight;
    }

    pub fn reset_struggle_attempts(&mut self) {
        self.struggle_attempts = 0;
    }

    pub fn item_uses(&self, item: ItemId) -> u32 {
        self.item_uses.get(&item).copied().unwrap_or(0)
    }

    pub fn record_item_use(&mut self, item: ItemId) {
        *self.item_uses.entry(item).or_insert(0) += 1;
    }

    /// Equips gear between battles. Takes effect at the next reset.
    pub fn equip(
        &mut self,
        id: &str,
        catalog: &EquipmentCatalog,
    ) -> Result<Option<EquipmentDefinition>, CatalogError> {
        let PlayerLoadout { ledger, gear } = &mut self.loadout;
        gear.equip(id, catalog, ledger)
    }

    pub fn unequip(&mut self, slot: EquipmentSlot) -> Option<EquipmentDefinition> {
        self.loadout.gear.unequip(slot)
    }

    /// Rebuilds the player for a fresh battle from current levels and gear.
    pub fn reset_battle_state(&mut self) {
        self.state.reset_battle_state(&self.loadout);
        self.struggle_attempts = 0;
        self.item_uses.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::StatusEffectType;

    fn catalog() -> Arc<StatusEffectCatalog> {
        Arc::new(StatusEffectCatalog::standard())
    }

    #[test]
    fn test_stats_from_levels() {
        let ledger = ProgressionLedger::with_levels(&[
            (AbilityType::Combat, 2),
            (AbilityType::Toughness, 3),
            (AbilityType::Endurance, 1),
        ]);
        let stats = PlayerLoadout::new(ledger).base_stats();
        assert_eq!(stats.max_hp, 160);
        assert_eq!(stats.max_mp, 60);
        assert_eq!(stats.attack_power, 16);
        assert_eq!(stats.defense, 5);
    }

    #[test]
    fn test_gear_applies_on_reset() {
        let mut player = PlayerActor::new("Hero", PlayerLoadout::default(), catalog());
        assert_eq!(player.state().attack_power(), 10);
        player.equip("iron_sword", &EquipmentCatalog::standard()).unwrap();
        assert_eq!(player.state().attack_power(), 10);
        player.reset_battle_state();
        assert_eq!(player.state().attack_power(), 15);
    }

    #[test]
    fn test_knockout_is_not_defeat() {
        let mut player = PlayerActor::new("Hero", PlayerLoadout::default(), catalog());
        player.state_mut().take_damage(1000);
        assert!(player.state().is_knocked_out());
        assert!(!player.is_defeated());
        player.state_mut().inflict(StatusEffectType::Dead, None, None);
        assert!(player.is_defeated());
    }

    #[test]
    fn test_reset_clears_battle_counters() {
        let mut player = PlayerActor::new("Hero", PlayerLoadout::default(), catalog());
        player.record_failed_struggle(2);
        player.record_item_use(ItemId::HealingDraught);
        player.reset_battle_state();
        assert_eq!(player.struggle_attempts(), 0);
        assert_eq!(player.item_uses(ItemId::HealingDraught), 0);
    }
}
