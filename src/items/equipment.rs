use crate::core::CatalogError;
use crate::progression::{AbilityType, ProgressionLedger};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EquipmentSlot {
    Weapon,
    Armor,
    Accessory,
}

/// Flat stat bonuses granted while a piece is worn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBonuses {
    pub max_hp: u32,
    pub max_mp: u32,
    pub attack: u32,
    pub defense: u32,
}

impl std::ops::AddAssign for StatBonuses {
    fn add_assign(&mut self, other: Self) {
        self.max_hp += other.max_hp;
        self.max_mp += other.max_mp;
        self.attack += other.attack;
        self.defense += other.defense;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentDefinition {
    pub id: String,
    pub name: String,
    pub slot: EquipmentSlot,
    pub bonuses: StatBonuses,
    /// Ability track gating the piece.
    pub required_ability: AbilityType,
    pub required_level: u32,
}

/// Read-only table of equippable gear keyed by id.
#[derive(Debug, Clone, Default)]
pub struct EquipmentCatalog {
    items: HashMap<String, EquipmentDefinition>,
}

impl EquipmentCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, definition: EquipmentDefinition) {
        self.items.insert(definition.id.clone(), definition);
    }

    pub fn get(&self, id: &str) -> Result<&EquipmentDefinition, CatalogError> {
        self.items
            .get(id)
            .ok_or_else(|| CatalogError::UnknownEquipment(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn standard() -> Self {
        use AbilityType::*;
        use EquipmentSlot::*;

        let mut catalog = Self::empty();
        catalog.insert(piece("iron_sword", "Iron Sword", Weapon, (0, 0, 5, 0), Combat, 0));
        catalog.insert(piece("serrated_blade", "Serrated Blade", Weapon, (0, 0, 12, 0), Combat, 4));
        catalog.insert(piece("leather_vest", "Leather Vest", Armor, (10, 0, 0, 3), Toughness, 0));
        catalog.insert(piece("scale_mail", "Scale Mail", Armor, (30, 0, 0, 7), Toughness, 3));
        catalog.insert(piece("focus_charm", "Focus Charm", Accessory, (0, 20, 0, 0), Endurance, 1));
        catalog.insert(piece("eel_skin_band", "Eel-Skin Band", Accessory, (15, 0, 0, 1), Agility, 2));
        catalog
    }
}

/// `(max_hp, max_mp, attack, defense)`
fn piece(
    id: &str,
    name: &str,
    slot: EquipmentSlot,
    (max_hp, max_mp, attack, defense): (u32, u32, u32, u32),
    required_ability: AbilityType,
    required_level: u32,
) -> EquipmentDefinition {
    EquipmentDefinition {
        id: id.to_string(),
        name: name.to_string(),
        slot,
        bonuses: StatBonuses {
            max_hp,
            max_mp,
            attack,
            defense,
        },
        required_ability,
        required_level,
    }
}

/// What the player is wearing. Definitions are copied in at equip time so
/// stat recalculation never needs the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquippedGear {
    slots: BTreeMap<EquipmentSlot, EquipmentDefinition>,
}

impl EquippedGear {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> Option<&EquipmentDefinition> {
        self.slots.get(&slot)
    }

    /// Equips `id` after checking its level gate. Returns the piece it
    /// replaced, if any.
    pub fn equip(
        &mut self,
        id: &str,
        catalog: &EquipmentCatalog,
        ledger: &ProgressionLedger,
    ) -> Result<Option<EquipmentDefinition>, CatalogError> {
        let definition = catalog.get(id)?;
        if !ledger.meets(definition.required_ability, definition.required_level) {
            return Err(CatalogError::EquipmentLocked {
                id: id.to_string(),
                ability: definition.required_ability,
                required: definition.required_level,
            });
        }
        Ok(self.slots.insert(definition.slot, definition.clone()))
    }

    pub fn unequip(&mut self, slot: EquipmentSlot) -> Option<EquipmentDefinition> {
        self.slots.remove(&slot)
    }

    pub fn iter_equipped(&self) -> impl Iterator<Item = &EquipmentDefinition> {
        self.slots.values()
    }

    pub fn total_bonuses(&self) -> StatBonuses {
        let mut total = StatBonuses::default();
        for piece in self.iter_equipped() {
            total += piece.bonuses;
        }
        total
    }
}
