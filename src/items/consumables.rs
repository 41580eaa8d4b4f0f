use crate::progression::AbilityType;
use crate::status::StatusEffectType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Battle consumables. Parsed from their snake_case id.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ItemId {
    HealingDraught,
    EtherVial,
    PurifyingSalts,
    BerserkerTonic,
    TrollSalve,
}

impl ItemId {
    pub fn all() -> Vec<ItemId> {
        ItemId::iter().collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ItemEffect {
    Heal(u32),
    RestoreMp(u32),
    /// Removes every debuff, then heals.
    Cleanse { heal: u32 },
    Buff {
        effect: StatusEffectType,
        duration: Option<u32>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    pub id: ItemId,
    pub name: String,
    pub required_ability: AbilityType,
    pub required_level: u32,
    pub uses_per_battle: u32,
    pub effect: ItemEffect,
}

#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: HashMap<ItemId, ItemDefinition>,
}

impl ItemCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, definition: ItemDefinition) {
        self.items.insert(definition.id, definition);
    }

    pub fn get(&self, id: ItemId) -> Option<&ItemDefinition> {
        self.items.get(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn standard() -> Self {
        let mut catalog = Self::empty();
        catalog.insert(item(ItemId::HealingDraught, "Healing Draught", 0, 3, ItemEffect::Heal(40)));
        catalog.insert(item(ItemId::EtherVial, "Ether Vial", 1, 2, ItemEffect::RestoreMp(30)));
        catalog.insert(item(
            ItemId::PurifyingSalts,
            "Purifying Salts",
            2,
            1,
            ItemEffect::Cleanse { heal: 10 },
        ));
        catalog.insert(item(
            ItemId::BerserkerTonic,
            "Berserker Tonic",
            3,
            1,
            ItemEffect::Buff {
                effect: StatusEffectType::Empowered,
                duration: None,
            },
        ));
        catalog.insert(item(
            ItemId::TrollSalve,
            "Troll Salve",
            5,
            1,
            ItemEffect::Buff {
                effect: StatusEffectType::Regenerating,
                duration: Some(5),
            },
        ));
        catalog
    }
}

/// Consumables are all gated on CraftWork.
fn item(
    id: ItemId,
    name: &str,
    required_level: u32,
    uses_per_battle: u32,
    effect: ItemEffect,
) -> ItemDefinition {
    ItemDefinition {
        id,
        name: name.to_string(),
        required_ability: AbilityType::CraftWork,
        required_level,
        uses_per_battle,
        effect,
    }
}
