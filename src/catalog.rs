use crate::items::{EquipmentCatalog, ItemCatalog};
use crate::skills::SkillCatalog;
use crate::status::StatusEffectCatalog;
use std::sync::Arc;

/// Every read-only content table a battle consults.
#[derive(Debug, Clone)]
pub struct Catalogs {
    pub status: Arc<StatusEffectCatalog>,
    pub skills: SkillCatalog,
    pub items: ItemCatalog,
    pub equipment: EquipmentCatalog,
}

impl Catalogs {
    pub fn new(
        status: StatusEffectCatalog,
        skills: SkillCatalog,
        items: ItemCatalog,
        equipment: EquipmentCatalog,
    ) -> Self {
        Self {
            status: Arc::new(status),
            skills,
            items,
            equipment,
        }
    }

    pub fn standard() -> Self {
        Self::new(
            StatusEffectCatalog::standard(),
            SkillCatalog::standard(),
            ItemCatalog::standard(),
            EquipmentCatalog::standard(),
        )
    }
}
