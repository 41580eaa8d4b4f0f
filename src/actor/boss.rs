use super::combatant::CombatantState;
use super::stats::StatSource;
use crate::boss::{BossActionDef, BossDefinition};
use crate::core::CatalogError;
use crate::status::{Side, StatusEffectCatalog};
use std::sync::Arc;

/// A boss in battle. Defeated as soon as it is knocked out.
#[derive(Debug, Clone)]
pub struct BossActor {
    state: CombatantState,
    definition: Arc<BossDefinition>,
}

impl BossActor {
    pub fn new(definition: Arc<BossDefinition>, catalog: Arc<StatusEffectCatalog>) -> Self {
        let state = CombatantState::new(&definition.name, Side::Boss, definition.base_stats(), catalog);
        Self { state, definition }
    }

    pub fn state(&self) -> &CombatantState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut CombatantState {
        &mut self.state
    }

    pub fn definition(&self) -> &BossDefinition {
        &self.definition
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn is_defeated(&self) -> bool {
        self.state.is_knocked_out()
    }

    pub fn action(&self, id: &str) -> Result<&BossActionDef, CatalogError> {
        self.definition.action(id)
    }

    pub fn reset_battle_state(&mut self) {
        self.state.reset_battle_state(self.definition.as_ref());
    }
}
