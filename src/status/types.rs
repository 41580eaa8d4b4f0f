use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

/// Every status effect the engine knows about.
///
/// Definitions live in a [`super::StatusEffectCatalog`]; a type without a
/// catalog entry cannot be applied.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumIter,
)]
pub enum StatusEffectType {
    Defending,
    Stunned,
    Sleeping,
    Restrained,
    Eaten,
    Cocoon,
    Charmed,
    Poisoned,
    Burning,
    Weakened,
    Vulnerable,
    Dizzy,
    Exhausted,
    Empowered,
    Regenerating,
    KnockedOut,
    Doomed,
    Dead,
}

impl StatusEffectType {
    pub fn all() -> Vec<StatusEffectType> {
        StatusEffectType::iter().collect()
    }

    /// Restraint family: removed together by a successful struggle.
    pub fn is_restraint(&self) -> bool {
        matches!(
            self,
            StatusEffectType::Restrained | StatusEffectType::Eaten | StatusEffectType::Cocoon
        )
    }

    pub fn restraints() -> [StatusEffectType; 3] {
        [
            StatusEffectType::Restrained,
            StatusEffectType::Eaten,
            StatusEffectType::Cocoon,
        ]
    }
}

/// What an actor is allowed to do this turn. Ordered from least to most
/// restrictive so the most restrictive of several effects is the `max`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ActionPriority {
    #[default]
    Normal,
    StruggleOnly,
    CannotAct,
}

/// Which message variant to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Boss,
}

/// Numeric and gating modifiers of an effect. `None` means "no opinion" and
/// does not participate in composition.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EffectModifiers {
    pub attack: Option<f64>,
    /// Applied to incoming damage.
    pub damage_received: Option<f64>,
    pub struggle: Option<f64>,
    pub accuracy: Option<f64>,
    pub hp_regen: Option<f64>,
    pub mp_regen: Option<f64>,
    pub can_act: Option<bool>,
    pub can_use_skills: Option<bool>,
    pub action_priority: Option<ActionPriority>,
}

impl EffectModifiers {
    pub fn none() -> Self {
        Self::default()
    }

    /// Prevents acting entirely.
    pub fn incapacitating() -> Self {
        Self {
            can_act: Some(false),
            can_use_skills: Some(false),
            action_priority: Some(ActionPriority::CannotAct),
            ..Self::default()
        }
    }

    /// Allows only struggling (or staying still).
    pub fn binding() -> Self {
        Self {
            can_use_skills: Some(false),
            action_priority: Some(ActionPriority::StruggleOnly),
            ..Self::default()
        }
    }
}

/// Start-of-round behavior of an effect, run against the owner's vitals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickHook {
    /// Fixed HP loss.
    Damage(u32),
    /// HP loss equal to the instance's potency.
    PotencyDamage,
    /// HP gain, scaled by the owner's HP-regen modifier.
    Regenerate(u32),
}

/// Side effect run when an effect expires naturally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RemoveHook {
    /// If the owner is at 0 HP, bring it back to this fraction of max HP.
    ReviveFraction(f64),
}

/// Player and non-player variants of one message.
///
/// `None` falls back to a generic message; `Some("")` suppresses the message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageTemplate {
    pub player: Option<String>,
    pub other: Option<String>,
}

impl MessageTemplate {
    pub fn new(player: &str, other: &str) -> Self {
        Self {
            player: Some(player.to_string()),
            other: Some(other.to_string()),
        }
    }

    pub fn silent() -> Self {
        Self::new("", "")
    }

    pub fn for_side(&self, side: Side) -> Option<&str> {
        match side {
            Side::Player => self.player.as_deref(),
            Side::Boss => self.other.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectMessages {
    pub apply: MessageTemplate,
    pub tick: MessageTemplate,
    pub remove: MessageTemplate,
}

/// Fills `{name}`, `{amount}` and `{effect}` placeholders.
pub fn render_template(template: &str, owner_name: &str, effect_name: &str, amount: u32) -> String {
    template
        .replace("{name}", owner_name)
        .replace("{effect}", effect_name)
        .replace("{amount}", &amount.to_string())
}

/// Immutable catalog entry for one effect type.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusEffectDefinition {
    pub effect_type: StatusEffectType,
    pub name: String,
    pub description: String,
    /// 0 = until removed, >0 = turns remaining.
    pub duration: u32,
    pub stackable: bool,
    pub potency: u32,
    pub modifiers: EffectModifiers,
    pub on_tick: Option<TickHook>,
    pub on_remove: Option<RemoveHook>,
    pub is_debuff: bool,
    pub messages: EffectMessages,
}

impl StatusEffectDefinition {
    pub fn new(effect_type: StatusEffectType, name: &str, duration: u32) -> Self {
        Self {
            effect_type,
            name: name.to_string(),
            description: String::new(),
            duration,
            stackable: false,
            potency: 0,
            modifiers: EffectModifiers::none(),
            on_tick: None,
            on_remove: None,
            is_debuff: false,
            messages: EffectMessages::default(),
        }
    }

    pub fn describe(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn debuff(mut self) -> Self {
        self.is_debuff = true;
        self
    }

    pub fn stackable(mut self) -> Self {
        self.stackable = true;
        self
    }

    pub fn potency(mut self, potency: u32) -> Self {
        self.potency = potency;
        self
    }

    pub fn modifiers(mut self, modifiers: EffectModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn on_tick(mut self, hook: TickHook) -> Self {
        self.on_tick = Some(hook);
        self
    }

    pub fn on_remove(mut self, hook: RemoveHook) -> Self {
        self.on_remove = Some(hook);
        self
    }

    pub fn apply_message(mut self, player: &str, other: &str) -> Self {
        self.messages.apply = MessageTemplate::new(player, other);
        self
    }

    pub fn tick_message(mut self, player: &str, other: &str) -> Self {
        self.messages.tick = MessageTemplate::new(player, other);
        self
    }

    pub fn remove_message(mut self, player: &str, other: &str) -> Self {
        self.messages.remove = MessageTemplate::new(player, other);
        self
    }
}

/// A live effect on an actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveStatusEffect {
    pub effect_type: StatusEffectType,
    /// Turns remaining; 0 means it persists until removed.
    pub duration: u32,
    pub potency: u32,
    /// Cached from the definition for display.
    pub name: String,
}
