// Ability progression
pub const MAX_ABILITY_LEVEL: u32 = 10;
/// Experience for level L = L^3 * EXP_CURVE_FACTOR
pub const EXP_CURVE_FACTOR: u64 = 50;

// Player stat derivation
pub const PLAYER_BASE_HP: u32 = 100;
pub const HP_PER_TOUGHNESS_LEVEL: u32 = 20;
pub const PLAYER_BASE_MP: u32 = 50;
pub const MP_PER_ENDURANCE_LEVEL: u32 = 10;
pub const PLAYER_BASE_ATTACK: u32 = 10;
pub const ATTACK_PER_COMBAT_LEVEL: u32 = 3;
pub const PLAYER_BASE_DEFENSE: u32 = 2;
pub const DEFENSE_PER_TOUGHNESS_LEVEL: u32 = 1;

// Turn economy
pub const MP_REGEN_DIVISOR: u32 = 10;

// Hit resolution
pub const DEFAULT_HIT_RATE: f64 = 0.95;
pub const DEFAULT_CRIT_RATE: f64 = 0.05;
pub const DEFAULT_CRIT_MULTIPLIER: f64 = 2.0;
pub const DEFAULT_DAMAGE_VARIANCE: f64 = 0.2;

// Struggle
pub const STRUGGLE_BASE_RATE: f64 = 0.3;
pub const STRUGGLE_RATE_PER_FAILURE: f64 = 0.1;
pub const STRUGGLE_RATE_CAP: f64 = 0.9;
pub const STRUGGLE_AGILITY_BONUS_PER_LEVEL: f64 = 0.05;
pub const STRUGGLE_EXHAUSTED_FAILURE_WEIGHT: u32 = 2;
pub const ESCAPE_RECOVERY_MIN_AGILITY: u32 = 5;
pub const ESCAPE_RECOVERY_RATIO: f64 = 0.5;

// Desperation: skills paid without enough MP double their multiplier
pub const DESPERATION_MULTIPLIER: f64 = 2.0;

// KnockedOut expiry revives with this fraction of max HP
pub const KNOCKOUT_REVIVE_FRACTION: f64 = 0.25;

// Experience awarded at battle end
pub const EXP_PER_DAMAGE_DEALT: f64 = 1.0;
pub const EXP_PER_DAMAGE_TAKEN: f64 = 1.5;
pub const EXP_PER_MP_SPENT: f64 = 2.0;
pub const EXP_PER_STRUGGLE: u64 = 15;
pub const EXP_PER_ITEM_USE: u64 = 20;
pub const VICTORY_BONUS_EXP: u64 = 100;
