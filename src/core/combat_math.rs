//! Shared hit-resolution law.
//!
//! Every damaging path (player attacks, player skills, boss actions) goes
//! through [`resolve_hit`] so miss, crit and variance rolls stay statistically
//! consistent. All functions take the RNG explicitly.

use rand::Rng;

/// Inputs to a single hit roll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitParams {
    /// Damage before variance and crit.
    pub base_damage: f64,
    /// Skips the miss roll entirely.
    pub guaranteed: bool,
    /// Chance to hit in [0, 1] before the accuracy modifier.
    pub hit_rate: f64,
    /// Chance to crit in [0, 1], rolled only on a hit.
    pub crit_rate: f64,
    /// Damage spread as a fraction, e.g. 0.2 = ±20%.
    pub variance: f64,
    pub crit_multiplier: f64,
}

/// Result of a hit roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackResult {
    /// Damage to hand to `take_damage` (0 on a miss).
    pub damage: u32,
    pub is_crit: bool,
    pub missed: bool,
}

impl AttackResult {
    pub fn miss() -> Self {
        Self {
            damage: 0,
            is_crit: false,
            missed: true,
        }
    }
}

/// Rolls a probability. Values outside [0, 1] saturate.
///
/// # Arguments
/// * `chance` - Success probability
/// * `rng` - Random number generator
///
/// # Returns
/// true on success, false otherwise
pub fn roll_chance<R: Rng + ?Sized>(chance: f64, rng: &mut R) -> bool {
    if chance <= 0.0 {
        return false;
    }
    if chance >= 1.0 {
        return true;
    }
    rng.gen::<f64>() < chance
}

/// Roll for critical hit.
pub fn roll_crit<R: Rng + ?Sized>(crit_rate: f64, rng: &mut R) -> bool {
    roll_chance(crit_rate, rng)
}

/// Scales `base` by a uniform factor in `[1 - variance, 1 + variance]`.
///
/// # Arguments
/// * `base` - Damage before variance
/// * `variance` - Spread as a fraction (negative is treated as 0)
/// * `rng` - Random number generator
///
/// # Returns
/// The scaled damage, unrounded
pub fn apply_variance<R: Rng + ?Sized>(base: f64, variance: f64, rng: &mut R) -> f64 {
    let variance = variance.max(0.0);
    if variance == 0.0 {
        return base;
    }
    base * (1.0 + rng.gen_range(-variance..=variance))
}

/// Raw damage of an attack before variance.
///
/// # Arguments
/// * `attack_power` - Attacker's attack stat
/// * `attack_modifier` - Product of the attacker's status modifiers
/// * `power` - Skill power multiplier
/// * `defense` - Target's defense stat
///
/// # Returns
/// `attack × modifier × power − defense`, never below 1
pub fn calculate_base_damage(attack_power: u32, attack_modifier: f64, power: f64, defense: u32) -> f64 {
    (attack_power as f64 * attack_modifier * power - defense as f64).max(1.0)
}

/// Resolves one hit: miss roll (unless guaranteed) using
/// `hit_rate × accuracy_modifier`, then crit roll, then variance.
///
/// # Arguments
/// * `params` - Base damage and roll rates
/// * `accuracy_modifier` - Product of the attacker's accuracy modifiers
/// * `rng` - Random number generator
///
/// # Returns
/// AttackResult with rounded damage (0 on a miss) and crit/miss flags
pub fn resolve_hit<R: Rng + ?Sized>(
    params: &HitParams,
    accuracy_modifier: f64,
    rng: &mut R,
) -> AttackResult {
    if !params.guaranteed && !roll_chance(params.hit_rate * accuracy_modifier, rng) {
        return AttackResult::miss();
    }

    let is_crit = roll_crit(params.crit_rate, rng);
    let mut damage = apply_variance(params.base_damage, params.variance, rng);
    if is_crit {
        damage *= params.crit_multiplier;
    }

    AttackResult {
        damage: damage.round().max(0.0) as u32,
        is_crit,
        missed: false,
    }
}
