use crate::actor::CombatantState;

/// End-of-round processing. Each actor ticks and then decays, player first,
/// so an effect with duration 1 ticks exactly once.
pub fn resolve_round_end(player: &mut CombatantState, boss: &mut CombatantState) -> Vec<String> {
    let mut messages = player.apply_effects();
    messages.extend(player.decrease_durations());
    messages.extend(boss.apply_effects());
    messages.extend(boss.decrease_durations());
    messages
}
