//! Move availability and damage previews

use std::sync::Arc;

use crate::types::{Combatant, Move};

/// Whether the combatant can afford at least one of its moves
pub fn can_act(combatant: &Combatant) -> bool {
    combatant.affordable_moves().next().is_some()
}

/// The implicit choice when a decision is needed without input: the first
/// affordable move in list order
pub fn default_choice(combatant: &Combatant) -> Option<Arc<Move>> {
    combatant.affordable_moves().next().cloned()
}

/// Damage `mv` would deal with no critical hit and a 1.0 multiplier
pub fn estimated_damage(mv: &Move, attacker: &Combatant, defender: &Combatant) -> u32 {
    if !mv.is_damaging() {
        return 0;
    }
    let attack = u64::from(attacker.effective_attack());
    let defense = u64::from(defender.effective_defense().max(1));
    let damage = u64::from(mv.power) * attack / defense;
    u32::try_from(damage).unwrap_or(u32::MAX)
}

/// Affordable move with the highest estimated damage; earlier moves win ties
pub fn strongest_affordable(attacker: &Combatant, defender: &Combatant) -> Option<Arc<Move>> {
    let mut best: Option<(&Arc<Move>, u32)> = None;
    for mv in attacker.affordable_moves() {
        let damage = estimated_damage(mv, attacker, defender);
        if best.is_none_or(|(_, top)| damage > top) {
            best = Some((mv, damage));
        }
    }
    best.map(|(mv, _)| Arc::clone(mv))
}
