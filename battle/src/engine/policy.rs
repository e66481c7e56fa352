//! Opponent move selection

use std::sync::Arc;

use rand::RngCore;
use rand::seq::SliceRandom;

use crate::types::{Combatant, Move};

/// Chooses the scripted side's move
///
/// Returning `None` makes the engine skip the turn. Implementations must only
/// return moves from the combatant's own list that it can afford.
pub trait OpponentPolicy: Send {
    fn select_move(&self, combatant: &Combatant, rng: &mut dyn RngCore) -> Option<Arc<Move>>;
}

/// Uniformly random choice among the affordable moves
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomAffordable;

impl OpponentPolicy for RandomAffordable {
    fn select_move(&self, combatant: &Combatant, rng: &mut dyn RngCore) -> Option<Arc<Move>> {
        let affordable: Vec<&Arc<Move>> = combatant.affordable_moves().collect();
        affordable.choose(rng).map(|mv| Arc::clone(mv))
    }
}

/// Select a move with the default policy
pub fn select_move(combatant: &Combatant, rng: &mut dyn RngCore) -> Option<Arc<Move>> {
    RandomAffordable.select_move(combatant, rng)
}
