//! Turn controller: battle state and the transitions between turns

use crate::error::Rejection;
use crate::types::{Combatant, Side};

use super::events::Resolution;

/// Where the battle is in its turn cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Waiting for the side in [`BattleState::turn`] to act
    AwaitingMove,
    /// A move is being applied
    Resolving,
    /// Terminal; no further moves are accepted
    GameOver,
}

/// Full state of one battle
///
/// Owned by [`Battle`](crate::Battle); callers only ever see it through a
/// shared reference or a cloned snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct BattleState {
    pub player: Combatant,
    pub opponent: Combatant,

    /// Side allowed to act
    pub turn: Side,

    /// Starts at 1, increments each time the turn passes back to the player
    pub round: u32,

    pub phase: Phase,

    pub winner: Option<Side>,

    pub last_resolution: Option<Resolution>,
}

impl BattleState {
    /// Initial state: the player moves first in round 1
    pub fn new(player: Combatant, opponent: Combatant) -> Self {
        Self {
            player,
            opponent,
            turn: Side::Player,
            round: 1,
            phase: Phase::AwaitingMove,
            winner: None,
            last_resolution: None,
        }
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    pub(crate) fn combatant_mut(&mut self, side: Side) -> &mut Combatant {
        match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        }
    }

    /// Actor and target for a move by `actor`
    pub(crate) fn pair(&self, actor: Side) -> (&Combatant, &Combatant) {
        match actor {
            Side::Player => (&self.player, &self.opponent),
            Side::Opponent => (&self.opponent, &self.player),
        }
    }

    pub(crate) fn pair_mut(&mut self, actor: Side) -> (&mut Combatant, &mut Combatant) {
        match actor {
            Side::Player => (&mut self.player, &mut self.opponent),
            Side::Opponent => (&mut self.opponent, &mut self.player),
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Whether `side` may act right now
    pub fn is_awaiting(&self, side: Side) -> bool {
        self.phase == Phase::AwaitingMove && self.turn == side
    }

    /// Turn ownership check shared by every action
    pub fn check_turn(&self, side: Side) -> Result<(), Rejection> {
        if self.is_over() {
            return Err(Rejection::BattleOver);
        }
        if !self.is_awaiting(side) {
            return Err(Rejection::NotYourTurn);
        }
        Ok(())
    }

    /// Side left standing if a combatant is at 0 health.
    /// The player loses if both are somehow down.
    pub fn knockout_winner(&self) -> Option<Side> {
        if !self.player.is_alive() {
            Some(Side::Opponent)
        } else if !self.opponent.is_alive() {
            Some(Side::Player)
        } else {
            None
        }
    }

    pub(crate) fn begin_resolution(&mut self) {
        self.phase = Phase::Resolving;
    }

    /// Hand the turn to the other side after a completed resolution or skip
    pub(crate) fn hand_over(&mut self) {
        self.phase = Phase::AwaitingMove;
        self.turn = self.turn.other();
        if self.turn == Side::Player {
            self.round += 1;
        }
    }

    /// Enter the terminal phase
    pub(crate) fn end(&mut self, winner: Side) {
        self.phase = Phase::GameOver;
        self.winner = Some(winner);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::types::{Move, MoveCategory, Stats};

    fn combatant(id: &str) -> Combatant {
        let tackle = Arc::new(Move::new("tackle", "Tackle", MoveCategory::Attack, 20, 15));
        Combatant::new(id, id, 1, Stats::new(100, 100, 10, 10), vec![tackle]).unwrap()
    }

    fn state() -> BattleState {
        BattleState::new(combatant("a"), combatant("b"))
    }

    #[test]
    fn test_initial_state() {
        let state = state();
        assert_eq!(state.turn, Side::Player);
        assert_eq!(state.round, 1);
        assert_eq!(state.phase, Phase::AwaitingMove);
        assert!(state.winner.is_none());
        assert!(state.is_awaiting(Side::Player));
    }

    #[test]
    fn test_check_turn() {
        let mut state = state();
        assert_eq!(state.check_turn(Side::Player), Ok(()));
        assert_eq!(state.check_turn(Side::Opponent), Err(Rejection::NotYourTurn));

        state.begin_resolution();
        assert_eq!(state.check_turn(Side::Player), Err(Rejection::NotYourTurn));

        state.end(Side::Player);
        assert_eq!(state.check_turn(Side::Player), Err(Rejection::BattleOver));
        assert_eq!(state.check_turn(Side::Opponent), Err(Rejection::BattleOver));
    }

    #[test]
    fn test_hand_over_counts_rounds() {
        let mut state = state();

        state.hand_over();
        assert_eq!((state.turn, state.round), (Side::Opponent, 1));

        state.hand_over();
        assert_eq!((state.turn, state.round), (Side::Player, 2));
        assert_eq!(state.phase, Phase::AwaitingMove);
    }

    #[test]
    fn test_knockout_winner() {
        let mut state = state();
        assert!(state.knockout_winner().is_none());

        state.opponent.stats.health = 0;
        assert_eq!(state.knockout_winner(), Some(Side::Player));

        state.player.stats.health = 0;
        assert_eq!(state.knockout_winner(), Some(Side::Opponent));
    }

    #[test]
    fn test_pair() {
        let state = state();
        let (actor, target) = state.pair(Side::Opponent);
        assert_eq!(actor.id, "b");
        assert_eq!(target.id, "a");
    }
}
