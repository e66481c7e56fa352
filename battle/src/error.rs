//! Error types for the battle engine
//!
//! Two families: [`Rejection`] is an expected, user-facing refusal returned
//! as a value and never mutates state. [`BattleError`] is a fatal problem
//! with the data a battle was built from.

use thiserror::Error;

/// Why a move request was refused
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("It is not your turn")]
    NotYourTurn,

    #[error("Not enough energy: have {have}, need {need}")]
    InsufficientEnergy { have: u32, need: u32 },

    #[error("The battle is already over")]
    BattleOver,

    #[error("Unknown move: {0}")]
    UnknownMove(String),
}

/// Malformed battle data
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BattleError {
    #[error("Invalid combatant {id}: {reason}")]
    InvalidCombatant { id: String, reason: String },

    #[error("Card {card} references unknown move {move_id}")]
    UnknownMove { card: String, move_id: String },

    #[error("Duplicate move id: {0}")]
    DuplicateMove(String),

    #[error("Move {move_id} has effect chance {chance} outside [0, 1]")]
    InvalidEffectChance { move_id: String, chance: f64 },
}

impl BattleError {
    pub(crate) fn invalid_combatant(id: &str, reason: impl Into<String>) -> Self {
        BattleError::InvalidCombatant {
            id: id.to_string(),
            reason: reason.into(),
        }
    }
}
