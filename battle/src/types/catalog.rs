//! Move catalog: the shared move definitions cards are built from

use std::collections::HashMap;
use std::sync::Arc;

use duel_records::{CardRecord, CatalogDocument, MoveRecord};

use super::combatant::Combatant;
use super::moves::Move;
use crate::error::BattleError;

/// Moves indexed by id, shared by reference across battles
#[derive(Debug, Clone, Default)]
pub struct MoveCatalog {
    moves: HashMap<String, Arc<Move>>,
}

impl MoveCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from catalog move records
    pub fn from_records(records: &[MoveRecord]) -> Result<Self, BattleError> {
        let mut catalog = Self::new();
        for record in records {
            catalog.insert(Move::from_record(record)?)?;
        }
        Ok(catalog)
    }

    pub fn from_document(document: &CatalogDocument) -> Result<Self, BattleError> {
        Self::from_records(&document.moves)
    }

    /// Add a move, refusing to shadow an existing id
    pub fn insert(&mut self, mv: Move) -> Result<Arc<Move>, BattleError> {
        mv.validate()?;
        if self.moves.contains_key(&mv.id) {
            return Err(BattleError::DuplicateMove(mv.id));
        }
        let mv = Arc::new(mv);
        self.moves.insert(mv.id.clone(), Arc::clone(&mv));
        Ok(mv)
    }

    pub fn get(&self, id: &str) -> Option<Arc<Move>> {
        self.moves.get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.moves.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Resolve a card's move ids and build its combatant
    pub fn build_combatant(&self, card: &CardRecord) -> Result<Combatant, BattleError> {
        let moves = card
            .moves
            .iter()
            .map(|id| {
                self.get(id).ok_or_else(|| BattleError::UnknownMove {
                    card: card.id.clone(),
                    move_id: id.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Combatant::from_record(card, moves)
    }
}
