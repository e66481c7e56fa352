//! Catalog documents: the move list, the starter cards and the scripted opponent roster

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::ParseError;
use crate::card::CardRecord;
use crate::moves::MoveRecord;

/// Catalog shipped with the crate, used when no service catalog is available
pub const DEFAULT_CATALOG_JSON: &str = include_str!("../data/catalog.json");

/// Everything needed to set up battles: moves plus the cards that reference them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDocument {
    #[serde(default)]
    pub moves: Vec<MoveRecord>,

    /// Cards a new player can pick from
    #[serde(default)]
    pub starters: Vec<CardRecord>,

    /// Scripted opponents
    #[serde(default)]
    pub opponents: Vec<CardRecord>,
}

impl CatalogDocument {
    pub fn find_move(&self, id: &str) -> Option<&MoveRecord> {
        self.moves.iter().find(|m| m.id == id)
    }

    pub fn find_starter(&self, id: &str) -> Option<&CardRecord> {
        self.starters.iter().find(|c| c.id == id)
    }

    pub fn find_opponent(&self, id: &str) -> Option<&CardRecord> {
        self.opponents.iter().find(|c| c.id == id)
    }

    /// Opponent whose level is closest to `level` (first listed wins ties)
    pub fn opponent_for_level(&self, level: u32) -> Option<&CardRecord> {
        self.opponents
            .iter()
            .min_by_key(|c| c.level.abs_diff(level))
    }
}

/// Parse a full catalog document
pub fn parse_catalog(json: &str) -> Result<CatalogDocument> {
    if json.trim().is_empty() {
        return Err(ParseError::EmptyDocument.into());
    }

    let document: CatalogDocument =
        serde_json::from_str(json).context("Failed to parse catalog document")?;

    if document.moves.is_empty() {
        return Err(ParseError::MissingField("moves".to_string()).into());
    }

    check_moves(&document.moves)?;
    check_cards(&document.starters)?;
    check_cards(&document.opponents)?;

    Ok(document)
}

/// Parse a bare JSON array of moves
pub fn parse_moves(json: &str) -> Result<Vec<MoveRecord>> {
    if json.trim().is_empty() {
        return Err(ParseError::EmptyDocument.into());
    }

    let moves: Vec<MoveRecord> = serde_json::from_str(json).context("Failed to parse moves")?;
    check_moves(&moves)?;
    Ok(moves)
}

/// Parse a bare JSON array of cards (the card listing endpoint's shape)
pub fn parse_cards(json: &str) -> Result<Vec<CardRecord>> {
    if json.trim().is_empty() {
        return Err(ParseError::EmptyDocument.into());
    }

    let cards: Vec<CardRecord> = serde_json::from_str(json).context("Failed to parse cards")?;
    check_cards(&cards)?;
    Ok(cards)
}

/// Parse the catalog bundled with the crate
pub fn default_catalog() -> Result<CatalogDocument> {
    parse_catalog(DEFAULT_CATALOG_JSON).context("Bundled catalog is invalid")
}

fn check_moves(moves: &[MoveRecord]) -> Result<()> {
    for record in moves {
        if record.id.trim().is_empty() {
            return Err(ParseError::MissingField(format!("id of move '{}'", record.name)).into());
        }
        if let Some(effect) = &record.status_effect
            && !(0.0..=1.0).contains(&effect.chance)
        {
            return Err(ParseError::InvalidRecord(format!(
                "move {} has effect chance {} outside [0, 1]",
                record.id, effect.chance
            ))
            .into());
        }
    }
    Ok(())
}

fn check_cards(cards: &[CardRecord]) -> Result<()> {
    for card in cards {
        if card.id.trim().is_empty() {
            return Err(ParseError::MissingField(format!("id of card '{}'", card.name)).into());
        }
        if card.moves.is_empty() {
            return Err(ParseError::MissingField(format!("moves of card {}", card.id)).into());
        }
    }
    Ok(())
}
