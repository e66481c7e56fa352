use thiserror::Error;

mod card;
mod catalog;
mod moves;
mod rewards;


pub use card::CardRecord;
pub use catalog::{
    CatalogDocument, DEFAULT_CATALOG_JSON, default_catalog, parse_cards, parse_catalog,
    parse_moves,
};
pub use moves::{EffectKind, EffectRecord, MoveCategory, MoveRecord};
pub use rewards::Rewards;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Empty document")]
    EmptyDocument,
}
