//! Domain types for battles

mod catalog;
mod combatant;
mod moves;
mod side;
mod stats;
mod status;

pub use catalog::MoveCatalog;
pub use combatant::Combatant;
pub use moves::{EffectKind, Move, MoveCategory, StatusEffect};
pub use side::Side;
pub use stats::Stats;
pub use status::ActiveEffect;
