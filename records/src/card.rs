//! Card records (one per battling card, starter or scripted opponent)

use serde::{Deserialize, Serialize};

/// A card as returned by the card listing / profile service
///
/// `health` and `energy` are the values the card enters battle with. The
/// maxima default to those values when the service omits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    pub id: String,

    pub name: String,

    #[serde(default = "default_level")]
    pub level: u32,

    pub health: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_health: Option<u32>,

    pub energy: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_energy: Option<u32>,

    pub attack: u32,

    pub defense: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<u32>,

    /// Move ids, resolved against the move catalog
    #[serde(default)]
    pub moves: Vec<String>,
}

impl CardRecord {
    /// Maximum health (falls back to the starting health)
    pub fn max_health(&self) -> u32 {
        self.max_health.unwrap_or(self.health)
    }

    /// Maximum energy (falls back to the starting energy)
    pub fn max_energy(&self) -> u32 {
        self.max_energy.unwrap_or(self.energy)
    }
}

fn default_level() -> u32 {
    1
}
