//! Move records as served by the card catalog

use serde::{Deserialize, Serialize};

/// Broad move category (drives UI grouping; the engine only cares about power and cost)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveCategory {
    Attack,
    Defense,
    Special,
    Ultimate,
}

impl MoveCategory {
    /// Get display name
    pub fn as_str(&self) -> &'static str {
        match self {
            MoveCategory::Attack => "Attack",
            MoveCategory::Defense => "Defense",
            MoveCategory::Special => "Special",
            MoveCategory::Ultimate => "Ultimate",
        }
    }
}

impl std::fmt::Display for MoveCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status effect kinds a move can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectKind {
    #[serde(alias = "stunned")]
    Stun,
    #[serde(alias = "burning")]
    Burn,
    #[serde(alias = "regen")]
    Heal,
    Buff,
    Debuff,
}

impl EffectKind {
    /// Get display name
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectKind::Stun => "Stun",
            EffectKind::Burn => "Burn",
            EffectKind::Heal => "Heal",
            EffectKind::Buff => "Buff",
            EffectKind::Debuff => "Debuff",
        }
    }

    /// Whether the effect lands on the move's user instead of its target
    pub fn targets_self(&self) -> bool {
        matches!(self, EffectKind::Heal | EffectKind::Buff)
    }
}

impl std::fmt::Display for EffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status effect payload attached to a move
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectRecord {
    pub kind: EffectKind,

    /// Probability in [0, 1] that the effect lands
    pub chance: f64,

    /// Number of the affected combatant's turns the effect stays active
    #[serde(default = "default_duration")]
    pub duration: u32,

    #[serde(default)]
    pub magnitude: u32,
}

fn default_duration() -> u32 {
    1
}

/// A move definition from the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRecord {
    pub id: String,

    pub name: String,

    pub category: MoveCategory,

    #[serde(default)]
    pub power: u32,

    #[serde(default)]
    pub energy_cost: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_effect: Option<EffectRecord>,
}
