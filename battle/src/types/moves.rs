//! Move definitions

use duel_records::{EffectRecord, MoveRecord};

pub use duel_records::{EffectKind, MoveCategory};

use crate::error::BattleError;

/// Status effect payload carried by a move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusEffect {
    pub kind: EffectKind,

    /// Probability in [0, 1] that the effect lands
    pub chance: f64,

    pub duration: u32,

    pub magnitude: u32,
}

impl StatusEffect {
    pub fn new(kind: EffectKind, chance: f64, duration: u32, magnitude: u32) -> Self {
        Self {
            kind,
            chance,
            duration,
            magnitude,
        }
    }

    /// Create from a catalog effect record
    pub fn from_record(record: &EffectRecord) -> Self {
        Self::new(record.kind, record.chance, record.duration, record.magnitude)
    }
}

/// A catalog move. Immutable; battles share moves through `Arc<Move>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Move {
    pub id: String,
    pub name: String,
    pub category: MoveCategory,
    pub power: u32,
    pub energy_cost: u32,
    pub status_effect: Option<StatusEffect>,
}

impl Move {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: MoveCategory,
        power: u32,
        energy_cost: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            power,
            energy_cost,
            status_effect: None,
        }
    }

    pub fn with_effect(mut self, effect: StatusEffect) -> Self {
        self.status_effect = Some(effect);
        self
    }

    /// Create from a catalog move record
    pub fn from_record(record: &MoveRecord) -> Result<Self, BattleError> {
        let mv = Self {
            id: record.id.clone(),
            name: record.name.clone(),
            category: record.category,
            power: record.power,
            energy_cost: record.energy_cost,
            status_effect: record.status_effect.as_ref().map(StatusEffect::from_record),
        };
        mv.validate()?;
        Ok(mv)
    }

    /// Reject effect chances outside [0, 1]
    pub fn validate(&self) -> Result<(), BattleError> {
        if let Some(effect) = &self.status_effect
            && !(0.0..=1.0).contains(&effect.chance)
        {
            return Err(BattleError::InvalidEffectChance {
                move_id: self.id.clone(),
                chance: effect.chance,
            });
        }
        Ok(())
    }

    /// Zero-power moves never deal damage
    pub fn is_damaging(&self) -> bool {
        self.power > 0
    }

    pub fn affordable_with(&self, energy: u32) -> bool {
        self.energy_cost <= energy
    }
}
