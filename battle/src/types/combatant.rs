//! Combatant state

use std::collections::HashSet;
use std::sync::Arc;

use duel_records::CardRecord;

use super::moves::Move;
use super::stats::Stats;
use super::status::{ActiveEffect, EffectKind};
use crate::error::BattleError;

/// One side's battling entity
///
/// Built once per battle and discarded when it ends. During the battle only
/// `stats.health`, `stats.energy` and the effect list change, and only through
/// the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Combatant {
    pub id: String,
    pub name: String,
    pub level: u32,
    pub stats: Stats,
    pub moves: Vec<Arc<Move>>,
    effects: Vec<ActiveEffect>,

    /// The current or most recent turn was lost to a stun
    stun_guard: bool,
}

impl Combatant {
    /// Create a combatant, validating its stats and move list
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        level: u32,
        stats: Stats,
        moves: Vec<Arc<Move>>,
    ) -> Result<Self, BattleError> {
        let combatant = Self {
            id: id.into(),
            name: name.into(),
            level,
            stats,
            moves,
            effects: Vec::new(),
            stun_guard: false,
        };
        combatant.validate()?;
        Ok(combatant)
    }

    /// Create from a card record whose move ids are already resolved
    pub fn from_record(card: &CardRecord, moves: Vec<Arc<Move>>) -> Result<Self, BattleError> {
        let mut stats = Stats::new(card.max_health(), card.max_energy(), card.attack, card.defense);
        stats.health = card.health;
        stats.energy = card.energy;
        stats.speed = card.speed;

        Self::new(&card.id, &card.name, card.level, stats, moves)
    }

    fn validate(&self) -> Result<(), BattleError> {
        if self.level == 0 {
            return Err(BattleError::invalid_combatant(&self.id, "level must be at least 1"));
        }
        if self.stats.max_health == 0 {
            return Err(BattleError::invalid_combatant(&self.id, "max health is 0"));
        }
        if self.stats.health > self.stats.max_health {
            return Err(BattleError::invalid_combatant(
                &self.id,
                format!("health {} exceeds max {}", self.stats.health, self.stats.max_health),
            ));
        }
        if self.stats.energy > self.stats.max_energy {
            return Err(BattleError::invalid_combatant(
                &self.id,
                format!("energy {} exceeds max {}", self.stats.energy, self.stats.max_energy),
            ));
        }
        if self.moves.is_empty() {
            return Err(BattleError::invalid_combatant(&self.id, "no moves"));
        }

        let mut seen = HashSet::new();
        for mv in &self.moves {
            if !seen.insert(mv.id.as_str()) {
                return Err(BattleError::DuplicateMove(mv.id.clone()));
            }
            mv.validate()?;
        }

        Ok(())
    }

    /// Find a move in this combatant's list by id
    pub fn find_move(&self, id: &str) -> Option<&Arc<Move>> {
        self.moves.iter().find(|m| m.id == id)
    }

    /// Moves the current energy pays for, in list order
    pub fn affordable_moves(&self) -> impl Iterator<Item = &Arc<Move>> {
        self.moves
            .iter()
            .filter(|m| m.affordable_with(self.stats.energy))
    }

    pub fn can_afford(&self, mv: &Move) -> bool {
        mv.affordable_with(self.stats.energy)
    }

    pub fn is_alive(&self) -> bool {
        !self.stats.is_depleted()
    }

    // === Status effects ===

    /// Active effects, in application order
    pub fn effects(&self) -> &[ActiveEffect] {
        &self.effects
    }

    pub fn effect(&self, kind: EffectKind) -> Option<&ActiveEffect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    pub fn has_effect(&self, kind: EffectKind) -> bool {
        self.effect(kind).is_some()
    }

    /// Whether a new stun may land. A combatant that lost its last turn to a
    /// stun cannot be stunned again until it has had a turn of its own.
    pub fn can_be_stunned(&self) -> bool {
        !self.stun_guard
    }

    pub(crate) fn set_stun_guard(&mut self, stunned: bool) {
        self.stun_guard = stunned;
    }

    /// Attach an effect; an effect of the same kind is replaced, never stacked
    pub fn add_effect(&mut self, effect: ActiveEffect) {
        match self.effects.iter_mut().find(|e| e.kind == effect.kind) {
            Some(existing) => *existing = effect,
            None => self.effects.push(effect),
        }
    }

    /// Activate effects applied since this combatant's last turn
    pub(crate) fn activate_effects(&mut self) {
        for effect in &mut self.effects {
            effect.pending = false;
        }
    }

    /// Count down active effects at the end of this combatant's turn.
    /// Returns the kinds that expired.
    pub(crate) fn decay_effects(&mut self) -> Vec<EffectKind> {
        for effect in self.effects.iter_mut().filter(|e| !e.pending) {
            effect.remaining = effect.remaining.saturating_sub(1);
        }

        let expired = self
            .effects
            .iter()
            .filter(|e| e.is_expired())
            .map(|e| e.kind)
            .collect();
        self.effects.retain(|e| !e.is_expired());
        expired
    }

    /// Attack including Buff and Debuff modifiers
    pub fn effective_attack(&self) -> u32 {
        let mut attack = self.stats.attack;
        for effect in self.effects.iter().filter(|e| e.is_modifier()) {
            attack = match effect.kind {
                EffectKind::Buff => attack.saturating_add(effect.magnitude),
                _ => attack.saturating_sub(effect.magnitude),
            };
        }
        attack
    }

    pub fn effective_defense(&self) -> u32 {
        self.stats.defense
    }
}
