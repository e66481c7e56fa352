//! Status effects active on a combatant

pub use duel_records::EffectKind;

/// A status effect attached to a combatant
///
/// `remaining` counts the owner's turns the effect is still active for. An
/// effect attached during a turn is `pending` until its owner's next turn
/// starts, so it never decays in the turn it was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveEffect {
    pub kind: EffectKind,
    pub remaining: u32,
    pub magnitude: u32,
    pub pending: bool,
}

impl ActiveEffect {
    /// Create a freshly applied effect (at least one turn long)
    pub fn new(kind: EffectKind, duration: u32, magnitude: u32) -> Self {
        Self {
            kind,
            remaining: duration.max(1),
            magnitude,
            pending: true,
        }
    }

    /// Whether the effect modifies outgoing damage rather than ticking
    pub fn is_modifier(&self) -> bool {
        matches!(self.kind, EffectKind::Buff | EffectKind::Debuff)
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }
}
