//! Status effect application and start-of-turn ticks

use rand::Rng;

use crate::types::{ActiveEffect, EffectKind, Move, Side};

use super::events::{AppliedEffect, BattleEvent};
use super::turn::BattleState;

/// Roll `mv`'s status effect and attach it on success.
///
/// Heal and Buff land on the actor; every other kind lands on the other side.
/// Nothing attaches to a combatant that is already down, and a stun does not
/// land on a combatant that just lost a turn to one.
pub(crate) fn apply_move_effect<R: Rng + ?Sized>(
    state: &mut BattleState,
    actor: Side,
    mv: &Move,
    rng: &mut R,
) -> Option<AppliedEffect> {
    let effect = mv.status_effect?;
    if !rng.gen_bool(effect.chance.clamp(0.0, 1.0)) {
        return None;
    }

    let target = if effect.kind.targets_self() {
        actor
    } else {
        actor.other()
    };

    let combatant = state.combatant_mut(target);
    if !combatant.is_alive() {
        return None;
    }
    if effect.kind == EffectKind::Stun && !combatant.can_be_stunned() {
        tracing::debug!(side = ?target, "Stun resisted");
        return None;
    }

    let active = ActiveEffect::new(effect.kind, effect.duration, effect.magnitude);
    combatant.add_effect(active);

    tracing::debug!(
        side = ?target,
        kind = %effect.kind,
        duration = active.remaining,
        "Effect applied"
    );

    Some(AppliedEffect {
        target,
        kind: effect.kind,
        duration: active.remaining,
        magnitude: effect.magnitude,
    })
}

/// Activate `side`'s pending effects and apply burn and heal ticks.
///
/// Returns whether `side` is stunned for this turn. Stops ticking as soon as
/// the combatant is knocked out.
pub(crate) fn start_of_turn(
    state: &mut BattleState,
    side: Side,
    events: &mut Vec<BattleEvent>,
) -> bool {
    let combatant = state.combatant_mut(side);
    combatant.activate_effects();

    let ticks: Vec<(EffectKind, u32)> = combatant
        .effects()
        .iter()
        .filter(|e| matches!(e.kind, EffectKind::Burn | EffectKind::Heal))
        .map(|e| (e.kind, e.magnitude))
        .collect();

    for (kind, magnitude) in ticks {
        let amount = match kind {
            EffectKind::Burn => combatant.stats.take_damage(magnitude),
            _ => combatant.stats.restore_health(magnitude),
        };
        tracing::debug!(side = ?side, kind = %kind, amount, "Effect ticked");
        events.push(BattleEvent::EffectTicked { side, kind, amount });

        if !combatant.is_alive() {
            return false;
        }
    }

    let stunned = combatant.has_effect(EffectKind::Stun);
    combatant.set_stun_guard(stunned);
    stunned
}
