//! Resolution records and the event log handed back to callers

use std::sync::Arc;

use crate::types::{EffectKind, Move, Side};

use super::rewards::BattleReport;

/// An effect that landed during a resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedEffect {
    pub target: Side,
    pub kind: EffectKind,
    pub duration: u32,
    pub magnitude: u32,
}

/// Record of one executed move
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub actor: Side,
    pub move_used: Arc<Move>,
    pub damage: u32,
    pub critical: bool,
    pub effect: Option<AppliedEffect>,
    /// Defender's health after the hit
    pub target_health: u32,
}

/// Why a turn ended without a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoAffordableMove,
    Stunned,
    Passed,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::NoAffordableMove => "has no affordable move",
            SkipReason::Stunned => "is stunned",
            SkipReason::Passed => "passes",
        }
    }
}

/// Something that happened during a call into the engine, in order
#[derive(Debug, Clone, PartialEq)]
pub enum BattleEvent {
    TurnStarted { side: Side, round: u32 },
    MoveResolved(Resolution),
    EffectApplied(AppliedEffect),
    /// Start-of-turn burn damage or healing
    EffectTicked { side: Side, kind: EffectKind, amount: u32 },
    EffectExpired { side: Side, kind: EffectKind },
    TurnSkipped { side: Side, reason: SkipReason },
    BattleOver(BattleReport),
}

impl std::fmt::Display for BattleEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BattleEvent::TurnStarted { side, round } => {
                write!(f, "Round {}: {}'s turn", round, side)
            }
            BattleEvent::MoveResolved(resolution) => {
                write!(
                    f,
                    "{} used {} for {} damage",
                    resolution.actor, resolution.move_used.name, resolution.damage
                )?;
                if resolution.critical {
                    write!(f, " (critical hit)")?;
                }
                Ok(())
            }
            BattleEvent::EffectApplied(effect) => write!(
                f,
                "{} is affected by {} for {} turns",
                effect.target, effect.kind, effect.duration
            ),
            BattleEvent::EffectTicked { side, kind, amount } => match kind {
                EffectKind::Heal => write!(f, "{} recovers {} health", side, amount),
                _ => write!(f, "{} takes {} damage from {}", side, amount, kind),
            },
            BattleEvent::EffectExpired { side, kind } => {
                write!(f, "{} wore off for {}", kind, side)
            }
            BattleEvent::TurnSkipped { side, reason } => write!(f, "{} {}", side, reason.as_str()),
            BattleEvent::BattleOver(report) => write!(
                f,
                "{} wins after {} rounds (+{} money, +{} experience)",
                report.winner, report.rounds, report.rewards.money, report.rewards.experience
            ),
        }
    }
}

/// Events produced by one call into the engine
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TurnReport {
    pub events: Vec<BattleEvent>,
}

impl TurnReport {
    pub fn resolutions(&self) -> impl Iterator<Item = &Resolution> {
        self.events.iter().filter_map(|event| match event {
            BattleEvent::MoveResolved(resolution) => Some(resolution),
            _ => None,
        })
    }

    /// Final report, if the battle ended during this call
    pub fn outcome(&self) -> Option<&BattleReport> {
        self.events.iter().find_map(|event| match event {
            BattleEvent::BattleOver(report) => Some(report),
            _ => None,
        })
    }

    /// Number of completed turns (moves plus skips)
    pub fn turns_completed(&self) -> usize {
        self.events
            .iter()
            .filter(|event| {
                matches!(
                    event,
                    BattleEvent::MoveResolved(_) | BattleEvent::TurnSkipped { .. }
                )
            })
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
