//! End-of-battle rewards and their delivery to the economy collaborator

pub use duel_records::Rewards;

use crate::types::{Combatant, Side};

/// How the battle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    Knockout,
    Surrender,
}

/// Terminal outcome of a battle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleReport {
    pub winner: Side,
    pub reason: EndReason,
    pub rounds: u32,
    pub rewards: Rewards,
}

impl BattleReport {
    pub fn loser(&self) -> Side {
        self.winner.other()
    }

    pub fn player_won(&self) -> bool {
        self.winner == Side::Player
    }
}

/// Computes the player's rewards when a battle ends
///
/// Any `Fn(Side, EndReason, &Combatant, &Combatant) -> Rewards` closure works
/// as a policy; the combatants are passed as (player, opponent).
pub trait RewardPolicy: Send {
    fn rewards(
        &self,
        winner: Side,
        reason: EndReason,
        player: &Combatant,
        opponent: &Combatant,
    ) -> Rewards;
}

impl<F> RewardPolicy for F
where
    F: Fn(Side, EndReason, &Combatant, &Combatant) -> Rewards + Send,
{
    fn rewards(
        &self,
        winner: Side,
        reason: EndReason,
        player: &Combatant,
        opponent: &Combatant,
    ) -> Rewards {
        self(winner, reason, player, opponent)
    }
}

/// Base amounts scaled by the loser's level
///
/// A win pays `base_money` and `base_experience` per opponent level. A
/// knockout loss pays no money and `base_experience * player level /
/// loss_experience_divisor` experience. Surrendering pays nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct LevelScaledRewards {
    pub base_money: u64,
    pub base_experience: u64,
    pub loss_experience_divisor: u64,
}

impl Default for LevelScaledRewards {
    fn default() -> Self {
        Self {
            base_money: 50,
            base_experience: 20,
            loss_experience_divisor: 4,
        }
    }
}

impl RewardPolicy for LevelScaledRewards {
    fn rewards(
        &self,
        winner: Side,
        reason: EndReason,
        player: &Combatant,
        opponent: &Combatant,
    ) -> Rewards {
        match (winner, reason) {
            (_, EndReason::Surrender) => Rewards::none(),
            (Side::Player, EndReason::Knockout) => {
                let level = u64::from(opponent.level);
                Rewards::new(
                    self.base_money.saturating_mul(level),
                    self.base_experience.saturating_mul(level),
                )
            }
            (Side::Opponent, EndReason::Knockout) => {
                let experience = self
                    .base_experience
                    .saturating_mul(u64::from(player.level))
                    .checked_div(self.loss_experience_divisor)
                    .unwrap_or(0);
                Rewards::new(0, experience)
            }
        }
    }
}

/// The external economy/profile collaborator that persists rewards
///
/// Called exactly once per battle, when it ends.
pub trait RewardSink: Send {
    fn deliver(&mut self, report: &BattleReport);
}

impl<F> RewardSink for F
where
    F: FnMut(&BattleReport) + Send,
{
    fn deliver(&mut self, report: &BattleReport) {
        self(report)
    }
}
