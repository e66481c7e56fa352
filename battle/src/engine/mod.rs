//! Battle resolution: damage, turn flow, effects and rewards

mod battle;
mod damage;
mod effects;
mod events;
mod policy;
mod rewards;
mod turn;

pub use battle::Battle;
pub use damage::{DamageRoll, compute_damage};
pub use events::{AppliedEffect, BattleEvent, Resolution, SkipReason, TurnReport};
pub use policy::{OpponentPolicy, RandomAffordable, select_move};
pub use rewards::{BattleReport, EndReason, LevelScaledRewards, RewardPolicy, RewardSink, Rewards};
pub use turn::{BattleState, Phase};
