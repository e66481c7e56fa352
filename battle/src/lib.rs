//! Turn-based battle resolution for duel card battles.
//!
//! This crate owns the authoritative state of one player-versus-opponent
//! battle: it validates moves, computes damage, alternates turns, applies
//! status effects, detects the end of the battle and reports rewards.
//!
//! # Overview
//!
//! `duel-battle` sits between `duel-records` (catalog data) and the drivers
//! that present a battle:
//!
//! ```text
//! duel-records (cards, moves, rewards)
//!        │
//!        ▼
//! duel-battle (engine) ← THIS CRATE
//!        │
//!        └─> duel-session (async driver, opponent delay, decision clock)
//! ```
//!
//! # Main Types
//!
//! ## Domain Types
//! - [`Combatant`] - A card in battle: stats, moves and active effects
//! - [`Move`] - Immutable move definition, shared as `Arc<Move>`
//! - [`MoveCatalog`] - Move lookup built from catalog records
//! - [`Side`] - Player or opponent
//!
//! ## Engine
//! - [`Battle`] - Orchestrator and main entry point
//! - [`BattleState`] - Turn owner, round, phase and both combatants
//! - [`BattleEvent`] / [`TurnReport`] - What happened during one call
//! - [`RewardPolicy`] / [`RewardSink`] - Reward computation and delivery
//!
//! # Example Usage
//!
//! ```ignore
//! use duel_battle::{Battle, BattleConfig, MoveCatalog};
//!
//! let document = duel_records::default_catalog()?;
//! let catalog = MoveCatalog::from_document(&document)?;
//! let player = catalog.build_combatant(document.find_starter("ignis").unwrap())?;
//! let opponent = catalog.build_combatant(document.find_opponent("alley-cat").unwrap())?;
//!
//! let mut battle = Battle::new(player, opponent, BattleConfig::default());
//!
//! match battle.submit_player_move("quick-strike") {
//!     Ok(report) => {
//!         for event in &report.events {
//!             println!("{}", event);
//!         }
//!     }
//!     Err(rejection) => println!("Rejected: {}", rejection),
//! }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod query;
pub mod types;

// Re-export main types at crate root for convenience
pub use config::BattleConfig;
pub use engine::{
    AppliedEffect, Battle, BattleEvent, BattleReport, BattleState, DamageRoll, EndReason,
    LevelScaledRewards, OpponentPolicy, Phase, RandomAffordable, Resolution, RewardPolicy,
    RewardSink, Rewards, SkipReason, TurnReport, compute_damage, select_move,
};
pub use error::{BattleError, Rejection};
pub use types::{
    ActiveEffect, Combatant, EffectKind, Move, MoveCatalog, MoveCategory, Side, Stats,
    StatusEffect,
};
