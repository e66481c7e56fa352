//! Async driver for duel card battles.
//!
//! A [`Session`] owns one [`Battle`](duel_battle::Battle), paces the
//! opponent's replies, optionally runs a decision clock for the player, and
//! reports everything that happens to a [`SessionHandler`]. Player commands
//! are sent through cloneable [`SessionHandle`]s.

mod config;
mod handle;
mod handler;
mod session;

pub use duel_battle::{BattleEvent, BattleReport, BattleState, Rejection};

pub use config::SessionConfig;
pub use handle::{SessionCommand, SessionHandle};
pub use handler::SessionHandler;
pub use session::Session;
