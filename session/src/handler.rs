use std::time::Duration;

use async_trait::async_trait;
use duel_battle::{BattleEvent, BattleReport, BattleState, Rejection};

/// Trait for reacting to a running battle.
///
/// Implement this trait to render a battle or to script the player. All
/// methods have default no-op implementations, so you only need to implement
/// the events you care about.
///
/// # Example
///
/// ```ignore
/// struct Printer;
///
/// #[async_trait]
/// impl SessionHandler for Printer {
///     async fn on_event(&mut self, event: &BattleEvent) {
///         println!("{}", event);
///     }
/// }
/// ```
#[async_trait]
pub trait SessionHandler: Send {
    /// Called for every engine event, in order.
    async fn on_event(&mut self, event: &BattleEvent) {
        let _ = event;
    }

    /// Called each time the session starts waiting for a player command.
    async fn on_player_turn(&mut self, state: &BattleState) {
        let _ = state;
    }

    /// Called when the engine refuses a command. The player keeps the turn.
    async fn on_rejected(&mut self, rejection: &Rejection) {
        let _ = rejection;
    }

    /// Called before the presentation pause ahead of the opponent's reply.
    async fn on_opponent_thinking(&mut self, delay: Duration) {
        let _ = delay;
    }

    /// Called when the decision clock runs out. `choice` is the move submitted
    /// on the player's behalf, or `None` if the turn was passed.
    async fn on_timeout(&mut self, choice: Option<&str>) {
        let _ = choice;
    }

    /// Called once when the battle ends.
    async fn on_battle_over(&mut self, report: &BattleReport) {
        let _ = report;
    }
}
