use anyhow::Result;
use duel_battle::query::{can_act, default_choice};
use duel_battle::{Battle, BattleEvent, BattleReport, Rejection, Side, TurnReport};
use rand::RngCore;
use rand::rngs::StdRng;
use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::config::SessionConfig;
use crate::handle::{SessionCommand, SessionHandle};
use crate::handler::SessionHandler;

/// What the player side produced while the session waited
enum Decision {
    Command(SessionCommand),
    TimedOut,
    Closed,
}

/// Drives one battle against the scripted opponent.
///
/// The engine runs in deferred mode so the opponent's reply can be paced by
/// [`SessionConfig::opponent_delay`]. Player commands arrive through
/// [`SessionHandle`]s and events are dispatched to a [`SessionHandler`].
pub struct Session<R: RngCore = StdRng> {
    battle: Battle<R>,
    config: SessionConfig,
    commands: mpsc::UnboundedReceiver<SessionCommand>,

    /// When the decision clock runs out for the player's current turn.
    /// Kept across rejected commands.
    deadline: Option<Instant>,
}

impl<R: RngCore> Session<R> {
    pub fn new(mut battle: Battle<R>, config: SessionConfig) -> (Self, SessionHandle) {
        battle.set_yield_between_turns(true);
        let (tx, rx) = mpsc::unbounded_channel();

        let session = Self {
            battle,
            config,
            commands: rx,
            deadline: None,
        };
        (session, SessionHandle::new(tx))
    }

    pub fn battle(&self) -> &Battle<R> {
        &self.battle
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn into_battle(self) -> Battle<R> {
        self.battle
    }

    /// Run the battle loop, dispatching events to the handler.
    ///
    /// Returns the final report, or `None` if the player quit, every
    /// handle was dropped, or the decision clock ran out with neither side
    /// able to act before the battle ended.
    pub async fn run<H: SessionHandler>(
        &mut self,
        handler: &mut H,
    ) -> Result<Option<BattleReport>> {
        loop {
            if let Some(report) = self.battle.report().cloned() {
                handler.on_battle_over(&report).await;
                return Ok(Some(report));
            }

            let keep_going = match self.battle.state().turn {
                Side::Player => self.player_phase(handler).await?,
                Side::Opponent => self.opponent_phase(handler).await?,
            };

            if !keep_going {
                tracing::info!(
                    round = self.battle.state().round,
                    "Session ended before the battle"
                );
                return Ok(None);
            }
        }
    }

    /// Wait for one player command and apply it
    async fn player_phase<H: SessionHandler>(&mut self, handler: &mut H) -> Result<bool> {
        if self.deadline.is_none() {
            self.deadline = self.config.turn_timeout.map(|limit| Instant::now() + limit);
        }

        handler.on_player_turn(self.battle.state()).await;

        match self.next_decision().await {
            Decision::Command(SessionCommand::Move(move_id)) => {
                let result = self.battle.submit_player_move(&move_id);
                self.apply(handler, result).await;
            }
            Decision::Command(SessionCommand::Pass) => {
                let result = self.battle.pass_turn();
                self.apply(handler, result).await;
            }
            Decision::Command(SessionCommand::Surrender) => self.surrender(handler).await?,
            Decision::Command(SessionCommand::Quit) | Decision::Closed => return Ok(false),
            Decision::TimedOut if self.is_stalemate() => {
                tracing::warn!(
                    round = self.battle.state().round,
                    "Neither side can act, abandoning the battle"
                );
                return Ok(false);
            }
            Decision::TimedOut => self.play_default(handler).await?,
        }

        if !self.battle.state().is_awaiting(Side::Player) {
            self.deadline = None;
        }
        Ok(true)
    }

    /// Pause, then resolve the opponent's reply. Surrender and quit are
    /// honored during the pause; anything else is out of turn.
    async fn opponent_phase<H: SessionHandler>(&mut self, handler: &mut H) -> Result<bool> {
        let delay = self.config.opponent_delay;

        if !delay.is_zero() {
            handler.on_opponent_thinking(delay).await;

            let sleep = tokio::time::sleep(delay);
            tokio::pin!(sleep);

            loop {
                tokio::select! {
                    _ = &mut sleep => break,
                    command = self.commands.recv() => match command {
                        Some(SessionCommand::Surrender) => {
                            self.surrender(handler).await?;
                            return Ok(true);
                        }
                        Some(SessionCommand::Quit) => return Ok(false),
                        Some(command) => {
                            tracing::debug!(
                                command = ?command,
                                "Command received during opponent turn"
                            );
                            handler.on_rejected(&Rejection::NotYourTurn).await;
                        }
                        None => {
                            (&mut sleep).await;
                            break;
                        }
                    },
                }
            }
        }

        let report = self.battle.resolve_opponent_turn()?;
        self.dispatch(handler, &report).await;
        Ok(true)
    }

    async fn next_decision(&mut self) -> Decision {
        let received = match self.deadline {
            Some(deadline) => {
                if Instant::now() >= deadline {
                    return Decision::TimedOut;
                }
                match tokio::time::timeout_at(deadline, self.commands.recv()).await {
                    Ok(received) => received,
                    Err(_) => return Decision::TimedOut,
                }
            }
            None => self.commands.recv().await,
        };

        match received {
            Some(command) => Decision::Command(command),
            None => Decision::Closed,
        }
    }

    /// Submit the first affordable move for the player, or pass
    async fn play_default<H: SessionHandler>(&mut self, handler: &mut H) -> Result<()> {
        let choice = default_choice(&self.battle.state().player);
        let choice_id = choice.as_ref().map(|mv| mv.id.as_str());

        tracing::warn!(
            timeout = ?self.config.turn_timeout,
            choice = ?choice_id,
            "Decision clock expired, playing default choice"
        );
        handler.on_timeout(choice_id).await;

        let report = match &choice {
            Some(mv) => self.battle.submit_player_move(&mv.id)?,
            None => self.battle.pass_turn()?,
        };
        self.dispatch(handler, &report).await;
        Ok(())
    }

    /// No affordable move on either side and no effect left to change that
    fn is_stalemate(&self) -> bool {
        let state = self.battle.state();
        [&state.player, &state.opponent]
            .iter()
            .all(|c| !can_act(c) && c.effects().is_empty())
    }

    async fn surrender<H: SessionHandler>(&mut self, handler: &mut H) -> Result<()> {
        let report = self.battle.surrender()?;
        handler.on_event(&BattleEvent::BattleOver(report)).await;
        Ok(())
    }

    async fn apply<H: SessionHandler>(
        &mut self,
        handler: &mut H,
        result: Result<TurnReport, Rejection>,
    ) {
        match result {
            Ok(report) => self.dispatch(handler, &report).await,
            Err(rejection) => {
                tracing::debug!(rejection = %rejection, "Player command rejected");
                handler.on_rejected(&rejection).await;
            }
        }
    }

    async fn dispatch<H: SessionHandler>(&self, handler: &mut H, report: &TurnReport) {
        for event in &report.events {
            handler.on_event(event).await;
        }
    }
}
