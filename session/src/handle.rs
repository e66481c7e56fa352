use anyhow::{Result, anyhow};
use tokio::sync::mpsc;

/// A request from the player side of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Move(String),
    Pass,
    Surrender,
    /// Stop driving the battle without finishing it
    Quit,
}

/// Cloneable handle for sending player commands to a running session.
///
/// Commands are queued; a session reads them only when it is waiting on the
/// player, except surrender and quit, which are honored at any time.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<SessionCommand>,
}

impl SessionHandle {
    pub(crate) fn new(tx: mpsc::UnboundedSender<SessionCommand>) -> Self {
        Self { tx }
    }

    pub(crate) fn send(&self, command: SessionCommand) -> Result<()> {
        self.tx
            .send(command)
            .map_err(|_| anyhow!("Session closed"))
    }

    pub fn choose_move(&self, move_id: &str) -> Result<()> {
        self.send(SessionCommand::Move(move_id.to_string()))
    }

    pub fn pass(&self) -> Result<()> {
        self.send(SessionCommand::Pass)
    }

    pub fn surrender(&self) -> Result<()> {
        self.send(SessionCommand::Surrender)
    }

    pub fn quit(&self) -> Result<()> {
        self.send(SessionCommand::Quit)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
