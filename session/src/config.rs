use std::time::Duration;

/// Pacing of a [`Session`](crate::Session)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Pause before the opponent's reply is resolved
    pub opponent_delay: Duration,

    /// How long the player may think before the default choice is submitted.
    /// `None` waits indefinitely.
    pub turn_timeout: Option<Duration>,
}

impl SessionConfig {
    /// No pauses and no decision clock
    pub fn instant() -> Self {
        Self {
            opponent_delay: Duration::ZERO,
            turn_timeout: None,
        }
    }

    pub fn with_turn_timeout(mut self, timeout: Duration) -> Self {
        self.turn_timeout = Some(timeout);
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            opponent_delay: Duration::from_secs(1),
            turn_timeout: None,
        }
    }
}
