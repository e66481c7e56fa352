//! Battle tuning knobs

/// Damage formula constants and turn scheduling mode
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct BattleConfig {
    /// Probability of a critical hit per damaging move
    pub crit_chance: f64,

    /// Damage multiplier applied on a critical hit
    pub crit_multiplier: f64,

    /// Lower bound of the random damage multiplier
    pub variance_min: f64,

    /// Upper bound of the random damage multiplier
    pub variance_max: f64,

    /// Stop after the player's move instead of resolving the opponent's reply
    /// in the same call. The caller then drives
    /// [`Battle::resolve_opponent_turn`](crate::Battle::resolve_opponent_turn).
    pub yield_between_turns: bool,
}

impl BattleConfig {
    /// No criticals and a fixed 1.0 multiplier: damage is a pure function of the stats
    pub fn deterministic() -> Self {
        Self {
            crit_chance: 0.0,
            variance_min: 1.0,
            variance_max: 1.0,
            ..Self::default()
        }
    }

    /// Same config, yielding to the caller between the two sides' moves
    pub fn deferred(mut self) -> Self {
        self.yield_between_turns = true;
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            crit_chance: 0.10,
            crit_multiplier: 1.5,
            variance_min: 0.85,
            variance_max: 1.15,
            yield_between_turns: false,
        }
    }
}
