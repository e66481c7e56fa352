use serde::{Deserialize, Serialize};

/// Payload delivered to the economy/profile service when a battle ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rewards {
    pub money: u64,
    pub experience: u64,
}

impl Rewards {
    pub fn new(money: u64, experience: u64) -> Self {
        Self { money, experience }
    }

    /// Nothing earned
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.money == 0 && self.experience == 0
    }
}
