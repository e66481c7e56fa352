//! Combatant stats and the clamped health/energy meters

/// Battle stats of one combatant
///
/// Only `health` and `energy` change during a battle, and only through the
/// clamping methods below, which keep `0 <= health <= max_health` and
/// `0 <= energy <= max_energy`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stats {
    pub health: u32,
    pub max_health: u32,
    pub energy: u32,
    pub max_energy: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: Option<u32>,
}

impl Stats {
    /// Create stats with full health and energy
    pub fn new(max_health: u32, max_energy: u32, attack: u32, defense: u32) -> Self {
        Self {
            health: max_health,
            max_health,
            energy: max_energy,
            max_energy,
            attack,
            defense,
            speed: None,
        }
    }

    pub fn with_speed(mut self, speed: u32) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Subtract damage, floored at 0. Returns the health actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.health);
        self.health -= lost;
        lost
    }

    /// Restore health, capped at max. Returns the health actually gained.
    pub fn restore_health(&mut self, amount: u32) -> u32 {
        let gained = amount.min(self.max_health - self.health);
        self.health += gained;
        gained
    }

    /// Spend energy if there is enough; leaves energy untouched otherwise
    pub fn spend_energy(&mut self, amount: u32) -> bool {
        if amount > self.energy {
            return false;
        }
        self.energy -= amount;
        true
    }

    /// Get health as percentage (0-100)
    pub fn health_percent(&self) -> u32 {
        if self.max_health == 0 {
            return 0;
        }
        self.health * 100 / self.max_health
    }

    pub fn is_depleted(&self) -> bool {
        self.health == 0
    }

    /// Check the meter invariants
    pub fn is_consistent(&self) -> bool {
        self.max_health > 0 && self.health <= self.max_health && self.energy <= self.max_energy
    }
}
