//! Damage calculation
//!
//! One canonical formula:
//!
//! ```text
//! base   = power * attack / max(defense, 1)
//! crit   = roll < crit_chance        -> base * crit_multiplier
//! damage = floor(base * uniform(variance_min..=variance_max)), never negative
//! ```
//!
//! Attack includes Buff/Debuff modifiers. Zero-power moves deal nothing and
//! consume no randomness.

use rand::Rng;

use crate::config::BattleConfig;
use crate::types::{Combatant, Move};

/// Outcome of one damage calculation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DamageRoll {
    pub damage: u32,
    pub critical: bool,
}

/// Compute the damage `mv` deals from `attacker` to `defender`
pub fn compute_damage<R: Rng + ?Sized>(
    mv: &Move,
    attacker: &Combatant,
    defender: &Combatant,
    rng: &mut R,
    config: &BattleConfig,
) -> DamageRoll {
    if !mv.is_damaging() {
        return DamageRoll::default();
    }

    let attack = f64::from(attacker.effective_attack());
    let defense = f64::from(defender.effective_defense().max(1));
    let mut damage = f64::from(mv.power) * (attack / defense);

    let critical = config.crit_chance > 0.0 && rng.r#gen::<f64>() < config.crit_chance;
    if critical {
        damage *= config.crit_multiplier;
    }

    damage *= variance(rng, config);

    DamageRoll {
        damage: damage.floor().max(0.0) as u32,
        critical,
    }
}

/// Draw the random multiplier; a collapsed range is returned without a draw
fn variance<R: Rng + ?Sized>(rng: &mut R, config: &BattleConfig) -> f64 {
    let low = config.variance_min.min(config.variance_max).max(0.0);
    let high = config.variance_min.max(config.variance_max).max(0.0);

    if high - low <= f64::EPSILON {
        low
    } else {
        rng.gen_range(low..=high)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::types::{ActiveEffect, EffectKind, MoveCategory, Stats};

    fn fighter(attack: u32, defense: u32) -> Combatant {
        let tackle = Arc::new(Move::new("tackle", "Tackle", MoveCategory::Attack, 20, 15));
        Combatant::new("f", "Fighter", 1, Stats::new(100, 100, attack, defense), vec![tackle])
            .unwrap()
    }

    fn slash() -> Move {
        Move::new("slash", "Slash", MoveCategory::Attack, 25, 20)
    }

    #[test]
    fn test_pinned_damage() {
        let mut rng = StdRng::seed_from_u64(7);
        let roll = compute_damage(
            &slash(),
            &fighter(15, 10),
            &fighter(10, 10),
            &mut rng,
            &BattleConfig::deterministic(),
        );
        assert_eq!(roll, DamageRoll { damage: 37, critical: false });
    }

    #[test]
    fn test_zero_power_deals_nothing() {
        let guard = Move::new("guard", "Guard", MoveCategory::Defense, 0, 10);
        let mut rng = StdRng::seed_from_u64(1);
        let config = BattleConfig {
            crit_chance: 1.0,
            ..BattleConfig::default()
        };

        let roll = compute_damage(&guard, &fighter(50, 1), &fighter(1, 1), &mut rng, &config);
        assert_eq!(roll, DamageRoll::default());
    }

    #[test]
    fn test_zero_defense_is_clamped() {
        let mut rng = StdRng::seed_from_u64(1);
        let roll = compute_damage(
            &slash(),
            &fighter(10, 10),
            &fighter(10, 0),
            &mut rng,
            &BattleConfig::deterministic(),
        );
        assert_eq!(roll.damage, 250);
    }

    #[test]
    fn test_guaranteed_critical() {
        let mut rng = StdRng::seed_from_u64(3);
        let config = BattleConfig {
            crit_chance: 1.0,
            ..BattleConfig::deterministic()
        };

        let roll = compute_damage(&slash(), &fighter(15, 10), &fighter(10, 10), &mut rng, &config);
        assert!(roll.critical);
        assert_eq!(roll.damage, 56);
    }

    #[test]
    fn test_variance_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(99);
        let config = BattleConfig {
            crit_chance: 0.0,
            ..BattleConfig::default()
        };
        let attacker = fighter(10, 10);
        let defender = fighter(10, 10);
        let strike = Move::new("strike", "Strike", MoveCategory::Attack, 100, 0);

        for _ in 0..200 {
            let roll = compute_damage(&strike, &attacker, &defender, &mut rng, &config);
            assert!((85..=115).contains(&roll.damage), "damage {}", roll.damage);
        }
    }

    #[test]
    fn test_buff_raises_damage() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut attacker = fighter(15, 10);
        attacker.add_effect(ActiveEffect::new(EffectKind::Buff, 1, 5));

        let roll = compute_damage(
            &slash(),
            &attacker,
            &fighter(10, 10),
            &mut rng,
            &BattleConfig::deterministic(),
        );
        assert_eq!(roll.damage, 50);
    }
}
