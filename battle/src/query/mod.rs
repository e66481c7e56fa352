//! Query helpers for move decisions
//!
//! Read-only utilities over combatants, used by drivers that need to pick a
//! move on the player's behalf or preview a choice.

mod moves;

pub use moves::{
    // Availability
    can_act,
    default_choice,
    // Damage previews
    estimated_damage,
    strongest_affordable,
};
