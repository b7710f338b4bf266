//! Combat resolution.
//!
//! Pure functions turning attack and defense values into damage. Effect
//! names that alter the formula (pierce, true damage, execute) are parsed
//! into a [`DamageModifier`] before the formula runs.

pub mod damage;
pub mod modifier;

pub use damage::{DefenseMode, calc_damage, scale_damage};
pub use modifier::{DamageModifier, Execute};
