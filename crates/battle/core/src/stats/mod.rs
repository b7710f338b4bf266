//! Stat derivation: the layered bonus stack and the stat calculator.
pub mod bonus;
mod calculator;

pub use bonus::{Bonus, BonusLayer, BonusStack};
pub use calculator::{CombatStats, StatCalculator, effective_mana_cost, skill_damage_bonus};
pub(crate) use calculator::{below_pct, percent_of};
