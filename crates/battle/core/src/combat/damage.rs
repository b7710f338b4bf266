//! Damage formula.

use crate::stats::percent_of;

/// How a hit treats the target's defense.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DefenseMode {
    /// Defense applies in full.
    #[default]
    Full,
    /// Only `keep_pct` percent of defense applies (floored).
    Pierce { keep_pct: u32 },
    /// True damage: defense counts as 0.
    Ignore,
}

impl DefenseMode {
    /// Defense left after the mode is applied.
    pub fn effective_defense(self, defense: u32) -> u32 {
        match self {
            DefenseMode::Full => defense,
            DefenseMode::Pierce { keep_pct } => percent_of(defense, keep_pct.min(100)),
            DefenseMode::Ignore => 0,
        }
    }
}

/// Calculate damage from an attack.
///
/// # Formula
///
/// ```text
/// base  = max(1, attack - effective_defense / 2)
/// final = max(1, floor(base × variance))
/// ```
///
/// `variance_permille` is the rolled variance (`850..=1150` by default).
/// The base is kept in half-points so odd defense values are not rounded
/// before the variance multiplication.
///
/// Execute bonuses are applied to `attack` by the caller, never to the
/// result.
pub fn calc_damage(attack: u32, defense: u32, mode: DefenseMode, variance_permille: u32) -> u32 {
    let effective_defense = mode.effective_defense(defense) as u64;
    let base_halves = (2 * attack as u64).saturating_sub(effective_defense).max(2);
    let scaled = base_halves * variance_permille as u64 / 2000;
    scaled.clamp(1, u32::MAX as u64) as u32
}

/// `floor(amount × pct / 100)`, used for lifesteal-style and bonus damage.
pub fn scale_damage(amount: u32, pct: u32) -> u32 {
    percent_of(amount, pct)
}
