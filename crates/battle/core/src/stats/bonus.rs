//! Layered bonus application.
//!
//! Calculation order:
//! Base + Flat → More(Unconditional) → More(Conditional) → More(Buff) → Less → Penalty → Clamp
//!
//! Every multiplicative step is applied individually and floored, so the
//! order of bonuses inside a layer is part of the result. Callers push
//! bonuses in the documented passive order.

/// Which multiplicative layer a "more" bonus belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BonusLayer {
    /// Always-on percentage passives.
    Unconditional,
    /// Passives gated on current HP.
    Conditional,
    /// Temporary battle buffs.
    Buff,
}

impl BonusLayer {
    const ORDER: [BonusLayer; 3] = [
        BonusLayer::Unconditional,
        BonusLayer::Conditional,
        BonusLayer::Buff,
    ];
}

/// A single modifier applied to a stat value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bonus {
    /// Added to the base before any multiplier.
    Flat(i64),
    /// Multiplier `×(100 + percent)/100` within a layer (`100` doubles).
    More { layer: BonusLayer, percent: i64 },
    /// Reduction `×(100 - percent)/100`, applied after all `More` layers.
    Less(i64),
    /// Subtracted after every multiplier (debuff magnitudes).
    Penalty(i64),
}

/// Ordered collection of bonuses.
///
/// # Example
/// ```
/// # use battle_core::stats::{BonusLayer, BonusStack};
/// let attack = BonusStack::new()
///     .flat(5)                                  // 10 + 5 = 15
///     .more(BonusLayer::Unconditional, 15)      // 15 × 1.15 = 17.25 → 17
///     .more(BonusLayer::Conditional, 30)        // 17 × 1.3 = 22.1 → 22
///     .penalty(4)                               // 22 - 4 = 18
///     .apply(10, 1, i64::MAX);
/// assert_eq!(attack, 18);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BonusStack {
    bonuses: Vec<Bonus>,
}

impl BonusStack {
    pub fn new() -> Self {
        Self {
            bonuses: Vec::new(),
        }
    }

    pub fn add(&mut self, bonus: Bonus) {
        self.bonuses.push(bonus);
    }

    pub fn extend(&mut self, bonuses: impl IntoIterator<Item = Bonus>) {
        self.bonuses.extend(bonuses);
    }

    /// Apply all bonuses to `base` and clamp to `[min, max]`.
    pub fn apply(&self, base: i64, min: i64, max: i64) -> i64 {
        let flat: i64 = self
            .bonuses
            .iter()
            .filter_map(|b| match b {
                Bonus::Flat(v) => Some(*v),
                _ => None,
            })
            .sum();

        let after_more = BonusLayer::ORDER
            .iter()
            .fold(base + flat, |value, layer| {
                self.bonuses
                    .iter()
                    .filter_map(|b| match b {
                        Bonus::More { layer: l, percent } if l == layer => Some(*percent),
                        _ => None,
                    })
                    .fold(value, |acc, percent| (acc * (100 + percent)).div_euclid(100))
            });

        let after_less = self
            .bonuses
            .iter()
            .filter_map(|b| match b {
                Bonus::Less(p) => Some(*p),
                _ => None,
            })
            .fold(after_more, |acc, percent| (acc * (100 - percent)).div_euclid(100));

        let penalty: i64 = self
            .bonuses
            .iter()
            .filter_map(|b| match b {
                Bonus::Penalty(v) => Some(*v),
                _ => None,
            })
            .sum();

        (after_less - penalty).clamp(min, max)
    }

    /// Convenience for non-negative stats.
    pub fn apply_u32(&self, base: u32, min: u32) -> u32 {
        self.apply(base as i64, min as i64, u32::MAX as i64) as u32
    }

    pub fn is_empty(&self) -> bool {
        self.bonuses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bonuses.len()
    }
}

/// Builder-style helpers.
impl BonusStack {
    pub fn flat(mut self, value: i64) -> Self {
        self.add(Bonus::Flat(value));
        self
    }

    pub fn more(mut self, layer: BonusLayer, percent: i64) -> Self {
        self.add(Bonus::More { layer, percent });
        self
    }

    pub fn less(mut self, percent: i64) -> Self {
        self.add(Bonus::Less(percent));
        self
    }

    pub fn penalty(mut self, value: i64) -> Self {
        self.add(Bonus::Penalty(value));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_then_layers_in_order() {
        // Buff pushed first still applies after the conditional layer
        let stack = BonusStack::new()
            .more(BonusLayer::Buff, 50)
            .more(BonusLayer::Conditional, 30)
            .flat(3);
        // (7 + 3) = 10 → ×1.3 = 13 → ×1.5 = 19.5 → 19
        assert_eq!(stack.apply(7, 0, 1000), 19);
    }

    #[test]
    fn each_step_floors() {
        let stack = BonusStack::new()
            .more(BonusLayer::Unconditional, 25)
            .more(BonusLayer::Unconditional, 20);
        // 11 × 1.25 = 13.75 → 13; 13 × 1.2 = 15.6 → 15
        assert_eq!(stack.apply(11, 0, 1000), 15);
    }

    #[test]
    fn less_reductions_are_sequential() {
        let stack = BonusStack::new().less(10).less(8).less(20);
        // 100 → 90 → 82.8 → 82 → 65.6 → 65
        assert_eq!(stack.apply(100, 1, i64::MAX), 65);
        assert_eq!(stack.apply(1, 1, i64::MAX), 1);
    }

    #[test]
    fn penalty_clamps_at_minimum() {
        let stack = BonusStack::new().penalty(50);
        assert_eq!(stack.apply(12, 1, i64::MAX), 1);
        assert_eq!(stack.apply(12, 0, i64::MAX), 0);
        assert_eq!(stack.apply_u32(12, 0), 0);
    }

    #[test]
    fn empty_stack_is_identity() {
        let stack = BonusStack::new();
        assert!(stack.is_empty());
        assert_eq!(stack.apply(42, 0, 100), 42);
    }
}
