//! Experience curve and level-up gains.

use crate::env::{Dice, Roll};
use crate::state::{Attribute, PlayerRecord};

/// Experience needed to advance from `level` to `level + 1`.
///
/// `floor(50 × level^1.5)`, computed as `isqrt(2500 × level³)`.
pub fn exp_for_level(level: u32) -> u32 {
    let level = level.max(1) as u64;
    (2500 * level * level * level).isqrt().min(u32::MAX as u64) as u32
}

/// Stat gains of one level-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelUp {
    /// Level reached.
    pub level: u32,
    pub hp: u32,
    pub mana: u32,
    pub attack: u32,
    pub defense: u32,
    /// Secondary attribute that received a point.
    pub attribute: Attribute,
}

/// Attribute rewarded at `level`; cycles charisma, wisdom, athletics.
pub fn attribute_for_level(level: u32) -> Attribute {
    match level % 3 {
        0 => Attribute::Charisma,
        1 => Attribute::Wisdom,
        _ => Attribute::Athletics,
    }
}

/// Adds `exp` to the player and resolves every level-up it pays for.
///
/// Each level-up consumes its cost, raises the permanent stats and restores
/// HP to the new maximum.
pub fn gain_experience(player: &mut PlayerRecord, exp: u32, dice: &mut Dice<'_>) -> Vec<LevelUp> {
    player.exp = player.exp.saturating_add(exp);
    let mut gains = Vec::new();

    loop {
        let needed = exp_for_level(player.level);
        if player.exp < needed {
            break;
        }
        player.exp -= needed;
        player.level += 1;

        let gain = LevelUp {
            level: player.level,
            hp: dice.range(Roll::LevelUp, 8, 12),
            mana: dice.range(Roll::LevelUp, 3, 5),
            attack: dice.range(Roll::LevelUp, 1, 2),
            defense: dice.range(Roll::LevelUp, 1, 2),
            attribute: attribute_for_level(player.level),
        };
        player.max_hp += gain.hp;
        player.max_mana += gain.mana;
        player.attack += gain.attack;
        player.defense += gain.defense;
        player.attributes.raise(gain.attribute, 1);
        player.hp = player.max_hp;

        tracing::debug!(level = gain.level, hp = gain.hp, "level up");
        gains.push(gain);
    }

    gains
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FixedRng, class};

    #[test]
    fn curve_matches_reference_values() {
        assert_eq!(exp_for_level(1), 50);
        // 50 × 2.828 = 141.4
        assert_eq!(exp_for_level(2), 141);
        // 50 × 5.196 = 259.8
        assert_eq!(exp_for_level(3), 259);
        assert_eq!(exp_for_level(4), 400);
        assert_eq!(exp_for_level(10), 1581);
    }

    #[test]
    fn multiple_level_ups_consume_exp() {
        let rng = FixedRng(0);
        let mut dice = Dice::new(&rng, 1, 0);
        let mut player = PlayerRecord::new("Hero", &class());
        player.hp = 3;

        let gains = gain_experience(&mut player, 50 + 141 + 10, &mut dice);
        assert_eq!(gains.len(), 2);
        assert_eq!(player.level, 3);
        assert_eq!(player.exp, 10);
        // Minimum rolls: +8 HP, +3 mana, +1/+1 per level
        assert_eq!(player.max_hp, 116);
        assert_eq!(player.hp, 116);
        assert_eq!(player.max_mana, 46);
        assert_eq!(player.attack, 12);
        assert_eq!(gains[0].attribute, Attribute::Athletics);
        assert_eq!(gains[1].attribute, Attribute::Charisma);
        assert_eq!(player.attributes.athletics, 1);
    }

    #[test]
    fn no_level_up_below_threshold() {
        let rng = FixedRng(0);
        let mut dice = Dice::new(&rng, 1, 0);
        let mut player = PlayerRecord::new("Hero", &class());
        assert!(gain_experience(&mut player, 49, &mut dice).is_empty());
        assert_eq!(player.exp, 49);
        assert_eq!(dice.draws(), 0);
    }
}
