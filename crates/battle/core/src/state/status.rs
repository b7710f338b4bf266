//! Status effect tracker.
//!
//! All counters live on the battle session. A tick on a counter that is
//! above zero applies its effect once and then decrements it by exactly one;
//! a counter at zero does nothing. Debuff magnitudes are not ticked: they
//! accumulate for the rest of the battle.

use crate::stats::percent_of;

/// Counters and flags for every status effect in a battle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusBlock {
    /// Poison turns remaining on the player.
    pub player_poison: u32,
    /// Poison turns remaining on the monster.
    pub monster_poison: u32,
    /// Doom turns remaining on the monster.
    pub monster_doom: u32,
    /// Attack points removed from the player by enemy skills.
    pub attack_debuff: u32,
    /// Defense points removed from the player by enemy skills.
    pub defense_debuff: u32,
    /// The next incoming hit is dodged.
    pub dodge_next: bool,
    /// Number of further incoming hits that are dodged.
    pub dodge_charges: u32,
    /// Monster strikes still softened by the "avatar" defense buff.
    pub avatar_turns: u32,
    /// Player hits that still treat monster defense as 0.
    pub armor_break_turns: u32,
}

/// Decrements an active counter. Returns whether it was active.
fn tick(counter: &mut u32) -> bool {
    if *counter == 0 {
        return false;
    }
    *counter -= 1;
    true
}

impl StatusBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticks monster poison. Returns the damage to apply, if the counter was active.
    pub fn tick_monster_poison(&mut self, monster_max_hp: u32, pct: u32) -> Option<u32> {
        tick(&mut self.monster_poison).then(|| percent_of(monster_max_hp, pct))
    }

    /// Ticks monster doom. Returns the damage to apply, if the counter was active.
    pub fn tick_monster_doom(&mut self, monster_max_hp: u32, pct: u32) -> Option<u32> {
        tick(&mut self.monster_doom).then(|| percent_of(monster_max_hp, pct))
    }

    /// Ticks player poison. Returns the damage to apply, if the counter was active.
    pub fn tick_player_poison(&mut self, player_max_hp: u32, pct: u32) -> Option<u32> {
        tick(&mut self.player_poison).then(|| percent_of(player_max_hp, pct))
    }

    /// Ticks the avatar buff once a monster turn is over. Returns true when
    /// it just ran out.
    pub fn tick_avatar(&mut self) -> bool {
        tick(&mut self.avatar_turns) && self.avatar_turns == 0
    }

    /// Ticks armor break once a player hit has resolved. Returns true when
    /// it just ran out.
    pub fn tick_armor_break(&mut self) -> bool {
        tick(&mut self.armor_break_turns) && self.armor_break_turns == 0
    }

    /// Sets or raises monster poison; never lowers it.
    pub fn raise_monster_poison(&mut self, turns: u32) {
        self.monster_poison = self.monster_poison.max(turns);
    }

    /// Sets or raises monster doom; never lowers it.
    pub fn raise_monster_doom(&mut self, turns: u32) {
        self.monster_doom = self.monster_doom.max(turns);
    }

    /// Sets or raises player poison; never lowers it.
    pub fn raise_player_poison(&mut self, turns: u32) {
        self.player_poison = self.player_poison.max(turns);
    }

    pub fn grant_dodge_charges(&mut self, charges: u32) {
        self.dodge_charges = self.dodge_charges.max(charges);
    }

    /// Consumes the one-shot dodge flag, if set.
    pub fn take_dodge_next(&mut self) -> bool {
        core::mem::take(&mut self.dodge_next)
    }

    /// Consumes one dodge charge, if any remain.
    pub fn take_dodge_charge(&mut self) -> bool {
        tick(&mut self.dodge_charges)
    }

    pub fn avatar_active(&self) -> bool {
        self.avatar_turns > 0
    }

    pub fn armor_broken(&self) -> bool {
        self.armor_break_turns > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poison_ticks_then_stops() {
        let mut status = StatusBlock {
            monster_poison: 2,
            ..StatusBlock::new()
        };
        assert_eq!(status.tick_monster_poison(100, 6), Some(6));
        assert_eq!(status.monster_poison, 1);
        assert_eq!(status.tick_monster_poison(100, 6), Some(6));
        assert_eq!(status.monster_poison, 0);
        // Exhausted counter never deals damage again
        assert_eq!(status.tick_monster_poison(100, 6), None);
        assert_eq!(status.monster_poison, 0);
    }

    #[test]
    fn raise_never_lowers() {
        let mut status = StatusBlock::new();
        status.raise_monster_poison(3);
        status.raise_monster_poison(2);
        assert_eq!(status.monster_poison, 3);
        status.raise_monster_doom(4);
        status.raise_monster_doom(3);
        assert_eq!(status.monster_doom, 4);
    }

    #[test]
    fn dodge_flag_and_charges_are_consumed_once() {
        let mut status = StatusBlock {
            dodge_next: true,
            dodge_charges: 1,
            ..StatusBlock::new()
        };
        assert!(status.take_dodge_next());
        assert!(!status.take_dodge_next());
        assert!(status.take_dodge_charge());
        assert!(!status.take_dodge_charge());
    }

    #[test]
    fn buffs_report_expiry_on_last_tick() {
        let mut status = StatusBlock {
            avatar_turns: 2,
            armor_break_turns: 1,
            ..StatusBlock::new()
        };
        assert!(!status.tick_avatar());
        assert!(status.tick_armor_break());
        assert!(status.avatar_active());
        assert!(!status.armor_broken());

        assert!(status.tick_avatar());
        assert!(!status.tick_avatar());
        assert!(!status.tick_armor_break());
        assert_eq!(status.avatar_turns, 0);
    }

    #[test]
    fn dot_damage_floors() {
        let mut status = StatusBlock {
            player_poison: 1,
            ..StatusBlock::new()
        };
        // 5% of 39 = 1.95
        assert_eq!(status.tick_player_poison(39, 5), Some(1));
    }
}
