use strum::{Display, IntoStaticStr};

use super::{BattleLog, MonsterDescriptor, MonsterState, PlayerRecord, StatusBlock};
use crate::skills::PassiveSet;

/// Battle state machine phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    PlayerTurn,
    MonsterTurn,
    Victory,
    Defeat,
    Fled,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Victory | Self::Defeat | Self::Fled)
    }
}

/// Per-battle booleans outside the status counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleFlags {
    /// The player chose Defend this round.
    pub defending: bool,
    /// The player defended during the previous round (Counter Strike).
    pub defended_last_turn: bool,
    /// Spellweaver is armed: the next normal attack deals +50%.
    pub spellweaver: bool,
    /// Undying Will has fired this battle.
    pub undying_will_used: bool,
    /// Death's Embrace has fired this battle.
    pub deaths_embrace_used: bool,
}

/// Battle-scoped resource ceilings.
///
/// These may exceed the permanent maxima because of passives (Unbreakable,
/// Undead Fortitude, wisdom). Computed once when the battle starts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleLimits {
    pub max_hp: u32,
    pub max_mana: u32,
}

/// Transient per-encounter state.
///
/// Sessions are values: the engine never mutates a session it was handed,
/// it returns a new one. `seed` and `nonce` determine every roll, so a
/// session plus a command sequence replays exactly.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSession {
    pub seed: u64,
    /// Incremented by every accepted transition.
    pub nonce: u64,
    pub phase: Phase,
    /// Completed monster turns.
    pub round: u32,
    /// Live copy of the player; written back only on settle.
    pub player: PlayerRecord,
    pub monster_info: MonsterDescriptor,
    pub monster: MonsterState,
    pub status: StatusBlock,
    pub flags: BattleFlags,
    /// Class innate passive plus every unlocked tree passive.
    pub passives: PassiveSet,
    pub limits: BattleLimits,
    pub log: BattleLog,
}

impl BattleSession {
    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn is_boss(&self) -> bool {
        self.monster_info.is_boss()
    }

    /// Monster defense after armor break.
    pub fn monster_defense(&self) -> u32 {
        if self.status.armor_broken() {
            0
        } else {
            self.monster.defense
        }
    }

    pub(crate) fn heal_player(&mut self, amount: u32) -> u32 {
        let before = self.player.hp;
        self.player.hp = self
            .player
            .hp
            .saturating_add(amount)
            .min(self.limits.max_hp.max(before));
        self.player.hp - before
    }

    pub(crate) fn restore_mana(&mut self, amount: u32) -> u32 {
        let before = self.player.mana;
        self.player.mana = self
            .player
            .mana
            .saturating_add(amount)
            .min(self.limits.max_mana.max(before));
        self.player.mana - before
    }
}
