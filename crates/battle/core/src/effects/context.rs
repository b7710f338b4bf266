//! Input and output of an effect handler.

use crate::state::{LogEntry, LogKind, MonsterState, PlayerVitals, StatusBlock};

/// Resource ceilings visible to effect handlers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EffectLimits {
    /// Permanent max HP (recoil is a share of this).
    pub max_hp: u32,
    /// Permanent max mana (mana restores clamp here).
    pub max_mana: u32,
    /// Battle-scoped max HP (heals clamp here).
    pub battle_max_hp: u32,
    /// Battle-scoped max mana.
    pub battle_max_mana: u32,
}

/// Snapshot handed to an effect handler after a skill hit lands.
///
/// Everything is a copy: handlers cannot reach the live session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EffectContext {
    /// Damage the skill just dealt.
    pub damage: u32,
    /// Mana paid for the skill.
    pub mana_spent: u32,
    pub player: PlayerVitals,
    pub monster: MonsterState,
    pub status: StatusBlock,
    pub limits: EffectLimits,
}

impl EffectContext {
    /// Context as seen by the next handler once `update` is applied.
    pub fn after(&self, update: &EffectUpdate) -> Self {
        Self {
            player: update.player.unwrap_or(self.player),
            monster: update.monster.unwrap_or(self.monster),
            status: update.status.unwrap_or(self.status),
            ..*self
        }
    }

    /// Heals the player, clamped to the battle max HP. Never lowers HP.
    pub fn heal(&self, player: PlayerVitals, amount: u32) -> PlayerVitals {
        let cap = self.limits.battle_max_hp.max(player.hp);
        PlayerVitals {
            hp: player.hp.saturating_add(amount).min(cap),
            ..player
        }
    }

    /// Restores mana, clamped to the permanent max mana. Never lowers mana.
    pub fn restore_mana(&self, player: PlayerVitals, amount: u32) -> PlayerVitals {
        let cap = self.limits.max_mana.max(player.mana);
        PlayerVitals {
            mana: player.mana.saturating_add(amount).min(cap),
            ..player
        }
    }
}

/// Partial update returned by a handler. `None` leaves that part untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EffectUpdate {
    pub player: Option<PlayerVitals>,
    pub monster: Option<MonsterState>,
    pub status: Option<StatusBlock>,
    pub log: Vec<LogEntry>,
}

impl EffectUpdate {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.player.is_none()
            && self.monster.is_none()
            && self.status.is_none()
            && self.log.is_empty()
    }

    pub fn with_player(mut self, player: PlayerVitals) -> Self {
        self.player = Some(player);
        self
    }

    pub fn with_monster(mut self, monster: MonsterState) -> Self {
        self.monster = Some(monster);
        self
    }

    pub fn with_status(mut self, status: StatusBlock) -> Self {
        self.status = Some(status);
        self
    }

    pub fn logged(mut self, kind: LogKind, text: impl Into<String>) -> Self {
        self.log.push(LogEntry::new(kind, text));
        self
    }

    /// Layers `next` on top of `self`; later values win, logs concatenate.
    pub fn merge(mut self, next: EffectUpdate) -> Self {
        self.player = next.player.or(self.player);
        self.monster = next.monster.or(self.monster);
        self.status = next.status.or(self.status);
        self.log.extend(next.log);
        self
    }
}
