//! Stat calculator.
//!
//! Derives effective attack/defense, dodge chance and battle-scoped
//! resource ceilings from the player record, the active passive set and the
//! battle status. Pure: nothing here mutates its inputs.

use super::bonus::{BonusLayer, BonusStack};
use crate::skills::{PassiveKind, PassiveSet};
use crate::state::{BattleSession, PlayerRecord, StatusBlock};

/// True if `value` is strictly below `pct` percent of `max`.
pub(crate) fn below_pct(value: u32, max: u32, pct: u32) -> bool {
    (value as u64) * 100 < (max as u64) * (pct as u64)
}

/// True if `value` is strictly above `pct` percent of `max`.
pub(crate) fn above_pct(value: u32, max: u32, pct: u32) -> bool {
    (value as u64) * 100 > (max as u64) * (pct as u64)
}

/// `floor(value × pct / 100)`.
pub(crate) fn percent_of(value: u32, pct: u32) -> u32 {
    ((value as u64 * pct as u64) / 100).min(u32::MAX as u64) as u32
}

/// Snapshot of every derived combat stat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatStats {
    pub attack: u32,
    pub defense: u32,
    /// Dodge chance in per-mille. Not capped; rolls compare against it.
    pub dodge_permille: u32,
    pub max_hp: u32,
    pub max_mana: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct StatCalculator<'a> {
    player: &'a PlayerRecord,
    passives: PassiveSet,
    status: StatusBlock,
    spellweaver_armed: bool,
}

impl<'a> StatCalculator<'a> {
    /// Calculator outside of battle: no buffs, no debuffs.
    pub fn new(player: &'a PlayerRecord, passives: PassiveSet) -> Self {
        Self {
            player,
            passives,
            status: StatusBlock::default(),
            spellweaver_armed: false,
        }
    }

    /// Calculator reading the live player, buffs and debuffs of a session.
    pub fn for_session(session: &'a BattleSession) -> Self {
        Self {
            player: &session.player,
            passives: session.passives,
            status: session.status,
            spellweaver_armed: session.flags.spellweaver,
        }
    }

    fn has(&self, kind: PassiveKind) -> bool {
        self.passives.has(kind)
    }

    /// Attack bonus stack in resolution order.
    pub fn attack_stack(&self) -> BonusStack {
        let player = self.player;
        let (hp, max_hp) = (player.hp, player.max_hp);
        let mut stack = BonusStack::new().flat(player.equipment.attack_bonus() as i64);

        // 1. flat
        if self.has(PassiveKind::ArcaneOverflow) {
            stack = stack.flat((player.mana / 10) as i64);
        }

        // 2. unconditional
        if self.has(PassiveKind::WarMachine) {
            stack = stack.more(BonusLayer::Unconditional, 15);
        }
        if self.has(PassiveKind::DarkPact) {
            stack = stack.more(BonusLayer::Unconditional, 25);
        }
        if self.has(PassiveKind::LichForm) {
            stack = stack.more(BonusLayer::Unconditional, 20);
        }

        // 3. conditional on current HP
        if self.has(PassiveKind::Rage) && below_pct(hp, max_hp, 40) {
            stack = stack.more(BonusLayer::Conditional, 30);
        }
        if self.has(PassiveKind::BloodFrenzy) && max_hp > 0 {
            let missing_tenths = (max_hp.saturating_sub(hp) as u64 * 10 / max_hp as u64) as i64;
            stack = stack.more(BonusLayer::Conditional, missing_tenths * 3);
        }
        if self.has(PassiveKind::WarMachine) && below_pct(hp, max_hp, 50) {
            stack = stack.more(BonusLayer::Conditional, 25);
        }
        if self.has(PassiveKind::Relentless) && above_pct(hp, max_hp, 80) {
            stack = stack.more(BonusLayer::Conditional, 20);
        }
        if self.has(PassiveKind::ImmortalRage) && below_pct(hp, max_hp, 10) {
            stack = stack.more(BonusLayer::Conditional, 100);
        }

        // 4. buffs
        if self.spellweaver_armed && self.has(PassiveKind::Spellweaver) {
            stack = stack.more(BonusLayer::Buff, 50);
        }

        // 5. debuffs
        stack.penalty(self.status.attack_debuff as i64)
    }

    /// Defense bonus stack in resolution order.
    pub fn defense_stack(&self) -> BonusStack {
        let player = self.player;
        let equipment_defense = player.equipment.defense_bonus();
        let mut stack = BonusStack::new().flat(equipment_defense as i64);

        if self.has(PassiveKind::ArmorMastery) {
            stack = stack.flat(percent_of(equipment_defense, 15) as i64);
        }
        if self.has(PassiveKind::Stalwart) {
            stack = stack.flat(5);
        }
        if self.has(PassiveKind::UndeadFortitude) {
            stack = stack.more(BonusLayer::Unconditional, 10);
        }
        if self.has(PassiveKind::LastStand) && below_pct(player.hp, player.max_hp, 40) {
            stack = stack.more(BonusLayer::Conditional, 30);
        }
        if self.status.avatar_active() {
            stack = stack.more(BonusLayer::Buff, 50);
        }

        stack.penalty(self.status.defense_debuff as i64)
    }

    /// Effective attack, never below 1.
    pub fn attack(&self) -> u32 {
        self.attack_stack().apply_u32(self.player.attack, 1)
    }

    /// Effective defense, never below 0.
    pub fn defense(&self) -> u32 {
        self.defense_stack().apply_u32(self.player.defense, 0)
    }

    /// Dodge chance from athletics plus evasion passives.
    pub fn dodge_permille(&self) -> u32 {
        let mut chance = self.player.attributes.athletics.saturating_mul(5);
        if self.has(PassiveKind::ShadowStep) {
            chance = chance.saturating_add(150);
        }
        if self.has(PassiveKind::EvasionMastery) {
            chance = chance.saturating_add(100);
        }
        chance
    }

    /// Max HP for the duration of a battle.
    pub fn battle_max_hp(&self) -> u32 {
        let mut stack = BonusStack::new();
        if self.has(PassiveKind::Unbreakable) {
            stack = stack.more(BonusLayer::Unconditional, 15);
        }
        if self.has(PassiveKind::UndeadFortitude) {
            stack = stack.more(BonusLayer::Unconditional, 10);
        }
        stack.apply_u32(self.player.max_hp, 1)
    }

    /// Max mana for the duration of a battle (+2% per wisdom point).
    pub fn battle_max_mana(&self) -> u32 {
        let wisdom = self.player.attributes.wisdom as i64;
        BonusStack::new()
            .more(BonusLayer::Unconditional, wisdom * 2)
            .apply_u32(self.player.max_mana, 0)
    }

    pub fn snapshot(&self) -> CombatStats {
        CombatStats {
            attack: self.attack(),
            defense: self.defense(),
            dodge_permille: self.dodge_permille(),
            max_hp: self.battle_max_hp(),
            max_mana: self.battle_max_mana(),
        }
    }
}

/// Mana cost after Mana Surge.
pub fn effective_mana_cost(base: u32, passives: PassiveSet) -> u32 {
    if passives.has(PassiveKind::ManaSurge) {
        percent_of(base, 75)
    } else {
        base
    }
}

/// Multipliers applied to skill attack (Arcane Mind, Elemental Mastery).
pub fn skill_damage_bonus(passives: PassiveSet) -> BonusStack {
    let mut stack = BonusStack::new();
    if passives.has(PassiveKind::ArcaneMind) {
        stack = stack.more(BonusLayer::Unconditional, 40);
    }
    if passives.has(PassiveKind::ElementalMastery) {
        stack = stack.more(BonusLayer::Unconditional, 20);
    }
    stack
}
