//! Passive resolver.
//!
//! Every hook walks [`PassiveHook::order`] and applies the steps whose
//! passive is active. Hooks operate on the working copy of the session the
//! engine is building; they never see the published session.

use super::{PassiveHook, PassiveStep};
use crate::combat::scale_damage;
use crate::config::BattleConfig;
use crate::env::{Dice, Roll};
use crate::skills::PassiveKind;
use crate::state::{BattleSession, LogKind};
use crate::stats::{BonusStack, StatCalculator, below_pct};

/// Result of the damage-taken pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IncomingHit {
    /// Damage that reaches HP.
    pub damage: u32,
    /// Damage paid with mana by Mana Shield.
    pub absorbed: u32,
}

/// What stopped an incoming hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DodgeSource {
    /// One-shot dodge flag.
    Shadow,
    /// Multi-use dodge charge.
    Charge,
    /// Probabilistic dodge.
    Evasion,
    /// Full block.
    Aegis,
}

#[derive(Clone, Copy, Debug)]
pub struct PassiveResolver<'a> {
    config: &'a BattleConfig,
}

fn fired(step: PassiveStep) {
    tracing::debug!(passive = %step, "passive fired");
}

impl<'a> PassiveResolver<'a> {
    pub fn new(config: &'a BattleConfig) -> Self {
        Self { config }
    }

    /// Lifesteal after Eternal Hunger (×1.5) and then Lich Form (×2).
    pub fn amplify_lifesteal(session: &BattleSession, amount: u32) -> u32 {
        let mut amount = amount;
        if session.passives.has(PassiveKind::EternalHunger) {
            amount = scale_damage(amount, 150);
        }
        if session.passives.has(PassiveKind::LichForm) {
            amount = amount.saturating_mul(2);
        }
        amount
    }

    fn lifesteal(
        session: &mut BattleSession,
        step: PassiveStep,
        damage: u32,
        pct: u32,
        label: &str,
    ) {
        let amount = Self::amplify_lifesteal(session, scale_damage(damage, pct));
        if amount > 0 && session.player.hp < session.limits.max_hp {
            let healed = session.heal_player(amount);
            session.log.push(LogKind::Heal, format!("{label} heals {healed} HP!"));
            fired(step);
        }
    }

    fn soul_siphon(session: &mut BattleSession, dice: &mut Dice<'_>) {
        if session.passives.has(PassiveKind::SoulSiphon) && dice.chance(Roll::SoulSiphon, 25) {
            session.restore_mana(5);
            session.log.push(LogKind::Heal, "Soul Siphon restores 5 mana!");
            fired(PassiveStep::SoulSiphon);
        }
    }

    fn bloodlust(session: &mut BattleSession, damage: u32) {
        if session.passives.has(PassiveKind::Bloodlust)
            && below_pct(session.player.hp, session.limits.max_hp, 30)
        {
            Self::lifesteal(session, PassiveStep::Bloodlust, damage, 20, "Bloodlust");
        }
    }

    fn vampiric_aura(session: &mut BattleSession, damage: u32) {
        if session.passives.has(PassiveKind::VampiricAura) {
            Self::lifesteal(session, PassiveStep::VampiricAura, damage, 10, "Vampiric Aura");
        }
    }

    /// After a normal attack dealt `damage`.
    pub fn post_attack(&self, session: &mut BattleSession, dice: &mut Dice<'_>, damage: u32) {
        for &step in PassiveHook::PostAttack.order() {
            match step {
                PassiveStep::Lifetap => {
                    if session.passives.has(PassiveKind::Lifetap) {
                        Self::lifesteal(session, step, damage, 15, "Lifetap");
                    }
                }
                PassiveStep::VampiricAura => Self::vampiric_aura(session, damage),
                PassiveStep::SoulSiphon => Self::soul_siphon(session, dice),
                PassiveStep::Bloodlust => Self::bloodlust(session, damage),
                PassiveStep::AdrenalineRush => {
                    if session.passives.has(PassiveKind::AdrenalineRush) {
                        session.restore_mana(3);
                        fired(step);
                    }
                }
                PassiveStep::NecroticTouch => {
                    if session.passives.has(PassiveKind::NecroticTouch)
                        && session.monster.defense > 0
                    {
                        session.monster.defense -= 1;
                        fired(step);
                    }
                }
                PassiveStep::Opportunist => {
                    if session.passives.has(PassiveKind::Opportunist)
                        && session.status.monster_poison > 0
                    {
                        let bonus = session.monster.take_damage(scale_damage(damage, 15));
                        if bonus > 0 {
                            let text = format!("Opportunist bonus: {bonus} damage!");
                            session.log.push(LogKind::MonsterDamage, text);
                            fired(step);
                        }
                    }
                }
                PassiveStep::SpellweaverFade => session.flags.spellweaver = false,
                _ => {}
            }
        }
    }

    /// After a skill hit dealt `damage`.
    pub fn post_skill(&self, session: &mut BattleSession, dice: &mut Dice<'_>, damage: u32) {
        for &step in PassiveHook::PostSkill.order() {
            match step {
                PassiveStep::VampiricAura => Self::vampiric_aura(session, damage),
                PassiveStep::Bloodlust => Self::bloodlust(session, damage),
                PassiveStep::SoulSiphon => Self::soul_siphon(session, dice),
                _ => {}
            }
        }
    }

    /// Regeneration ticks and Dark Pact.
    pub fn turn_start(&self, session: &mut BattleSession) {
        for &step in PassiveHook::TurnStart.order() {
            match step {
                PassiveStep::Regeneration => {
                    if session.passives.has(PassiveKind::Regeneration)
                        && session.player.hp < session.limits.max_hp
                    {
                        let healed = session.heal_player(scale_damage(session.limits.max_hp, 3));
                        session
                            .log
                            .push(LogKind::Heal, format!("Regeneration heals {healed} HP!"));
                        fired(step);
                    }
                }
                PassiveStep::Meditation => {
                    if session.passives.has(PassiveKind::Meditation) {
                        session.restore_mana(4);
                        session.log.push(LogKind::Heal, "Meditation restores 4 mana!");
                        fired(step);
                    }
                }
                PassiveStep::ManaRegeneration => {
                    if session.passives.has(PassiveKind::ManaRegeneration) {
                        let amount = scale_damage(session.limits.max_mana, 8);
                        session.restore_mana(amount);
                        session
                            .log
                            .push(LogKind::Heal, format!("Mana Regen restores {amount} mana!"));
                        fired(step);
                    }
                }
                PassiveStep::DarkPact => {
                    if session.passives.has(PassiveKind::DarkPact) {
                        let sacrifice = scale_damage(session.player.max_hp, 5);
                        session.player.hp = session.player.hp.saturating_sub(sacrifice).max(1);
                        let text = format!("Dark Pact drains {sacrifice} HP!");
                        session.log.push(LogKind::PlayerDamage, text);
                        fired(step);
                    }
                }
                _ => {}
            }
        }
    }

    /// Percent of incoming damage kept while defending.
    pub fn defend_keep_pct(&self, session: &BattleSession) -> u32 {
        if session.passives.has(PassiveKind::Bulwark) {
            15
        } else if session.passives.has(PassiveKind::Fortify) {
            30
        } else {
            self.config.defend_keep_pct
        }
    }

    /// Reduces `raw` monster damage; Mana Shield pays part of it with mana.
    pub fn damage_taken(&self, session: &mut BattleSession, raw: u32) -> IncomingHit {
        let mut reductions = BonusStack::new();
        let mut damage = raw;
        let mut absorbed = 0;

        for &step in PassiveHook::DamageTaken.order() {
            match step {
                PassiveStep::DefendBlock => {
                    if session.flags.defending {
                        let keep = self.defend_keep_pct(session).min(100);
                        reductions = reductions.less(100 - keep as i64);
                    }
                }
                PassiveStep::IronSkin => {
                    if session.passives.has(PassiveKind::IronSkin) {
                        reductions = reductions.less(10);
                    }
                }
                PassiveStep::ThickSkin => {
                    if session.passives.has(PassiveKind::ThickSkin) {
                        reductions = reductions.less(8);
                    }
                }
                PassiveStep::Fortress => {
                    if session.passives.has(PassiveKind::Fortress) {
                        reductions = reductions.less(20);
                    }
                }
                PassiveStep::MinimumHit => {
                    damage = reductions.apply(raw as i64, 1, u32::MAX as i64) as u32;
                }
                PassiveStep::ManaShield => {
                    if session.passives.has(PassiveKind::ManaShield) && session.player.mana > 0 {
                        let rate = if session.passives.has(PassiveKind::Transcendence) {
                            40
                        } else {
                            20
                        };
                        absorbed = scale_damage(damage, rate).min(session.player.mana);
                        if absorbed > 0 {
                            damage -= absorbed;
                            session.player.mana -= absorbed;
                            let text = format!("Mana Shield absorbs {absorbed} damage!");
                            session.log.push(LogKind::Info, text);
                            fired(step);
                        }
                    }
                }
                _ => {}
            }
        }

        IncomingHit { damage, absorbed }
    }

    /// Returns what stopped the hit, if anything. The first success wins.
    pub fn dodge_check(
        &self,
        session: &mut BattleSession,
        dice: &mut Dice<'_>,
    ) -> Option<DodgeSource> {
        for &step in PassiveHook::DodgeCheck.order() {
            let source = match step {
                PassiveStep::DodgeNext => session
                    .status
                    .take_dodge_next()
                    .then_some(DodgeSource::Shadow),
                PassiveStep::DodgeCharge => session
                    .status
                    .take_dodge_charge()
                    .then_some(DodgeSource::Charge),
                PassiveStep::Evasion => {
                    let chance = StatCalculator::for_session(session).dodge_permille();
                    (chance > 0 && dice.chance_permille(Roll::Evasion, chance))
                        .then_some(DodgeSource::Evasion)
                }
                PassiveStep::Aegis => (session.passives.has(PassiveKind::Aegis)
                    && dice.chance(Roll::Aegis, 15))
                .then_some(DodgeSource::Aegis),
                _ => None,
            };

            if let Some(source) = source {
                let text = match source {
                    DodgeSource::Shadow | DodgeSource::Charge => {
                        "You dodge the attack from the shadows!"
                    }
                    DodgeSource::Evasion => "You dodge the attack!",
                    DodgeSource::Aegis => "Aegis fully blocks the attack!",
                };
                session.log.push(LogKind::Info, text);
                fired(step);
                return Some(source);
            }
        }
        None
    }

    /// After monster damage landed.
    pub fn on_hit(&self, session: &mut BattleSession, dice: &mut Dice<'_>) {
        for &step in PassiveHook::OnHit.order() {
            if step == PassiveStep::CursedBlood
                && session.passives.has(PassiveKind::CursedBlood)
                && dice.chance(Roll::CursedBlood, 20)
            {
                session.status.raise_monster_poison(2);
                let name = &session.monster_info.name;
                let text = format!("Cursed Blood poisons {name}!");
                session.log.push(LogKind::Info, text);
                fired(step);
            }
        }
    }

    /// Once-per-battle survival passives.
    pub fn survival_check(&self, session: &mut BattleSession) {
        for &step in PassiveHook::SurvivalCheck.order() {
            match step {
                PassiveStep::UndyingWill => {
                    if session.player.hp == 0
                        && session.passives.has(PassiveKind::UndyingWill)
                        && !session.flags.undying_will_used
                    {
                        session.player.hp = 1;
                        session.flags.undying_will_used = true;
                        session.log.push(LogKind::Heal, "Undying Will! You survive at 1 HP!");
                        fired(step);
                    }
                }
                PassiveStep::DeathsEmbrace => {
                    if session.passives.has(PassiveKind::DeathsEmbrace)
                        && !session.flags.deaths_embrace_used
                        && session.player.hp > 0
                        && below_pct(session.player.hp, session.limits.max_hp, 25)
                    {
                        let healed = session.heal_player(scale_damage(session.limits.max_hp, 15));
                        session.flags.deaths_embrace_used = true;
                        session
                            .log
                            .push(LogKind::Heal, format!("Death's Embrace heals {healed} HP!"));
                        fired(step);
                    }
                }
                _ => {}
            }
        }
    }
}
