//! The monster's automated turn.
//!
//! Order: damage over time on the monster, turn-start passives, dodge check,
//! the strike itself with its skill effect, player poison, survival passives,
//! then the avatar buff ticks.

use super::errors::ActionError;
use super::player_turn::declare_victory;
use super::transition::BattleTransition;
use crate::combat::{DefenseMode, calc_damage, scale_damage};
use crate::env::{BattleEnv, Dice, Roll};
use crate::passives::PassiveResolver;
use crate::skills::{MonsterSkill, MonsterSkillEffect, PassiveKind};
use crate::state::{BattleSession, LogKind, Phase};
use crate::stats::StatCalculator;

pub(crate) struct MonsterTurn;

impl BattleTransition for MonsterTurn {
    fn pre_validate(
        &self,
        session: &BattleSession,
        _env: &BattleEnv<'_>,
    ) -> Result<(), ActionError> {
        if session.is_over() {
            return Err(ActionError::BattleOver);
        }
        if session.phase != Phase::MonsterTurn {
            return Err(ActionError::NotMonsterTurn);
        }
        Ok(())
    }

    fn apply(
        &self,
        session: &mut BattleSession,
        dice: &mut Dice<'_>,
        env: &BattleEnv<'_>,
    ) -> Result<(), ActionError> {
        let config = env.config();
        let resolver = PassiveResolver::new(config);

        if tick_monster_dots(session, env) {
            declare_victory(session);
            return Ok(());
        }

        resolver.turn_start(session);

        if resolver.dodge_check(session, dice).is_none() {
            strike(session, dice, env, &resolver);
        }

        tick_player_poison(session, env);
        resolver.survival_check(session);

        // Avatar covers this turn's strike before it wears off.
        if session.status.tick_avatar() {
            session.log.push(LogKind::Info, "Avatar of War fades.");
        }

        if session.player.is_alive() {
            session.phase = Phase::PlayerTurn;
        } else {
            let text = format!("You were defeated by the {}...", session.monster_info.name);
            session.log.push(LogKind::Defeat, text);
            session.phase = Phase::Defeat;
        }
        session.flags.defended_last_turn = session.flags.defending;
        session.flags.defending = false;
        session.round += 1;
        Ok(())
    }
}

/// Ticks poison then doom on the monster. Returns true if it died.
fn tick_monster_dots(session: &mut BattleSession, env: &BattleEnv<'_>) -> bool {
    let config = env.config();
    let max_hp = session.monster.max_hp;

    if let Some(damage) = session.status.tick_monster_poison(max_hp, config.monster_poison_pct) {
        let dealt = session.monster.take_damage(damage);
        let text = format!("{} takes {dealt} poison damage!", session.monster_info.name);
        session.log.push(LogKind::MonsterDamage, text);
        if !session.monster.is_alive() {
            return true;
        }
    }

    if let Some(damage) = session.status.tick_monster_doom(max_hp, config.monster_doom_pct) {
        let dealt = session.monster.take_damage(damage);
        let text = format!("{} takes {dealt} doom damage!", session.monster_info.name);
        session.log.push(LogKind::MonsterDamage, text);
    }

    !session.monster.is_alive()
}

/// Picks one of the monster's declared skills, or `None` for a plain attack.
fn choose_skill<'a>(
    session: &BattleSession,
    dice: &mut Dice<'_>,
    env: &BattleEnv<'a>,
) -> Option<&'a MonsterSkill> {
    let skills = &session.monster_info.skills;
    let chance = env.config().monster_skill_chance_pct;
    if skills.is_empty() || !dice.chance(Roll::MonsterSkill, chance) {
        return None;
    }
    let last = (skills.len() - 1) as u32;
    let id = skills.get(dice.range(Roll::MonsterSkillPick, 0, last) as usize)?;
    let skill = env.content().monster_skill(id);
    if skill.is_none() {
        tracing::warn!(
            skill = %id,
            monster = %session.monster_info.name,
            "unknown monster skill, attacking instead"
        );
    }
    skill
}

fn strike(
    session: &mut BattleSession,
    dice: &mut Dice<'_>,
    env: &BattleEnv<'_>,
    resolver: &PassiveResolver<'_>,
) {
    let config = env.config();
    let skill = choose_skill(session, dice, env);

    let attack = match skill {
        Some(skill) => scale_damage(session.monster.attack, skill.multiplier_pct),
        None => session.monster.attack,
    };
    let defense = StatCalculator::for_session(session).defense();
    let raw = calc_damage(attack, defense, DefenseMode::Full, dice.variance(config));

    let hit = resolver.damage_taken(session, raw);
    session.player.hp = session.player.hp.saturating_sub(hit.damage);

    let name = session.monster_info.name.clone();
    let text = match skill {
        Some(skill) => format!("{name} uses {} for {} damage!", skill.name, hit.damage),
        None => format!("{name} attacks for {} damage!", hit.damage),
    };
    session.log.push(LogKind::PlayerDamage, text);

    if let Some(effect) = skill.and_then(|skill| skill.effect) {
        apply_skill_effect(session, dice, env, effect, hit.damage);
    }

    resolver.on_hit(session, dice);
}

fn apply_skill_effect(
    session: &mut BattleSession,
    dice: &mut Dice<'_>,
    env: &BattleEnv<'_>,
    effect: MonsterSkillEffect,
    damage: u32,
) {
    let config = env.config();
    let tenacity = u32::from(session.passives.has(PassiveKind::Tenacity));
    let debuff_step = config.enemy_debuff_step.saturating_sub(tenacity);
    let name = session.monster_info.name.clone();

    match effect {
        MonsterSkillEffect::Poison => {
            if session.passives.has(PassiveKind::LichForm) {
                session.log.push(LogKind::Info, "Lich Form: immune to poison!");
            } else {
                let turns = config.enemy_poison_turns.saturating_sub(tenacity);
                if turns > 0 {
                    session.status.raise_player_poison(turns);
                    session.log.push(LogKind::Info, "You have been poisoned!");
                }
            }
        }
        MonsterSkillEffect::LowerDefense => {
            if debuff_step > 0 {
                let debuff = &mut session.status.defense_debuff;
                *debuff = debuff.saturating_add(debuff_step);
                session.log.push(LogKind::Info, "Your defense was lowered!");
            }
        }
        MonsterSkillEffect::LowerAttack => {
            if debuff_step > 0 {
                let debuff = &mut session.status.attack_debuff;
                *debuff = debuff.saturating_add(debuff_step);
                session.log.push(LogKind::Info, "Your attack was lowered!");
            }
        }
        MonsterSkillEffect::StealGold => {
            let stolen = dice.range(Roll::StealGold, 1, 10).min(session.player.gold);
            if stolen > 0 {
                session.player.gold -= stolen;
                session
                    .log
                    .push(LogKind::Info, format!("{name} stole {stolen} gold!"));
            }
        }
        MonsterSkillEffect::Drain => {
            let before = session.monster.hp;
            session.monster.heal(scale_damage(damage, 50));
            let healed = session.monster.hp - before;
            if healed > 0 {
                session
                    .log
                    .push(LogKind::Info, format!("{name} drains {healed} HP!"));
            }
        }
    }
}

/// Poison on the player ticks against the permanent max HP.
fn tick_player_poison(session: &mut BattleSession, env: &BattleEnv<'_>) {
    let pct = env.config().player_poison_pct;
    let Some(damage) = session.status.tick_player_poison(session.player.max_hp, pct) else {
        return;
    };
    if session.passives.has(PassiveKind::LichForm) {
        return;
    }

    let hp = session.player.hp;
    let floor = u32::from(session.passives.has(PassiveKind::Indomitable) && hp > 0);
    session.player.hp = hp.saturating_sub(damage).max(floor);
    session
        .log
        .push(LogKind::PlayerDamage, format!("Poison deals {damage} damage!"));
}
