//! Player commands: attack, skill, defend, use item, flee.

use super::command::{PlayerCommand, SkillRef};
use super::errors::ActionError;
use super::transition::BattleTransition;
use crate::combat::{DamageModifier, DefenseMode, calc_damage, scale_damage};
use crate::effects::{EffectContext, EffectLimits};
use crate::env::{BattleEnv, Dice, Roll};
use crate::passives::PassiveResolver;
use crate::skills::{ActiveSkill, PassiveKind, SkillDefinition};
use crate::state::{BattleSession, ItemKind, LogKind, Phase};
use crate::stats::{StatCalculator, effective_mana_cost, percent_of, skill_damage_bonus};

/// A player command bound to the session it is validated against.
pub(crate) struct PlayerAction<'c> {
    command: &'c PlayerCommand,
}

impl<'c> PlayerAction<'c> {
    pub(crate) fn new(command: &'c PlayerCommand) -> Self {
        Self { command }
    }
}

/// Looks up the active skill a command refers to.
///
/// Tree skills must be unlocked by the player; passives are never castable.
fn resolve_skill<'a>(
    session: &BattleSession,
    env: &BattleEnv<'a>,
    skill: &SkillRef,
) -> Result<(&'a SkillDefinition, &'a ActiveSkill), ActionError> {
    let definition = match skill {
        SkillRef::Class => &env.class(session.player.class)?.skill,
        SkillRef::Tree(id) => {
            if !session.player.skills.contains(id) {
                return Err(ActionError::UnknownSkill(id.clone()));
            }
            env.skill_tree(session.player.class)?
                .skill(id)
                .ok_or_else(|| ActionError::UnknownSkill(id.clone()))?
        }
    };
    let active = definition
        .as_active()
        .ok_or_else(|| ActionError::UnknownSkill(definition.id.clone()))?;
    Ok((definition, active))
}

/// Heal and energy of the consumable at `index`, after Quick Hands.
fn consumable(session: &BattleSession, index: usize) -> Result<(u32, u32), ActionError> {
    let item = session
        .player
        .inventory
        .get(index)
        .ok_or(ActionError::NoSuchItem(index))?;
    match item.kind {
        ItemKind::Consumable { heal, energy } => {
            let heal = if session.passives.has(PassiveKind::QuickHands) {
                scale_damage(heal, 130)
            } else {
                heal
            };
            Ok((heal, energy))
        }
        ItemKind::Gear { .. } => Err(ActionError::NotConsumable(index)),
    }
}

impl BattleTransition for PlayerAction<'_> {
    fn pre_validate(
        &self,
        session: &BattleSession,
        env: &BattleEnv<'_>,
    ) -> Result<(), ActionError> {
        if session.is_over() {
            return Err(ActionError::BattleOver);
        }
        if session.phase != Phase::PlayerTurn {
            return Err(ActionError::NotPlayerTurn);
        }

        match self.command {
            PlayerCommand::Skill(skill) => {
                let (_, active) = resolve_skill(session, env, skill)?;
                let required = effective_mana_cost(active.mana_cost, session.passives);
                if required > session.player.mana {
                    return Err(ActionError::InsufficientMana {
                        required,
                        available: session.player.mana,
                    });
                }
            }
            PlayerCommand::UseItem(index) => {
                let (heal, energy) = consumable(session, *index)?;
                let heals = heal > 0 && session.player.hp < session.limits.max_hp;
                let restores = energy > 0 && session.player.mana < session.limits.max_mana;
                if !heals && !restores {
                    return Err(ActionError::AlreadyFull);
                }
            }
            PlayerCommand::Flee => {
                if session.is_boss() {
                    return Err(ActionError::FleeDisallowed);
                }
            }
            PlayerCommand::Attack | PlayerCommand::Defend => {}
        }
        Ok(())
    }

    fn apply(
        &self,
        session: &mut BattleSession,
        dice: &mut Dice<'_>,
        env: &BattleEnv<'_>,
    ) -> Result<(), ActionError> {
        match self.command {
            PlayerCommand::Attack => attack(session, dice, env),
            PlayerCommand::Skill(skill) => cast(session, dice, env, skill)?,
            PlayerCommand::Defend => defend(session),
            PlayerCommand::UseItem(index) => use_item(session, *index)?,
            PlayerCommand::Flee => flee(session, dice, env),
        }

        if session.is_over() {
            return Ok(());
        }
        if !session.monster.is_alive() {
            declare_victory(session);
        } else {
            session.phase = Phase::MonsterTurn;
        }
        Ok(())
    }
}

fn attack(session: &mut BattleSession, dice: &mut Dice<'_>, env: &BattleEnv<'_>) {
    let config = env.config();
    let attack = StatCalculator::for_session(session).attack();

    let mut damage = calc_damage(
        attack,
        session.monster_defense(),
        DefenseMode::Full,
        dice.variance(config),
    );
    if session.passives.has(PassiveKind::LuckyStrike) && dice.chance(Roll::LuckyStrike, 20) {
        damage = damage.saturating_mul(2);
        session.log.push(LogKind::Info, "Lucky Strike! Double damage!");
    }
    session.monster.take_damage(damage);
    session
        .log
        .push(LogKind::MonsterDamage, format!("You attack for {damage} damage!"));

    let mut total = damage;
    if session.passives.has(PassiveKind::BladeDance)
        && session.monster.is_alive()
        && dice.chance(Roll::BladeDance, 10)
    {
        let second = calc_damage(
            attack,
            session.monster_defense(),
            DefenseMode::Full,
            dice.variance(config),
        );
        session.monster.take_damage(second);
        session.log.push(
            LogKind::MonsterDamage,
            format!("Blade Dance! You strike again for {second} damage!"),
        );
        total = total.saturating_add(second);
    }
    wear_armor_break(session);

    PassiveResolver::new(config).post_attack(session, dice, total);
}

fn cast(
    session: &mut BattleSession,
    dice: &mut Dice<'_>,
    env: &BattleEnv<'_>,
    skill: &SkillRef,
) -> Result<(), ActionError> {
    let (definition, active) = resolve_skill(session, env, skill)?;
    let config = env.config();

    // Stats are read before the mana payment so Arcane Overflow sees the full pool.
    let calc = StatCalculator::for_session(session);
    let base_attack = calc.attack();
    let player_defense = calc.defense();

    let cost = effective_mana_cost(active.mana_cost, session.passives);
    session.player.mana = session.player.mana.saturating_sub(cost);
    if session.passives.has(PassiveKind::ManaTap) && cost > 0 {
        let healed = session.heal_player(percent_of(cost, 50));
        if healed > 0 {
            session
                .log
                .push(LogKind::Heal, format!("Life Tap heals {healed} HP!"));
        }
    }

    let effect = active.effect.as_deref();
    let modifier = DamageModifier::for_effect(effect);

    let mut attack = base_attack;
    if modifier.shield_slam {
        attack = attack.saturating_add(player_defense);
    }
    let mut multiplier = active.multiplier_pct;
    if modifier.counter && session.flags.defended_last_turn {
        multiplier = scale_damage(multiplier, DamageModifier::COUNTER_BONUS_PCT);
        session.log.push(LogKind::Info, "Counter Strike! Bonus damage!");
    }
    attack = scale_damage(attack, multiplier);
    attack = skill_damage_bonus(session.passives).apply_u32(attack, 1);
    if let Some(execute) = modifier.execute {
        let pct = execute.multiplier_for(session.monster.hp, session.monster.max_hp);
        attack = scale_damage(attack, pct);
    }

    let mut damage = calc_damage(
        attack,
        session.monster_defense(),
        modifier.defense,
        dice.variance(config),
    );
    if session.passives.has(PassiveKind::SpellEcho) && dice.chance(Roll::SpellEcho, 20) {
        damage = damage.saturating_mul(2);
        session.log.push(LogKind::Info, "Spell Echo! Double damage!");
    }
    session.monster.take_damage(damage);
    session.log.push(
        LogKind::MonsterDamage,
        format!("{} deals {damage} damage!", definition.name),
    );
    wear_armor_break(session);

    if let Some(name) = effect {
        let ctx = EffectContext {
            damage,
            mana_spent: cost,
            player: session.player.vitals(),
            monster: session.monster,
            status: session.status,
            limits: EffectLimits {
                max_hp: session.player.max_hp,
                max_mana: session.player.max_mana,
                battle_max_hp: session.limits.max_hp,
                battle_max_mana: session.limits.max_mana,
            },
        };
        let update = env.effects().resolve(name, &ctx);
        if let Some(vitals) = update.player {
            session.player.set_vitals(vitals);
        }
        if let Some(monster) = update.monster {
            session.monster = monster;
        }
        if let Some(status) = update.status {
            session.status = status;
        }
        session.log.extend(update.log);
    }

    PassiveResolver::new(config).post_skill(session, dice, damage);
    if session.passives.has(PassiveKind::Spellweaver) {
        session.flags.spellweaver = true;
    }
    tracing::debug!(skill = %definition.id, damage, cost, "skill cast");
    Ok(())
}

/// Armor break counts down once per player hit that used it; a fresh cast
/// applies its own armor break afterwards.
fn wear_armor_break(session: &mut BattleSession) {
    if session.status.tick_armor_break() {
        let text = format!("{}'s armor recovers.", session.monster_info.name);
        session.log.push(LogKind::Info, text);
    }
}

fn defend(session: &mut BattleSession) {
    session.flags.defending = true;
    session.log.push(LogKind::Info, "You brace for impact!");
    if session.passives.has(PassiveKind::ArcaneBarrier) {
        let restored = session.restore_mana(10);
        session
            .log
            .push(LogKind::Heal, format!("Arcane Barrier restores {restored} mana!"));
    }
}

fn use_item(session: &mut BattleSession, index: usize) -> Result<(), ActionError> {
    let (heal, energy) = consumable(session, index)?;
    let item = session
        .player
        .inventory
        .take(index)
        .ok_or(ActionError::NoSuchItem(index))?;

    let healed = session.heal_player(heal);
    let restored = session.restore_mana(energy);
    let text = match (healed, restored) {
        (0, restored) => format!("Used {}, restored {restored} mana!", item.name),
        (healed, 0) => format!("Used {}, healed {healed} HP!", item.name),
        (healed, restored) => format!(
            "Used {}, healed {healed} HP and restored {restored} mana!",
            item.name
        ),
    };
    session.log.push(LogKind::Heal, text);
    Ok(())
}

fn flee(session: &mut BattleSession, dice: &mut Dice<'_>, env: &BattleEnv<'_>) {
    let chance = if session.passives.has(PassiveKind::Slippery) {
        100
    } else if session.passives.has(PassiveKind::Nimble) {
        75
    } else {
        env.config().flee_chance_pct
    };

    if dice.chance(Roll::Flee, chance) {
        session.phase = Phase::Fled;
        session.log.push(LogKind::Info, "You escaped the battle...");
        tracing::debug!(chance, "fled");
    } else {
        session.log.push(LogKind::Info, "Failed to escape!");
    }
}

/// Ends the battle in the player's favour; Bloodbath heals on the kill.
pub(crate) fn declare_victory(session: &mut BattleSession) {
    if session.passives.has(PassiveKind::Bloodbath) {
        let healed = session.heal_player(scale_damage(session.limits.max_hp, 5));
        if healed > 0 {
            session
                .log
                .push(LogKind::Heal, format!("Bloodbath heals {healed} HP!"));
        }
    }
    let text = format!("You defeated the {}!", session.monster_info.name);
    session.log.push(LogKind::Victory, text);
    session.phase = Phase::Victory;
}
