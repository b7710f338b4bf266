//! Built-in skill effects.
//!
//! [`SkillEffect`] is the closed set of effect shapes the engine knows. The
//! registry maps content names onto parameterised variants, so adding a
//! skill that reuses a shape is pure data.

use super::{EffectContext, EffectHandler, EffectUpdate};
use crate::combat::scale_damage;
use crate::state::{LogKind, MonsterState, PlayerVitals};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillEffect {
    // ========================================================================
    // Self
    // ========================================================================
    /// Self-damage, a share of the permanent max HP. Never drops HP below 1.
    Recoil { pct: u32 },
    /// Heal a share of the damage just dealt.
    HealOnHit { pct: u32 },
    /// Heal a share of the battle max HP.
    HealBattleMax { pct: u32 },
    /// Heal a share of the damage dealt and take recoil in one step.
    BloodNova { heal_pct: u32, recoil_pct: u32 },
    RestoreMana { amount: u32 },
    /// Refund a share of the mana spent on the skill.
    RefundMana { pct: u32 },

    // ========================================================================
    // Enemy debuffs
    // ========================================================================
    /// Lower monster attack by `pct` of its current value (at least 1, floor 1).
    WeakenAttack { pct: u32 },
    /// Lower monster defense by `pct` of its current value (at least 1, floor 0).
    WeakenDefense { pct: u32 },

    // ========================================================================
    // Damage over time
    // ========================================================================
    Poison { turns: u32 },
    Doom { turns: u32 },
    /// Extra damage when the monster is already poisoned.
    BonusVsPoisoned { pct: u32 },

    // ========================================================================
    // Battle buffs
    // ========================================================================
    DodgeNext,
    DodgeCharges { charges: u32 },
    ArmorBreak { turns: u32 },
    Avatar { turns: u32 },

    // ========================================================================
    // Composition
    // ========================================================================
    /// Runs each effect in order, each one seeing the previous result.
    Compound(Vec<SkillEffect>),
    /// Optional narration only. Used for names whose work happens in the
    /// damage formula (pierce, execute, counter...).
    Announce(Option<String>),
}

fn reduce_stat(value: u32, pct: u32, floor: u32) -> (u32, u32) {
    let reduction = scale_damage(value, pct).max(1);
    let reduced = value.saturating_sub(reduction).max(floor);
    (reduced, reduction)
}

impl SkillEffect {
    pub fn compound(effects: impl IntoIterator<Item = SkillEffect>) -> Self {
        SkillEffect::Compound(effects.into_iter().collect())
    }

    pub fn resolve(&self, ctx: &EffectContext) -> EffectUpdate {
        let player = ctx.player;
        let monster = ctx.monster;
        let mut status = ctx.status;

        match self {
            SkillEffect::Recoil { pct } => {
                let recoil = scale_damage(ctx.limits.max_hp, *pct);
                let hp = player.hp.saturating_sub(recoil).max(1);
                EffectUpdate::none()
                    .with_player(PlayerVitals { hp, ..player })
                    .logged(LogKind::PlayerDamage, format!("Recoil deals {recoil} damage to you!"))
            }
            SkillEffect::HealOnHit { pct } => {
                let amount = scale_damage(ctx.damage, *pct);
                EffectUpdate::none()
                    .with_player(ctx.heal(player, amount))
                    .logged(LogKind::Heal, format!("Drained {amount} HP!"))
            }
            SkillEffect::HealBattleMax { pct } => {
                let amount = scale_damage(ctx.limits.battle_max_hp, *pct);
                EffectUpdate::none()
                    .with_player(ctx.heal(player, amount))
                    .logged(LogKind::Heal, format!("You recover {amount} HP!"))
            }
            SkillEffect::BloodNova {
                heal_pct,
                recoil_pct,
            } => {
                let heal = scale_damage(ctx.damage, *heal_pct);
                let recoil = scale_damage(ctx.limits.max_hp, *recoil_pct);
                let hp = (player.hp.saturating_add(heal).saturating_sub(recoil))
                    .max(1)
                    .min(ctx.limits.battle_max_hp.max(player.hp));
                EffectUpdate::none()
                    .with_player(PlayerVitals { hp, ..player })
                    .logged(LogKind::Info, format!("Blood Nova heals {heal}, recoil {recoil}!"))
            }
            SkillEffect::RestoreMana { amount } => EffectUpdate::none()
                .with_player(ctx.restore_mana(player, *amount))
                .logged(LogKind::Heal, format!("Restored {amount} mana!")),
            SkillEffect::RefundMana { pct } => {
                let refund = scale_damage(ctx.mana_spent, *pct);
                EffectUpdate::none()
                    .with_player(ctx.restore_mana(player, refund))
                    .logged(LogKind::Heal, format!("Refunded {refund} mana!"))
            }
            SkillEffect::WeakenAttack { pct } => {
                let (attack, reduction) = reduce_stat(monster.attack, *pct, 1);
                EffectUpdate::none()
                    .with_monster(MonsterState { attack, ..monster })
                    .logged(LogKind::Info, format!("Enemy ATK reduced by {reduction}!"))
            }
            SkillEffect::WeakenDefense { pct } => {
                let (defense, reduction) = reduce_stat(monster.defense, *pct, 0);
                EffectUpdate::none()
                    .with_monster(MonsterState { defense, ..monster })
                    .logged(LogKind::Info, format!("Enemy DEF reduced by {reduction}!"))
            }
            SkillEffect::Poison { turns } => {
                status.raise_monster_poison(*turns);
                EffectUpdate::none()
                    .with_status(status)
                    .logged(LogKind::Info, "Enemy is poisoned!")
            }
            SkillEffect::Doom { turns } => {
                status.raise_monster_doom(*turns);
                EffectUpdate::none()
                    .with_status(status)
                    .logged(LogKind::Info, "Doom! Enemy will take damage over time!")
            }
            SkillEffect::BonusVsPoisoned { pct } => {
                if status.monster_poison == 0 {
                    return EffectUpdate::none();
                }
                let mut monster = monster;
                let bonus = monster.take_damage(scale_damage(ctx.damage, *pct));
                EffectUpdate::none().with_monster(monster).logged(
                    LogKind::MonsterDamage,
                    format!("Corpse Explosion bonus! {bonus} extra damage!"),
                )
            }
            SkillEffect::DodgeNext => {
                status.dodge_next = true;
                EffectUpdate::none()
                    .with_status(status)
                    .logged(LogKind::Info, "You vanish into shadows! Dodge next attack!")
            }
            SkillEffect::DodgeCharges { charges } => {
                status.grant_dodge_charges(*charges);
                EffectUpdate::none().with_status(status).logged(
                    LogKind::Info,
                    format!("You vanish into shadows! Dodge next {charges} attacks!"),
                )
            }
            SkillEffect::ArmorBreak { turns } => {
                status.armor_break_turns = status.armor_break_turns.max(*turns);
                EffectUpdate::none()
                    .with_status(status)
                    .logged(LogKind::Info, format!("Enemy DEF reduced to 0 for {turns} turns!"))
            }
            SkillEffect::Avatar { turns } => {
                status.avatar_turns = status.avatar_turns.max(*turns);
                EffectUpdate::none()
                    .with_status(status)
                    .logged(LogKind::Info, format!("Avatar of War! DEF +50% for {turns} turns!"))
            }
            SkillEffect::Compound(effects) => {
                effects
                    .iter()
                    .fold((EffectUpdate::none(), *ctx), |(acc, ctx), effect| {
                        let update = effect.resolve(&ctx);
                        let next_ctx = ctx.after(&update);
                        (acc.merge(update), next_ctx)
                    })
                    .0
            }
            SkillEffect::Announce(text) => match text {
                Some(text) => EffectUpdate::none().logged(LogKind::Info, text.clone()),
                None => EffectUpdate::none(),
            },
        }
    }
}

impl EffectHandler for SkillEffect {
    fn apply(&self, ctx: &EffectContext) -> EffectUpdate {
        self.resolve(ctx)
    }
}

/// Name → effect table registered by [`super::EffectRegistry::builtin`].
pub fn builtin_effects() -> Vec<(&'static str, SkillEffect)> {
    use SkillEffect::*;

    let announce = |text: &str| Announce(Some(text.to_owned()));
    vec![
        ("recoil_small", Recoil { pct: 5 }),
        ("recoil", Recoil { pct: 10 }),
        ("recoil_heavy", Recoil { pct: 20 }),
        ("recoil_extreme", Recoil { pct: 30 }),
        ("war_cry", WeakenAttack { pct: 25 }),
        ("weaken", WeakenAttack { pct: 15 }),
        ("weaken_15", WeakenAttack { pct: 15 }),
        ("freeze", WeakenAttack { pct: 20 }),
        ("frost_nova", WeakenAttack { pct: 30 }),
        ("cheap_shot", WeakenAttack { pct: 20 }),
        ("shred_def", WeakenDefense { pct: 40 }),
        ("quake", WeakenDefense { pct: 30 }),
        ("chain_lightning", WeakenDefense { pct: 25 }),
        (
            "blizzard",
            SkillEffect::compound([WeakenAttack { pct: 15 }, WeakenDefense { pct: 15 }]),
        ),
        (
            "wither",
            SkillEffect::compound([WeakenAttack { pct: 25 }, WeakenDefense { pct: 25 }]),
        ),
        ("apply_poison", Poison { turns: 3 }),
        ("apply_poison_short", Poison { turns: 2 }),
        ("strong_poison", Poison { turns: 4 }),
        ("strong_poison_3", Poison { turns: 3 }),
        ("doom", Doom { turns: 3 }),
        ("shadow_dance", DodgeNext),
        ("shadow_dance_2", DodgeCharges { charges: 2 }),
        ("phantom_blade", DodgeNext),
        ("final_stand", HealOnHit { pct: 30 }),
        ("soul_harvest", HealOnHit { pct: 60 }),
        ("drain", HealOnHit { pct: 40 }),
        ("full_drain", HealOnHit { pct: 100 }),
        ("army_drain", HealOnHit { pct: 40 }),
        ("rally_heal", HealBattleMax { pct: 20 }),
        ("heroic_mana", RestoreMana { amount: 5 }),
        ("mana_refund", RefundMana { pct: 50 }),
        ("armor_break", ArmorBreak { turns: 2 }),
        ("avatar", Avatar { turns: 3 }),
        (
            "blood_nova",
            BloodNova {
                heal_pct: 25,
                recoil_pct: 10,
            },
        ),
        (
            "nec_apocalypse",
            SkillEffect::compound([Doom { turns: 4 }, HealOnHit { pct: 30 }]),
        ),
        ("corpse_explode", BonusVsPoisoned { pct: 50 }),
        // resolved by the damage formula
        ("true_damage", Announce(None)),
        ("pierce", Announce(None)),
        ("pierce_20", Announce(None)),
        ("pierce_25", Announce(None)),
        ("pierce_30", Announce(None)),
        ("pierce_40", Announce(None)),
        ("pierce_50", Announce(None)),
        ("execute", Announce(None)),
        ("execute_25", Announce(None)),
        ("counter", Announce(None)),
        ("shield_slam", announce("Shield Slam! DEF adds to damage!")),
    ]
}
