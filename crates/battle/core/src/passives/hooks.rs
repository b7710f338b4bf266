use strum::{Display, EnumIter, IntoStaticStr};

/// Lifecycle points at which passives resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, IntoStaticStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum PassiveHook {
    /// After a normal attack lands.
    PostAttack,
    /// After a skill hit lands.
    PostSkill,
    /// Start of the monster turn, after damage over time on the monster.
    TurnStart,
    /// Incoming monster damage, before HP is subtracted.
    DamageTaken,
    /// Before the monster hit is computed.
    DodgeCheck,
    /// After monster damage lands.
    OnHit,
    /// After all damage of the monster turn has resolved.
    SurvivalCheck,
}

/// One ordered step of a hook pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum PassiveStep {
    // post attack / post skill
    Lifetap,
    VampiricAura,
    SoulSiphon,
    Bloodlust,
    AdrenalineRush,
    NecroticTouch,
    Opportunist,
    SpellweaverFade,

    // turn start
    Regeneration,
    Meditation,
    ManaRegeneration,
    DarkPact,

    // damage taken
    DefendBlock,
    IronSkin,
    ThickSkin,
    Fortress,
    MinimumHit,
    ManaShield,

    // dodge check
    DodgeNext,
    DodgeCharge,
    Evasion,
    Aegis,

    // on hit
    CursedBlood,

    // survival check
    UndyingWill,
    DeathsEmbrace,
}

use PassiveStep::*;

const POST_ATTACK: &[PassiveStep] = &[
    Lifetap,
    VampiricAura,
    SoulSiphon,
    Bloodlust,
    AdrenalineRush,
    NecroticTouch,
    Opportunist,
    SpellweaverFade,
];
const POST_SKILL: &[PassiveStep] = &[VampiricAura, Bloodlust, SoulSiphon];
const TURN_START: &[PassiveStep] = &[Regeneration, Meditation, ManaRegeneration, DarkPact];
const DAMAGE_TAKEN: &[PassiveStep] = &[
    DefendBlock,
    IronSkin,
    ThickSkin,
    Fortress,
    MinimumHit,
    ManaShield,
];
const DODGE_CHECK: &[PassiveStep] = &[DodgeNext, DodgeCharge, Evasion, Aegis];
const ON_HIT: &[PassiveStep] = &[CursedBlood];
const SURVIVAL_CHECK: &[PassiveStep] = &[UndyingWill, DeathsEmbrace];

impl PassiveHook {
    /// Resolution order of the hook. This order is the stacking contract.
    pub fn order(self) -> &'static [PassiveStep] {
        match self {
            PassiveHook::PostAttack => POST_ATTACK,
            PassiveHook::PostSkill => POST_SKILL,
            PassiveHook::TurnStart => TURN_START,
            PassiveHook::DamageTaken => DAMAGE_TAKEN,
            PassiveHook::DodgeCheck => DODGE_CHECK,
            PassiveHook::OnHit => ON_HIT,
            PassiveHook::SurvivalCheck => SURVIVAL_CHECK,
        }
    }
}
