pub mod combat;
pub mod config;
pub mod effects;
pub mod engine;
pub mod env;
pub mod error;
pub mod passives;
pub mod progression;
pub mod skills;
pub mod state;
pub mod stats;

#[cfg(test)]
mod test_support;

pub use combat::{DamageModifier, DefenseMode, Execute, calc_damage, scale_damage};
pub use config::BattleConfig;
pub use effects::{
    EffectContext, EffectHandler, EffectLimits, EffectRegistry, EffectUpdate, SkillEffect,
};
pub use engine::{
    ActionError, BattleEngine, BattleOutcome, BattleReward, BattleTransition, PlayerCommand,
    Settlement, SkillRef, TransitionPhase,
};
pub use env::{
    BattleEnv, ContentBundle, ContentOracle, Dice, OracleError, PcgRng, RngOracle, Roll,
    compute_seed,
};
pub use error::{BattleError, ErrorSeverity};
pub use passives::{DodgeSource, IncomingHit, PassiveHook, PassiveResolver, PassiveStep};
pub use progression::{LevelUp, exp_for_level, gain_experience};
pub use skills::{
    ActiveSkill, ClassDefinition, MonsterSkill, MonsterSkillEffect, PassiveKind, PassiveSet,
    SkillDefinition, SkillId, SkillKind, SkillSelection, SkillTier, SkillTree, UnlockError,
};
pub use state::{
    Attribute, Attributes, BattleFlags, BattleLimits, BattleLog, BattleSession, ClassId,
    Equipment, EquipmentSlot, Inventory, Item, ItemKind, LogEntry, LogKind, MonsterDescriptor,
    MonsterState, Phase, PickupOutcome, PlayerRecord, PlayerVitals, StatusBlock,
};
pub use stats::{BonusStack, CombatStats, StatCalculator};
