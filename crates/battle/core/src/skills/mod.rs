//! Skill, class and monster skill definitions.
//!
//! Everything here is pure data handed in by the content layer, plus the
//! selection rules for class skill trees.
mod definition;
mod passive;
mod tree;

pub use definition::{
    ActiveSkill, ClassDefinition, MonsterSkill, MonsterSkillEffect, SkillDefinition, SkillId,
    SkillKind,
};
pub use passive::{PassiveKind, PassiveSet};
pub use tree::{SkillSelection, SkillTier, SkillTree, UnlockError};
