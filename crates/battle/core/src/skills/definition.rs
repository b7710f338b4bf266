use core::fmt;

use strum::{Display, EnumString, IntoStaticStr};

use super::PassiveKind;
use crate::state::ClassId;

/// Stable skill identifier (for example `brs_t1a`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SkillId(String);

impl SkillId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SkillId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Activation data of an active skill.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveSkill {
    pub mana_cost: u32,
    /// Damage multiplier in percent (`220` = 2.2x).
    pub multiplier_pct: u32,
    /// Effect name resolved through the effect registry.
    #[cfg_attr(feature = "serde", serde(default))]
    pub effect: Option<String>,
}

impl ActiveSkill {
    pub fn new(mana_cost: u32, multiplier_pct: u32, effect: Option<&str>) -> Self {
        Self {
            mana_cost,
            multiplier_pct,
            effect: effect.map(str::to_owned),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillKind {
    /// Always on; resolved by the passive resolver.
    Passive(PassiveKind),
    /// Player-invoked, mana-costed.
    Active(ActiveSkill),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDefinition {
    pub id: SkillId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub kind: SkillKind,
}

impl SkillDefinition {
    pub fn passive(id: &str, name: &str, passive: PassiveKind) -> Self {
        Self {
            id: SkillId::from(id),
            name: name.to_owned(),
            description: String::new(),
            kind: SkillKind::Passive(passive),
        }
    }

    pub fn active(id: &str, name: &str, active: ActiveSkill) -> Self {
        Self {
            id: SkillId::from(id),
            name: name.to_owned(),
            description: String::new(),
            kind: SkillKind::Active(active),
        }
    }

    pub fn as_active(&self) -> Option<&ActiveSkill> {
        match &self.kind {
            SkillKind::Active(active) => Some(active),
            SkillKind::Passive(_) => None,
        }
    }

    pub fn as_passive(&self) -> Option<PassiveKind> {
        match self.kind {
            SkillKind::Passive(kind) => Some(kind),
            SkillKind::Active(_) => None,
        }
    }
}

/// Class base stats, innate passive and class skill.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassDefinition {
    pub id: ClassId,
    pub name: String,
    pub max_hp: u32,
    pub max_mana: u32,
    pub attack: u32,
    pub defense: u32,
    pub passive: PassiveKind,
    pub passive_name: String,
    /// The class active skill, always available.
    pub skill: SkillDefinition,
}

/// Status effect a monster skill applies on hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumString, IntoStaticStr, Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MonsterSkillEffect {
    Poison,
    LowerDefense,
    LowerAttack,
    StealGold,
    /// Monster heals half the damage it dealt.
    Drain,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterSkill {
    pub id: String,
    pub name: String,
    /// Multiplier applied to monster attack, in percent.
    pub multiplier_pct: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effect: Option<MonsterSkillEffect>,
}

impl MonsterSkill {
    pub fn new(
        id: &str,
        name: &str,
        multiplier_pct: u32,
        effect: Option<MonsterSkillEffect>,
    ) -> Self {
        Self {
            id: id.to_owned(),
            name: name.to_owned(),
            multiplier_pct,
            effect,
        }
    }
}
