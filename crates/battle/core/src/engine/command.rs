use crate::skills::SkillId;

/// Which active skill a `Skill` command uses.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillRef {
    /// The class active skill.
    Class,
    /// An unlocked active skill from the class tree.
    Tree(SkillId),
}

/// A player choice during the player turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerCommand {
    Attack,
    Skill(SkillRef),
    Defend,
    /// Use the consumable at this inventory index.
    UseItem(usize),
    Flee,
}

impl PlayerCommand {
    pub fn tree_skill(id: impl Into<SkillId>) -> Self {
        PlayerCommand::Skill(SkillRef::Tree(id.into()))
    }

    pub fn class_skill() -> Self {
        PlayerCommand::Skill(SkillRef::Class)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerCommand::Attack => "attack",
            PlayerCommand::Skill(_) => "skill",
            PlayerCommand::Defend => "defend",
            PlayerCommand::UseItem(_) => "use_item",
            PlayerCommand::Flee => "flee",
        }
    }
}
