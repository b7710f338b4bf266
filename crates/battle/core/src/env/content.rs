use crate::skills::{ClassDefinition, MonsterSkill, SkillTree};
use crate::state::ClassId;

/// Read-only access to class, skill tree and monster skill definitions.
pub trait ContentOracle: Send + Sync {
    fn class(&self, id: ClassId) -> Option<&ClassDefinition>;

    fn skill_tree(&self, id: ClassId) -> Option<&SkillTree>;

    fn monster_skill(&self, id: &str) -> Option<&MonsterSkill>;
}

/// In-memory content catalog.
///
/// Loaders in `battle-content` deserialize the shipped data files into this
/// bundle; tests usually build one by hand.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentBundle {
    pub classes: Vec<ClassDefinition>,
    pub skill_trees: Vec<SkillTree>,
    pub monster_skills: Vec<MonsterSkill>,
}

impl ContentBundle {
    pub fn new(
        classes: Vec<ClassDefinition>,
        skill_trees: Vec<SkillTree>,
        monster_skills: Vec<MonsterSkill>,
    ) -> Self {
        Self {
            classes,
            skill_trees,
            monster_skills,
        }
    }

    pub fn with_class(mut self, class: ClassDefinition) -> Self {
        self.classes.push(class);
        self
    }

    pub fn with_skill_tree(mut self, tree: SkillTree) -> Self {
        self.skill_trees.push(tree);
        self
    }

    pub fn with_monster_skill(mut self, skill: MonsterSkill) -> Self {
        self.monster_skills.push(skill);
        self
    }
}

impl ContentOracle for ContentBundle {
    fn class(&self, id: ClassId) -> Option<&ClassDefinition> {
        self.classes.iter().find(|class| class.id == id)
    }

    fn skill_tree(&self, id: ClassId) -> Option<&SkillTree> {
        self.skill_trees.iter().find(|tree| tree.class == id)
    }

    fn monster_skill(&self, id: &str) -> Option<&MonsterSkill> {
        self.monster_skills.iter().find(|skill| skill.id == id)
    }
}
