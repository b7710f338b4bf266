//! Class, skill tree, monster skill and monster catalogs.

use std::path::Path;

use battle_core::{ClassDefinition, MonsterSkill, SkillTree};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron};
use crate::scaling::MonsterRoster;

/// Class catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassCatalog {
    pub classes: Vec<ClassDefinition>,
}

/// Skill tree catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillTreeCatalog {
    pub trees: Vec<SkillTree>,
}

/// Monster skill catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonsterSkillCatalog {
    pub skills: Vec<MonsterSkill>,
}

/// Loader for class definitions.
pub struct ClassLoader;

impl ClassLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<ClassDefinition>> {
        let catalog: ClassCatalog = parse_ron(path, "class catalog")?;
        for class in &catalog.classes {
            if class.skill.as_active().is_none() {
                anyhow::bail!("Class skill of {} must be an active skill", class.id);
            }
        }
        Ok(catalog.classes)
    }
}

/// Loader for class skill trees.
pub struct SkillTreeLoader;

impl SkillTreeLoader {
    /// Load skill trees, rejecting structurally broken ones (empty, more than
    /// ten tiers, a tier without exactly two choices, non-ascending level
    /// gates, duplicate ids).
    pub fn load(path: &Path) -> LoadResult<Vec<SkillTree>> {
        let catalog: SkillTreeCatalog = parse_ron(path, "skill tree")?;
        for tree in &catalog.trees {
            if !tree.is_well_formed() {
                anyhow::bail!("Skill tree for {} is malformed", tree.class);
            }
        }
        Ok(catalog.trees)
    }
}

/// Loader for monster skills.
pub struct MonsterSkillLoader;

impl MonsterSkillLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<MonsterSkill>> {
        let catalog: MonsterSkillCatalog = parse_ron(path, "monster skill")?;
        Ok(catalog.skills)
    }
}

/// Loader for monster and boss templates.
pub struct MonsterLoader;

impl MonsterLoader {
    pub fn load(path: &Path) -> LoadResult<MonsterRoster> {
        let roster: MonsterRoster = parse_ron(path, "monster")?;
        if let Some(boss) = roster.bosses.iter().find(|boss| boss.title.is_none()) {
            anyhow::bail!("Boss {} has no title", boss.id);
        }
        Ok(roster)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use battle_core::{ClassId, MonsterSkillEffect};

    use super::*;

    fn write_ron(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(body.as_bytes()).expect("write");
        file
    }

    #[test]
    fn monster_skill_effect_defaults_to_none() {
        let file = write_ron(
            r#"(skills: [
                (id: "bite", name: "Bite", multiplier_pct: 130),
                (id: "curse", name: "Curse", multiplier_pct: 70, effect: Some(LowerAttack)),
            ])"#,
        );
        let skills = MonsterSkillLoader::load(file.path()).expect("load");
        assert_eq!(skills[0].effect, None);
        assert_eq!(skills[1].effect, Some(MonsterSkillEffect::LowerAttack));
    }

    #[test]
    fn tree_with_one_choice_is_rejected() {
        let file = write_ron(
            r#"(trees: [(
                class: Mage,
                tiers: [(level: 2, choices: [
                    (id: "x", name: "X", kind: Passive(ManaShield)),
                ])],
            )])"#,
        );
        let err = SkillTreeLoader::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("mage"));
    }

    #[test]
    fn passive_class_skill_is_rejected() {
        let file = write_ron(
            r#"(classes: [(
                id: Warrior, name: "Warrior", max_hp: 100, max_mana: 20, attack: 10, defense: 5,
                passive: Fortify, passive_name: "Fortify",
                skill: (id: "war_class", name: "Oops", kind: Passive(IronSkin)),
            )])"#,
        );
        let err = ClassLoader::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("warrior"));

        let ok = write_ron(
            r#"(classes: [(
                id: Warrior, name: "Warrior", max_hp: 100, max_mana: 20, attack: 10, defense: 5,
                passive: Fortify, passive_name: "Fortify",
                skill: (id: "war_class", name: "Bash", kind: Active((mana_cost: 5, multiplier_pct: 150))),
            )])"#,
        );
        let classes = ClassLoader::load(ok.path()).expect("load");
        assert_eq!(classes[0].id, ClassId::Warrior);
    }

    #[test]
    fn untitled_boss_is_rejected() {
        let file = write_ron(
            r#"(
                monsters: [],
                bosses: [(id: "king", name: "King", hp: 100, attack: 10, defense: 5, exp: 50, gold: 50)],
            )"#,
        );
        let err = MonsterLoader::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("king"));
    }

    #[test]
    fn parse_errors_name_the_file() {
        let file = write_ron("(skills: [");
        let err = MonsterSkillLoader::load(file.path()).unwrap_err();
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }
}
