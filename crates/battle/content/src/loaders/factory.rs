//! Content factory for building the battle content set from data files.

use std::path::{Path, PathBuf};

use battle_core::{BattleConfig, ClassDefinition, ContentBundle, MonsterSkill, SkillTree};

use crate::loaders::{
    ClassLoader, ConfigLoader, LoadResult, MonsterLoader, MonsterSkillLoader, SkillTreeLoader,
};
use crate::scaling::MonsterRoster;

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── battle.toml
/// ├── classes.ron
/// ├── skill_trees.ron
/// ├── monster_skills.ron
/// └── monsters.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data files shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
    }

    /// Load battle configuration from `battle.toml`.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        ConfigLoader::load(&self.data_dir.join("battle.toml"))
    }

    /// Load class definitions from `classes.ron`.
    pub fn load_classes(&self) -> LoadResult<Vec<ClassDefinition>> {
        ClassLoader::load(&self.data_dir.join("classes.ron"))
    }

    /// Load skill trees from `skill_trees.ron`.
    pub fn load_skill_trees(&self) -> LoadResult<Vec<SkillTree>> {
        SkillTreeLoader::load(&self.data_dir.join("skill_trees.ron"))
    }

    /// Load monster skills from `monster_skills.ron`.
    pub fn load_monster_skills(&self) -> LoadResult<Vec<MonsterSkill>> {
        MonsterSkillLoader::load(&self.data_dir.join("monster_skills.ron"))
    }

    /// Load monster and boss templates from `monsters.ron`.
    pub fn load_roster(&self) -> LoadResult<MonsterRoster> {
        MonsterLoader::load(&self.data_dir.join("monsters.ron"))
    }

    /// Load classes, skill trees and monster skills into one bundle.
    pub fn load_bundle(&self) -> LoadResult<ContentBundle> {
        let bundle = ContentBundle::new(
            self.load_classes()?,
            self.load_skill_trees()?,
            self.load_monster_skills()?,
        );
        tracing::debug!(
            dir = %self.data_dir.display(),
            classes = bundle.classes.len(),
            trees = bundle.skill_trees.len(),
            monster_skills = bundle.monster_skills.len(),
            "content bundle loaded"
        );
        Ok(bundle)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
        assert!(ContentFactory::bundled().data_dir().ends_with("data"));
    }

    #[test]
    fn missing_directory_fails_with_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = ContentFactory::new(dir.path()).load_bundle().unwrap_err();
        assert!(err.to_string().contains("classes.ron"));
    }
}
