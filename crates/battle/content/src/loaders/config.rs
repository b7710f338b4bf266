//! Battle configuration loader.

use std::path::Path;

use battle_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for battle configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Keys missing from the file keep their [`BattleConfig::new`] defaults.
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        let config: BattleConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.variance_min_permille > config.variance_max_permille {
            anyhow::bail!(
                "Invalid variance bounds in {}: {} > {}",
                path.display(),
                config.variance_min_permille,
                config.variance_max_permille
            );
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_toml(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(body.as_bytes()).expect("write");
        file
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let file = write_toml("flee_chance_pct = 65\n");
        let config = ConfigLoader::load(file.path()).expect("load");
        assert_eq!(config.flee_chance_pct, 65);
        assert_eq!(config.monster_poison_pct, BattleConfig::DEFAULT_MONSTER_POISON_PCT);
    }

    #[test]
    fn inverted_variance_is_rejected() {
        let file = write_toml("variance_min_permille = 1200\nvariance_max_permille = 900\n");
        let err = ConfigLoader::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("variance"));
    }

    #[test]
    fn negative_debuff_step_is_rejected() {
        let file = write_toml("enemy_debuff_step = -2\n");
        assert!(ConfigLoader::load(file.path()).is_err());

        let file = write_toml("enemy_debuff_step = 3\n");
        let config = ConfigLoader::load(file.path()).expect("load");
        assert_eq!(config.enemy_debuff_step, 3);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = ConfigLoader::load(Path::new("/nonexistent/battle.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/battle.toml"));
    }
}
