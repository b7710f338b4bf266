//! Content loaders for reading battle data from files.
//!
//! Catalogs are RON, the battle configuration is TOML. Every loader returns
//! `anyhow` results with the offending path in the message.

pub mod catalog;
pub mod config;
pub mod factory;
pub mod validate;

pub use catalog::{
    ClassCatalog, ClassLoader, MonsterLoader, MonsterSkillCatalog, MonsterSkillLoader,
    SkillTreeCatalog, SkillTreeLoader,
};
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use validate::validate_content;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Parses a RON document, naming the file on failure.
pub(crate) fn parse_ron<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> LoadResult<T> {
    let content = read_file(path)?;
    ron::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Failed to parse {} RON at {}: {}", what, path.display(), e))
}
