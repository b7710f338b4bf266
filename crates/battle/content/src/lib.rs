//! Data-driven battle content and loaders.
//!
//! This crate houses the static content battles run against and provides
//! loaders for the RON/TOML data files under `data/`:
//! - Class definitions (data-driven via RON)
//! - Class skill trees (data-driven via RON)
//! - Monster skills and monster/boss templates (data-driven via RON)
//! - Battle rule constants (data-driven via TOML)
//!
//! It also owns monster scaling, which turns a template into the
//! encounter-ready descriptor `battle-core` starts a battle from.

pub mod scaling;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use scaling::{Growth, MonsterRoster, MonsterScaler, MonsterTemplate};

#[cfg(feature = "loaders")]
pub use loaders::{
    ClassLoader, ConfigLoader, ContentFactory, LoadResult, MonsterLoader, MonsterSkillLoader,
    SkillTreeLoader, validate_content,
};
