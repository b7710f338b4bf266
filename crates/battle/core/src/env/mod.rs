//! Traits describing read-only battle data.
//!
//! Oracles expose class and skill definitions, the randomness source and the
//! rule constants. The [`BattleEnv`] aggregate bundles them so the engine can
//! reach everything it needs without hard coupling to concrete loaders.
mod content;
mod error;
mod rng;

pub use content::{ContentBundle, ContentOracle};
pub use error::OracleError;
pub use rng::{Dice, PcgRng, RngOracle, Roll, compute_seed};

use crate::config::BattleConfig;
use crate::effects::EffectRegistry;
use crate::skills::{ClassDefinition, SkillTree};
use crate::state::ClassId;

/// Aggregates the read-only collaborators required by the battle engine.
#[derive(Clone, Copy)]
pub struct BattleEnv<'a> {
    content: &'a dyn ContentOracle,
    rng: &'a dyn RngOracle,
    config: &'a BattleConfig,
    effects: &'a EffectRegistry,
}

impl<'a> BattleEnv<'a> {
    pub fn new(
        content: &'a dyn ContentOracle,
        rng: &'a dyn RngOracle,
        config: &'a BattleConfig,
        effects: &'a EffectRegistry,
    ) -> Self {
        Self {
            content,
            rng,
            config,
            effects,
        }
    }

    pub fn content(&self) -> &'a dyn ContentOracle {
        self.content
    }

    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng
    }

    pub fn config(&self) -> &'a BattleConfig {
        self.config
    }

    pub fn effects(&self) -> &'a EffectRegistry {
        self.effects
    }

    /// Returns the class definition, or an error if the content lacks it.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ClassNotFound` if the class is not registered.
    pub fn class(&self, id: ClassId) -> Result<&'a ClassDefinition, OracleError> {
        self.content.class(id).ok_or(OracleError::ClassNotFound(id))
    }

    /// Returns the class skill tree, or an error if the content lacks it.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::SkillTreeNotFound` if no tree is registered.
    pub fn skill_tree(&self, id: ClassId) -> Result<&'a SkillTree, OracleError> {
        self.content
            .skill_tree(id)
            .ok_or(OracleError::SkillTreeNotFound(id))
    }
}

impl core::fmt::Debug for BattleEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BattleEnv")
            .field("config", self.config)
            .field("effects", &self.effects.len())
            .finish_non_exhaustive()
    }
}
