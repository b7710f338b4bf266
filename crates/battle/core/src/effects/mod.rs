//! Skill effect registry.
//!
//! An active skill names an effect; after the hit lands the engine builds an
//! [`EffectContext`], looks the name up in the [`EffectRegistry`] and merges
//! the returned [`EffectUpdate`] into the working session.

mod context;
mod kinds;
mod registry;

pub use context::{EffectContext, EffectLimits, EffectUpdate};
pub use kinds::{SkillEffect, builtin_effects};
pub use registry::{EffectHandler, EffectRegistry};
