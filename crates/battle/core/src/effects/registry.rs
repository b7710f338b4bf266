use std::collections::BTreeMap;
use std::sync::Arc;

use super::kinds::builtin_effects;
use super::{EffectContext, EffectUpdate};

/// Transforms an effect context into a partial update.
///
/// Handlers are pure: they read the context copy and describe the change,
/// the engine decides how to merge it.
pub trait EffectHandler: Send + Sync {
    fn apply(&self, ctx: &EffectContext) -> EffectUpdate;
}

impl<F> EffectHandler for F
where
    F: Fn(&EffectContext) -> EffectUpdate + Send + Sync,
{
    fn apply(&self, ctx: &EffectContext) -> EffectUpdate {
        self(ctx)
    }
}

/// Maps effect names from content to handlers.
///
/// Lookups of unknown names resolve to an empty update; content may name
/// effects this build does not know yet.
#[derive(Clone, Default)]
pub struct EffectRegistry {
    handlers: BTreeMap<String, Arc<dyn EffectHandler>>,
}

impl EffectRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with every built-in effect name.
    pub fn builtin() -> Self {
        builtin_effects()
            .into_iter()
            .fold(Self::empty(), |registry, (name, effect)| registry.with(name, effect))
    }

    /// Registers (or replaces) a handler.
    pub fn register(&mut self, name: impl Into<String>, handler: impl EffectHandler + 'static) {
        self.handlers.insert(name.into(), Arc::new(handler));
    }

    pub fn with(mut self, name: impl Into<String>, handler: impl EffectHandler + 'static) -> Self {
        self.register(name, handler);
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn EffectHandler> {
        self.handlers.get(name).map(|handler| handler.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Runs the named handler. Unknown names are a no-op.
    pub fn resolve(&self, name: &str, ctx: &EffectContext) -> EffectUpdate {
        match self.get(name) {
            Some(handler) => {
                tracing::debug!(effect = name, damage = ctx.damage, "resolving skill effect");
                handler.apply(ctx)
            }
            None => {
                tracing::warn!(effect = name, "unknown skill effect, ignoring");
                EffectUpdate::none()
            }
        }
    }
}

impl core::fmt::Debug for EffectRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.handlers.keys()).finish()
    }
}
