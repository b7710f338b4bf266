//! Passive resolution pipelines.
//!
//! Passives fire automatically at fixed hook points. Each hook has a static,
//! ordered list of steps ([`PassiveHook::order`]); stacking is defined by that
//! order and nothing else.

mod hooks;
mod resolver;

pub use hooks::{PassiveHook, PassiveStep};
pub use resolver::{DodgeSource, IncomingHit, PassiveResolver};
