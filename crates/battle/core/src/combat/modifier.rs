//! Effects that change how a skill hit is computed rather than what it does
//! afterwards: pierce, true damage, execute, counter and shield slam.

use super::DefenseMode;
use crate::stats::below_pct;

/// Attack multiplier applied when the target is below an HP threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Execute {
    pub below_pct: u32,
    pub multiplier_pct: u32,
}

impl Execute {
    /// Multiplier in percent for a target at `hp` of `max_hp`.
    pub fn multiplier_for(self, hp: u32, max_hp: u32) -> u32 {
        if below_pct(hp, max_hp, self.below_pct) {
            self.multiplier_pct
        } else {
            100
        }
    }
}

/// Pre-formula modifiers derived from a skill's effect name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DamageModifier {
    pub defense: DefenseMode,
    pub execute: Option<Execute>,
    /// Extra ×1.25 when the player defended during the previous round.
    pub counter: bool,
    /// Player effective defense is added to attack.
    pub shield_slam: bool,
}

impl DamageModifier {
    pub const COUNTER_BONUS_PCT: u32 = 125;

    /// Parses the modifiers of an effect name. Names without modifiers yield
    /// the default (full defense, nothing else).
    pub fn for_effect(effect: Option<&str>) -> Self {
        let Some(name) = effect else {
            return Self::default();
        };
        let pierce = |keep_pct| Self {
            defense: DefenseMode::Pierce { keep_pct },
            ..Self::default()
        };
        match name {
            "true_damage" | "phantom_blade" => Self {
                defense: DefenseMode::Ignore,
                ..Self::default()
            },
            "pierce" | "pierce_50" => pierce(50),
            "pierce_20" => pierce(80),
            "pierce_25" => pierce(75),
            "pierce_30" => pierce(70),
            "pierce_40" => pierce(60),
            "execute" => Self {
                execute: Some(Execute {
                    below_pct: 30,
                    multiplier_pct: 200,
                }),
                ..Self::default()
            },
            "execute_25" => Self {
                execute: Some(Execute {
                    below_pct: 25,
                    multiplier_pct: 267,
                }),
                ..Self::default()
            },
            "counter" => Self {
                counter: true,
                ..Self::default()
            },
            "shield_slam" => Self {
                shield_slam: true,
                ..Self::default()
            },
            _ => Self::default(),
        }
    }

    /// True if the name is handled entirely here and needs no effect handler.
    pub fn is_damage_modifier(name: &str) -> bool {
        Self::for_effect(Some(name)) != Self::default()
    }
}
