//! Monster templates and per-level scaling.
//!
//! Templates hold level 1 stats. Scaling turns a template into the
//! [`MonsterDescriptor`] a battle starts from: every stat grows by a fixed
//! percentage per area level above 1 (floored), and gold gets a small random
//! bonus drawn from the same RNG oracle the battle uses.

use battle_core::{Dice, Item, MonsterDescriptor, Roll, RngOracle};

/// Unscaled monster or boss.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterTemplate {
    pub id: String,
    pub name: String,
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub exp: u32,
    pub gold: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: Vec<String>,
    /// Boss title; required for bosses.
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub drop: Option<Item>,
}

/// Regular monsters and bosses, kept apart because they scale differently.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterRoster {
    pub monsters: Vec<MonsterTemplate>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bosses: Vec<MonsterTemplate>,
}

impl MonsterRoster {
    pub fn monster(&self, id: &str) -> Option<&MonsterTemplate> {
        self.monsters.iter().find(|template| template.id == id)
    }

    pub fn boss(&self, id: &str) -> Option<&MonsterTemplate> {
        self.bosses.iter().find(|template| template.id == id)
    }

    pub fn templates(&self) -> impl Iterator<Item = &MonsterTemplate> {
        self.monsters.iter().chain(self.bosses.iter())
    }
}

/// Growth rule for one rank of enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Growth {
    /// Stat growth per area level above 1, in percent.
    pub per_level_pct: u32,
    /// Exclusive upper bound of the random gold bonus.
    pub gold_bonus: u32,
}

impl Growth {
    pub const MONSTER: Growth = Growth {
        per_level_pct: 20,
        gold_bonus: 5,
    };
    pub const BOSS: Growth = Growth {
        per_level_pct: 25,
        gold_bonus: 15,
    };

    /// Total scale for an area level, in percent.
    pub fn scale_pct(self, area_level: u32) -> u64 {
        100 + u64::from(area_level.saturating_sub(1)) * u64::from(self.per_level_pct)
    }
}

fn scaled(base: u32, scale_pct: u64) -> u32 {
    u32::try_from(u64::from(base) * scale_pct / 100).unwrap_or(u32::MAX)
}

/// Turns templates into encounter-ready descriptors.
#[derive(Clone, Copy)]
pub struct MonsterScaler<'a> {
    rng: &'a dyn RngOracle,
}

impl<'a> MonsterScaler<'a> {
    pub fn new(rng: &'a dyn RngOracle) -> Self {
        Self { rng }
    }

    /// Scales a regular monster (+20% per level).
    pub fn monster(
        &self,
        template: &MonsterTemplate,
        area_level: u32,
        seed: u64,
    ) -> MonsterDescriptor {
        self.scale(template, Growth::MONSTER, area_level, seed)
    }

    /// Scales a boss (+25% per level). A template without a title is
    /// titled after its id.
    pub fn boss(
        &self,
        template: &MonsterTemplate,
        area_level: u32,
        seed: u64,
    ) -> MonsterDescriptor {
        let title = template.title.clone().unwrap_or_else(|| template.id.clone());
        self.scale(template, Growth::BOSS, area_level, seed)
            .with_boss_title(title)
    }

    fn scale(
        &self,
        template: &MonsterTemplate,
        growth: Growth,
        area_level: u32,
        seed: u64,
    ) -> MonsterDescriptor {
        let pct = growth.scale_pct(area_level);
        let bonus = if growth.gold_bonus > 0 {
            Dice::new(self.rng, seed, 0).range(Roll::GoldBonus, 0, growth.gold_bonus - 1)
        } else {
            0
        };

        let mut descriptor = MonsterDescriptor::new(
            template.name.clone(),
            scaled(template.hp, pct).max(1),
            scaled(template.attack, pct),
            scaled(template.defense, pct),
        )
        .with_rewards(
            scaled(template.exp, pct),
            scaled(template.gold, pct).saturating_add(bonus),
        );
        if template.skills.len() > descriptor.skills.capacity() {
            tracing::warn!(
                monster = %template.id,
                skills = template.skills.len(),
                "monster declares more skills than a battle can hold, extra skills ignored"
            );
        }
        for skill in &template.skills {
            descriptor = descriptor.with_skill(skill.clone());
        }
        if let Some(item) = &template.drop {
            descriptor = descriptor.with_drop(item.clone());
        }

        tracing::debug!(
            monster = %template.id,
            area_level,
            scale_pct = pct,
            gold_bonus = bonus,
            "monster scaled"
        );
        descriptor
    }
}
