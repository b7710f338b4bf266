use arrayvec::ArrayVec;

use super::Item;
use crate::config::BattleConfig;

/// Monster or boss as handed over by the scaling collaborator.
///
/// All stats are already scaled for the encounter level.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterDescriptor {
    pub name: String,
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub exp: u32,
    pub gold: u32,
    /// Monster skill ids, resolved through the content oracle.
    pub skills: ArrayVec<String, { BattleConfig::MAX_MONSTER_SKILLS }>,
    /// Boss title. Bosses cannot be fled from.
    pub boss_title: Option<String>,
    /// Pre-rolled drop granted on victory.
    pub drop: Option<Item>,
}

impl MonsterDescriptor {
    pub fn new(name: impl Into<String>, max_hp: u32, attack: u32, defense: u32) -> Self {
        Self {
            name: name.into(),
            max_hp,
            attack,
            defense,
            exp: 0,
            gold: 0,
            skills: ArrayVec::new(),
            boss_title: None,
            drop: None,
        }
    }

    pub fn with_rewards(mut self, exp: u32, gold: u32) -> Self {
        self.exp = exp;
        self.gold = gold;
        self
    }

    /// Adds a skill id; ids beyond the capacity are ignored.
    pub fn with_skill(mut self, id: impl Into<String>) -> Self {
        let _ = self.skills.try_push(id.into());
        self
    }

    pub fn with_boss_title(mut self, title: impl Into<String>) -> Self {
        self.boss_title = Some(title.into());
        self
    }

    pub fn with_drop(mut self, item: Item) -> Self {
        self.drop = Some(item);
        self
    }

    pub fn is_boss(&self) -> bool {
        self.boss_title.is_some()
    }
}

/// Live monster values during a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterState {
    pub hp: u32,
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
}

impl MonsterState {
    pub fn from_descriptor(descriptor: &MonsterDescriptor) -> Self {
        Self {
            hp: descriptor.max_hp,
            max_hp: descriptor.max_hp,
            attack: descriptor.attack,
            defense: descriptor.defense,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Applies damage, saturating at 0. Returns the HP actually removed.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let dealt = amount.min(self.hp);
        self.hp -= dealt;
        dealt
    }

    pub fn heal(&mut self, amount: u32) {
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
    }
}
