use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use super::{Equipment, Inventory};
use crate::skills::{ClassDefinition, SkillSelection};

/// Playable character classes.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClassId {
    Berserker,
    Warrior,
    Thief,
    Mage,
    Necromancer,
}

/// Secondary attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, IntoStaticStr, Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Attribute {
    /// Better shop prices.
    Charisma,
    /// +2% battle max mana per point.
    Wisdom,
    /// +0.5% dodge chance per point.
    Athletics,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attributes {
    pub charisma: u32,
    pub wisdom: u32,
    pub athletics: u32,
}

impl Attributes {
    pub fn new(charisma: u32, wisdom: u32, athletics: u32) -> Self {
        Self {
            charisma,
            wisdom,
            athletics,
        }
    }

    pub fn get(&self, attribute: Attribute) -> u32 {
        match attribute {
            Attribute::Charisma => self.charisma,
            Attribute::Wisdom => self.wisdom,
            Attribute::Athletics => self.athletics,
        }
    }

    pub fn raise(&mut self, attribute: Attribute, amount: u32) {
        let value = match attribute {
            Attribute::Charisma => &mut self.charisma,
            Attribute::Wisdom => &mut self.wisdom,
            Attribute::Athletics => &mut self.athletics,
        };
        *value = value.saturating_add(amount);
    }
}

/// Current HP and mana, the only player values skill effects may touch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerVitals {
    pub hp: u32,
    pub mana: u32,
}

/// Permanent player record.
///
/// A battle works on a copy of this record; the authoritative copy is only
/// updated when a finished battle is settled.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerRecord {
    pub name: String,
    pub class: ClassId,
    pub level: u32,
    pub exp: u32,
    pub gold: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub mana: u32,
    pub max_mana: u32,
    pub attack: u32,
    pub defense: u32,
    pub attributes: Attributes,
    pub equipment: Equipment,
    pub inventory: Inventory,
    pub skills: SkillSelection,
}

impl PlayerRecord {
    /// Creates a level 1 character from a class definition.
    pub fn new(name: impl Into<String>, class: &ClassDefinition) -> Self {
        Self {
            name: name.into(),
            class: class.id,
            level: 1,
            exp: 0,
            gold: 0,
            hp: class.max_hp,
            max_hp: class.max_hp,
            mana: class.max_mana,
            max_mana: class.max_mana,
            attack: class.attack,
            defense: class.defense,
            attributes: Attributes::default(),
            equipment: Equipment::empty(),
            inventory: Inventory::default(),
            skills: SkillSelection::new(),
        }
    }

    pub fn vitals(&self) -> PlayerVitals {
        PlayerVitals {
            hp: self.hp,
            mana: self.mana,
        }
    }

    pub fn set_vitals(&mut self, vitals: PlayerVitals) {
        self.hp = vitals.hp;
        self.mana = vitals.mana;
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}
