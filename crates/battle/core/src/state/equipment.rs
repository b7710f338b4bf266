//! Items and the fixed six-slot equipment set.
//!
//! Equip and unequip flows belong to the caller; combat only reads the summed
//! attack/defense bonuses of whatever is equipped.

use strum::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr, IntoEnumIterator};

use crate::config::BattleConfig;

/// Equipment slot on a player.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumCount,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EquipmentSlot {
    Weapon,
    Shield,
    Helmet,
    Armor,
    Boots,
    Accessory,
}

impl EquipmentSlot {
    const fn index(self) -> usize {
        self as usize
    }
}

/// A carried item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub name: String,
    pub kind: ItemKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    /// Wearable gear that adds flat attack/defense while equipped.
    Gear {
        slot: EquipmentSlot,
        attack: u32,
        defense: u32,
    },
    /// Single-use item restoring HP (`heal`) and/or mana (`energy`).
    Consumable { heal: u32, energy: u32 },
}

impl Item {
    pub fn gear(name: impl Into<String>, slot: EquipmentSlot, attack: u32, defense: u32) -> Self {
        Self {
            name: name.into(),
            kind: ItemKind::Gear {
                slot,
                attack,
                defense,
            },
        }
    }

    pub fn consumable(name: impl Into<String>, heal: u32, energy: u32) -> Self {
        Self {
            name: name.into(),
            kind: ItemKind::Consumable { heal, energy },
        }
    }

    pub fn attack_bonus(&self) -> u32 {
        match self.kind {
            ItemKind::Gear { attack, .. } => attack,
            ItemKind::Consumable { .. } => 0,
        }
    }

    pub fn defense_bonus(&self) -> u32 {
        match self.kind {
            ItemKind::Gear { defense, .. } => defense,
            ItemKind::Consumable { .. } => 0,
        }
    }

    pub fn is_consumable(&self) -> bool {
        matches!(self.kind, ItemKind::Consumable { .. })
    }
}

/// Equipped items, one optional item per [`EquipmentSlot`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equipment {
    slots: [Option<Item>; BattleConfig::EQUIPMENT_SLOTS],
}

impl Equipment {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> Option<&Item> {
        self.slots[slot.index()].as_ref()
    }

    /// Places an item in a slot, returning whatever was there before.
    pub fn set(&mut self, slot: EquipmentSlot, item: Option<Item>) -> Option<Item> {
        core::mem::replace(&mut self.slots[slot.index()], item)
    }

    /// Builder-style variant of [`Equipment::set`].
    pub fn with(mut self, slot: EquipmentSlot, item: Item) -> Self {
        self.set(slot, Some(item));
        self
    }

    /// Iterates over occupied slots.
    pub fn iter(&self) -> impl Iterator<Item = (EquipmentSlot, &Item)> {
        EquipmentSlot::iter().filter_map(|slot| self.get(slot).map(|item| (slot, item)))
    }

    /// Flat attack granted by all equipped items.
    pub fn attack_bonus(&self) -> u32 {
        self.iter().map(|(_, item)| item.attack_bonus()).sum()
    }

    /// Flat defense granted by all equipped items.
    pub fn defense_bonus(&self) -> u32 {
        self.iter().map(|(_, item)| item.defense_bonus()).sum()
    }
}
