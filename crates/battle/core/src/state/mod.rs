//! Battle and player state representation.
//!
//! The permanent [`PlayerRecord`] is owned by the caller. A [`BattleSession`]
//! holds a live copy of it plus everything that only exists for one
//! encounter: the monster, status counters, flags and the narrated log.
mod equipment;
mod inventory;
mod log;
mod monster;
mod player;
mod session;
mod status;

pub use equipment::{Equipment, EquipmentSlot, Item, ItemKind};
pub use inventory::{Inventory, PickupOutcome};
pub use log::{BattleLog, LogEntry, LogKind};
pub use monster::{MonsterDescriptor, MonsterState};
pub use player::{Attribute, Attributes, ClassId, PlayerRecord, PlayerVitals};
pub use session::{BattleFlags, BattleLimits, BattleSession, Phase};
pub use status::StatusBlock;
