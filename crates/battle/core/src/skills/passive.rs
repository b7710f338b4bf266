//! Passive skill kinds and the per-battle passive set.

use bitflags::bitflags;
use strum::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

/// Every passive the resolver understands.
///
/// Class innates come first, then the tree passives grouped by class. The
/// discriminant is the bit position in [`PassiveSet`].
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
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum PassiveKind {
    // Class innates
    Rage = 0,
    Fortify,
    Nimble,
    ArcaneMind,
    Lifetap,

    // Berserker tree
    BloodFrenzy,
    UndyingWill,
    Bloodlust,
    WarMachine,
    ThickSkin,
    AdrenalineRush,
    Tenacity,
    Bloodbath,
    Relentless,
    ImmortalRage,

    // Warrior tree
    IronSkin,
    Bulwark,
    Unbreakable,
    Aegis,
    Stalwart,
    Regeneration,
    ArmorMastery,
    LastStand,
    Indomitable,
    Fortress,

    // Thief tree
    ShadowStep,
    Plunder,
    EvasionMastery,
    LuckyStrike,
    QuickHands,
    Opportunist,
    Slippery,
    TreasureHunter,
    BladeDance,
    MasterThief,

    // Mage tree
    ManaShield,
    SpellEcho,
    ArcaneOverflow,
    ManaSurge,
    Meditation,
    ElementalMastery,
    ArcaneBarrier,
    Spellweaver,
    ManaRegeneration,
    Transcendence,

    // Necromancer tree
    SoulSiphon,
    DeathsEmbrace,
    VampiricAura,
    DarkPact,
    NecroticTouch,
    /// Spending mana heals half the mana spent.
    ManaTap,
    UndeadFortitude,
    CursedBlood,
    EternalHunger,
    LichForm,
}

impl PassiveKind {
    pub const fn flag(self) -> PassiveSet {
        PassiveSet::from_bits_retain(1u64 << self as u8)
    }
}

bitflags! {
    /// Set of passives active in one battle.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct PassiveSet: u64 {
        const RAGE = 1 << PassiveKind::Rage as u8;
        const FORTIFY = 1 << PassiveKind::Fortify as u8;
        const NIMBLE = 1 << PassiveKind::Nimble as u8;
        const ARCANE_MIND = 1 << PassiveKind::ArcaneMind as u8;
        const LIFETAP = 1 << PassiveKind::Lifetap as u8;

        const BLOOD_FRENZY = 1 << PassiveKind::BloodFrenzy as u8;
        const UNDYING_WILL = 1 << PassiveKind::UndyingWill as u8;
        const BLOODLUST = 1 << PassiveKind::Bloodlust as u8;
        const WAR_MACHINE = 1 << PassiveKind::WarMachine as u8;
        const THICK_SKIN = 1 << PassiveKind::ThickSkin as u8;
        const ADRENALINE_RUSH = 1 << PassiveKind::AdrenalineRush as u8;
        const TENACITY = 1 << PassiveKind::Tenacity as u8;
        const BLOODBATH = 1 << PassiveKind::Bloodbath as u8;
        const RELENTLESS = 1 << PassiveKind::Relentless as u8;
        const IMMORTAL_RAGE = 1 << PassiveKind::ImmortalRage as u8;

        const IRON_SKIN = 1 << PassiveKind::IronSkin as u8;
        const BULWARK = 1 << PassiveKind::Bulwark as u8;
        const UNBREAKABLE = 1 << PassiveKind::Unbreakable as u8;
        const AEGIS = 1 << PassiveKind::Aegis as u8;
        const STALWART = 1 << PassiveKind::Stalwart as u8;
        const REGENERATION = 1 << PassiveKind::Regeneration as u8;
        const ARMOR_MASTERY = 1 << PassiveKind::ArmorMastery as u8;
        const LAST_STAND = 1 << PassiveKind::LastStand as u8;
        const INDOMITABLE = 1 << PassiveKind::Indomitable as u8;
        const FORTRESS = 1 << PassiveKind::Fortress as u8;

        const SHADOW_STEP = 1 << PassiveKind::ShadowStep as u8;
        const PLUNDER = 1 << PassiveKind::Plunder as u8;
        const EVASION_MASTERY = 1 << PassiveKind::EvasionMastery as u8;
        const LUCKY_STRIKE = 1 << PassiveKind::LuckyStrike as u8;
        const QUICK_HANDS = 1 << PassiveKind::QuickHands as u8;
        const OPPORTUNIST = 1 << PassiveKind::Opportunist as u8;
        const SLIPPERY = 1 << PassiveKind::Slippery as u8;
        const TREASURE_HUNTER = 1 << PassiveKind::TreasureHunter as u8;
        const BLADE_DANCE = 1 << PassiveKind::BladeDance as u8;
        const MASTER_THIEF = 1 << PassiveKind::MasterThief as u8;

        const MANA_SHIELD = 1 << PassiveKind::ManaShield as u8;
        const SPELL_ECHO = 1 << PassiveKind::SpellEcho as u8;
        const ARCANE_OVERFLOW = 1 << PassiveKind::ArcaneOverflow as u8;
        const MANA_SURGE = 1 << PassiveKind::ManaSurge as u8;
        const MEDITATION = 1 << PassiveKind::Meditation as u8;
        const ELEMENTAL_MASTERY = 1 << PassiveKind::ElementalMastery as u8;
        const ARCANE_BARRIER = 1 << PassiveKind::ArcaneBarrier as u8;
        const SPELLWEAVER = 1 << PassiveKind::Spellweaver as u8;
        const MANA_REGENERATION = 1 << PassiveKind::ManaRegeneration as u8;
        const TRANSCENDENCE = 1 << PassiveKind::Transcendence as u8;

        const SOUL_SIPHON = 1 << PassiveKind::SoulSiphon as u8;
        const DEATHS_EMBRACE = 1 << PassiveKind::DeathsEmbrace as u8;
        const VAMPIRIC_AURA = 1 << PassiveKind::VampiricAura as u8;
        const DARK_PACT = 1 << PassiveKind::DarkPact as u8;
        const NECROTIC_TOUCH = 1 << PassiveKind::NecroticTouch as u8;
        const MANA_TAP = 1 << PassiveKind::ManaTap as u8;
        const UNDEAD_FORTITUDE = 1 << PassiveKind::UndeadFortitude as u8;
        const CURSED_BLOOD = 1 << PassiveKind::CursedBlood as u8;
        const ETERNAL_HUNGER = 1 << PassiveKind::EternalHunger as u8;
        const LICH_FORM = 1 << PassiveKind::LichForm as u8;
    }
}

impl PassiveSet {
    pub fn from_kinds(kinds: impl IntoIterator<Item = PassiveKind>) -> Self {
        kinds
            .into_iter()
            .fold(Self::empty(), |set, kind| set | kind.flag())
    }

    pub fn has(self, kind: PassiveKind) -> bool {
        self.contains(kind.flag())
    }

    pub fn with(self, kind: PassiveKind) -> Self {
        self | kind.flag()
    }
}
