//! Fixtures shared by unit tests.

use crate::env::{ContentBundle, RngOracle};
use crate::skills::{
    ActiveSkill, ClassDefinition, MonsterSkill, MonsterSkillEffect, PassiveKind, PassiveSet,
    SkillDefinition, SkillTier, SkillTree,
};
use crate::state::{
    BattleFlags, BattleLimits, BattleLog, BattleSession, ClassId, MonsterDescriptor, MonsterState,
    Phase, PlayerRecord, StatusBlock,
};

/// Oracle that always returns the same value.
///
/// `FixedRng(0)` makes every positive chance succeed and every range
/// yield its minimum; `FixedRng(u32::MAX)` makes percent rolls fail.
pub struct FixedRng(pub u32);

impl RngOracle for FixedRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        self.0
    }
}

pub fn class() -> ClassDefinition {
    ClassDefinition {
        id: ClassId::Necromancer,
        name: "Necromancer".into(),
        max_hp: 100,
        max_mana: 40,
        attack: 10,
        defense: 4,
        passive: PassiveKind::Lifetap,
        passive_name: "Lifetap".into(),
        skill: SkillDefinition::active(
            "class_skill",
            "Drain Life",
            ActiveSkill::new(10, 160, Some("drain")),
        ),
    }
}

/// Two-tier necromancer tree: passive/active choices at levels 2 and 4.
pub fn tree() -> SkillTree {
    SkillTree::new(
        ClassId::Necromancer,
        vec![
            SkillTier::new(
                2,
                SkillDefinition::passive("t1a", "Soul Siphon", PassiveKind::SoulSiphon),
                SkillDefinition::active(
                    "t1b",
                    "Bone Spear",
                    ActiveSkill::new(8, 150, Some("true_damage")),
                ),
            ),
            SkillTier::new(
                4,
                SkillDefinition::passive("t2a", "Death's Embrace", PassiveKind::DeathsEmbrace),
                SkillDefinition::active(
                    "t2b",
                    "Plague",
                    ActiveSkill::new(12, 100, Some("apply_poison")),
                ),
            ),
        ],
    )
}

pub fn content() -> ContentBundle {
    ContentBundle::default()
        .with_class(class())
        .with_skill_tree(tree())
        .with_monster_skill(MonsterSkill::new("bite", "Bite", 130, None))
        .with_monster_skill(MonsterSkill::new(
            "poison",
            "Poison Spit",
            60,
            Some(MonsterSkillEffect::Poison),
        ))
        .with_monster_skill(MonsterSkill::new(
            "steal",
            "Steal",
            50,
            Some(MonsterSkillEffect::StealGold),
        ))
        .with_monster_skill(MonsterSkill::new(
            "siphon",
            "Siphon",
            90,
            Some(MonsterSkillEffect::Drain),
        ))
}

pub fn session(passives: PassiveSet) -> BattleSession {
    let player = PlayerRecord::new("Tester", &class());
    let monster_info = MonsterDescriptor::new("Shadow Wolf", 100, 10, 2).with_rewards(18, 10);
    BattleSession {
        seed: 7,
        nonce: 0,
        phase: Phase::PlayerTurn,
        round: 0,
        monster: MonsterState::from_descriptor(&monster_info),
        monster_info,
        limits: BattleLimits {
            max_hp: player.max_hp,
            max_mana: player.max_mana,
        },
        player,
        status: StatusBlock::default(),
        flags: BattleFlags::default(),
        passives,
        log: BattleLog::new(),
    }
}
