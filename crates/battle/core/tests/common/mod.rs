//! Shared fixtures for the battle-core integration tests.
#![allow(dead_code)]

use battle_core::{
    ActiveSkill, BattleConfig, BattleEngine, BattleEnv, ClassDefinition, ClassId, ContentBundle,
    EffectRegistry, MonsterDescriptor, MonsterSkill, MonsterSkillEffect, PassiveKind,
    PlayerRecord, RngOracle, SkillDefinition, SkillTier, SkillTree,
};

/// Oracle that always returns the same value.
pub struct FixedRng(pub u32);

impl RngOracle for FixedRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        self.0
    }
}

fn class(
    id: ClassId,
    stats: (u32, u32, u32, u32),
    passive: PassiveKind,
    skill: (&str, ActiveSkill),
) -> ClassDefinition {
    let (max_hp, max_mana, attack, defense) = stats;
    ClassDefinition {
        id,
        name: id.to_string(),
        max_hp,
        max_mana,
        attack,
        defense,
        passive,
        passive_name: passive.to_string(),
        skill: SkillDefinition::active("class_skill", skill.0, skill.1),
    }
}

pub fn warrior_tree() -> SkillTree {
    let tier = |level, n: u32| {
        SkillTier::new(
            level,
            SkillDefinition::passive(&format!("war_t{n}a"), "Iron Skin", PassiveKind::IronSkin),
            SkillDefinition::active(
                &format!("war_t{n}b"),
                "Quake",
                ActiveSkill::new(10, 150, Some("quake")),
            ),
        )
    };
    SkillTree::new(ClassId::Warrior, vec![tier(2, 1), tier(4, 2), tier(6, 3)])
}

pub fn content() -> ContentBundle {
    ContentBundle::default()
        .with_class(class(
            ClassId::Berserker,
            (120, 30, 20, 5),
            PassiveKind::Rage,
            ("Reckless Swing", ActiveSkill::new(10, 200, Some("recoil"))),
        ))
        .with_class(class(
            ClassId::Warrior,
            (130, 30, 14, 10),
            PassiveKind::Fortify,
            ("Shield Bash", ActiveSkill::new(8, 150, Some("weaken"))),
        ))
        .with_class(class(
            ClassId::Thief,
            (90, 40, 16, 6),
            PassiveKind::Nimble,
            ("Backstab", ActiveSkill::new(8, 180, Some("pierce"))),
        ))
        .with_class(class(
            ClassId::Mage,
            (70, 80, 12, 4),
            PassiveKind::ArcaneMind,
            ("Arcane Bolt", ActiveSkill::new(12, 200, Some("true_damage"))),
        ))
        .with_skill_tree(warrior_tree())
        .with_monster_skill(MonsterSkill::new("bite", "Bite", 130, None))
        .with_monster_skill(MonsterSkill::new(
            "poison",
            "Poison Spit",
            60,
            Some(MonsterSkillEffect::Poison),
        ))
        .with_monster_skill(MonsterSkill::new(
            "screech",
            "Screech",
            80,
            Some(MonsterSkillEffect::LowerDefense),
        ))
        .with_monster_skill(MonsterSkill::new(
            "steal",
            "Steal",
            50,
            Some(MonsterSkillEffect::StealGold),
        ))
}

/// Owns everything a [`BattleEnv`] borrows.
pub struct World {
    pub content: ContentBundle,
    pub config: BattleConfig,
    pub effects: EffectRegistry,
}

impl World {
    pub fn new(config: BattleConfig) -> Self {
        Self {
            content: content(),
            config,
            effects: EffectRegistry::builtin(),
        }
    }

    pub fn engine<'a>(&'a self, rng: &'a dyn RngOracle) -> BattleEngine<'a> {
        BattleEngine::new(BattleEnv::new(&self.content, rng, &self.config, &self.effects))
    }

    pub fn player(&self, class: ClassId) -> PlayerRecord {
        let definition = self
            .content
            .classes
            .iter()
            .find(|definition| definition.id == class)
            .expect("fixture class");
        PlayerRecord::new("Tester", definition)
    }
}

pub fn dummy(max_hp: u32, attack: u32, defense: u32) -> MonsterDescriptor {
    MonsterDescriptor::new("Training Dummy", max_hp, attack, defense).with_rewards(10, 5)
}
