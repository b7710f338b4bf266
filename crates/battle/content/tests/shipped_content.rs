use battle_content::{ContentFactory, MonsterScaler, validate_content};
use battle_core::{
    BattleConfig, BattleEngine, BattleEnv, ClassId, ContentOracle, EffectRegistry, PcgRng,
    PlayerCommand, PlayerRecord, SkillId,
};

#[test]
fn shipped_content_cross_references_resolve() {
    let factory = ContentFactory::bundled();
    let bundle = factory.load_bundle().expect("bundle");
    let roster = factory.load_roster().expect("roster");

    validate_content(&bundle, &roster, &EffectRegistry::builtin()).expect("valid content");
}

#[test]
fn every_class_has_a_full_tree() {
    let bundle = ContentFactory::bundled().load_bundle().expect("bundle");

    assert_eq!(bundle.classes.len(), 5);
    assert_eq!(bundle.skill_trees.len(), 5);
    for class in &bundle.classes {
        let tree = bundle.skill_tree(class.id).expect("tree per class");
        assert_eq!(tree.tiers.len(), BattleConfig::MAX_TIERS, "{}", class.id);

        let levels: Vec<u32> = tree.tiers.iter().map(|tier| tier.level).collect();
        assert_eq!(levels, (1..=10).map(|n| n * 2).collect::<Vec<_>>());
        for tier in &tree.tiers {
            assert!(tier.choices[0].as_passive().is_some());
            assert!(tier.choices[1].as_active().is_some());
        }
    }

    let total: usize = bundle.skill_trees.iter().map(|tree| tree.skills().count()).sum();
    assert_eq!(total, 100);
}

#[test]
fn skill_numbers_survive_loading() {
    let bundle = ContentFactory::bundled().load_bundle().expect("bundle");
    let tree = bundle.skill_tree(ClassId::Berserker).expect("berserker tree");

    let execution = tree
        .skill(&SkillId::from("brs_t7b"))
        .and_then(|skill| skill.as_active())
        .expect("Execution");
    assert_eq!(execution.mana_cost, 16);
    assert_eq!(execution.multiplier_pct, 150);
    assert_eq!(execution.effect.as_deref(), Some("execute_25"));

    let mage = bundle.class(ClassId::Mage).expect("mage");
    let bolt = mage.skill.as_active().expect("class skill");
    assert_eq!(bolt.effect.as_deref(), Some("true_damage"));
    assert_eq!(bolt.multiplier_pct, 200);
}

#[test]
fn shipped_config_matches_defaults() {
    let config = ContentFactory::bundled().load_config().expect("config");
    assert_eq!(config, BattleConfig::new());
}

#[test]
fn bosses_scale_into_unfleeable_encounters() {
    let factory = ContentFactory::bundled();
    let roster = factory.load_roster().expect("roster");
    let rng = PcgRng;
    let scaler = MonsterScaler::new(&rng);

    assert_eq!(roster.monsters.len(), 10);
    for template in &roster.bosses {
        let boss = scaler.boss(template, 5, 11);
        assert!(boss.is_boss(), "{}", template.id);
        assert!(boss.max_hp >= template.hp * 2, "{}", template.id);
    }
}

#[test]
fn a_shipped_battle_plays_to_the_end() {
    let factory = ContentFactory::bundled();
    let bundle = factory.load_bundle().expect("bundle");
    let roster = factory.load_roster().expect("roster");
    let config = factory.load_config().expect("config");
    let effects = EffectRegistry::builtin();
    let rng = PcgRng;
    let engine = BattleEngine::new(BattleEnv::new(&bundle, &rng, &config, &effects));

    let class = bundle.class(ClassId::Warrior).expect("warrior");
    let player = PlayerRecord::new("Aria", class);
    let slime = roster.monster("slime").expect("slime");
    let monster = MonsterScaler::new(&rng).monster(slime, 1, 3);

    let mut session = engine.start(&player, monster, 3).expect("start");
    for _ in 0..100 {
        if session.is_over() {
            break;
        }
        session = engine.step(&session, &PlayerCommand::Attack).expect("attack");
    }
    assert!(session.is_over());

    let settlement = engine.settle(&player, &session).expect("settle");
    assert!(settlement.player.hp <= settlement.player.max_hp);
}
