mod common;

use battle_core::{
    ActionError, ActiveSkill, BattleConfig, ClassId, DefenseMode, LogKind, PassiveSet, PcgRng,
    Phase, PlayerCommand, SkillDefinition, SkillId, SkillSelection, UnlockError, calc_damage,
};
use common::{FixedRng, World, dummy, warrior_tree};

#[test]
fn attack_twenty_versus_defense_ten_lands_in_range() {
    for variance in 850..=1150 {
        let damage = calc_damage(20, 10, DefenseMode::Full, variance);
        assert!((12..=17).contains(&damage), "variance {variance} gave {damage}");
    }

    let world = World::new(BattleConfig::new());
    let rng = PcgRng;
    let engine = world.engine(&rng);
    let player = world.player(ClassId::Berserker);

    for seed in 0..256 {
        let session = engine.start(&player, dummy(1000, 1, 10), seed).expect("start");
        let next = engine.apply(&session, &PlayerCommand::Attack).expect("attack");
        let dealt = 1000 - next.monster.hp;
        assert!((12..=17).contains(&dealt), "seed {seed} dealt {dealt}");
    }
}

#[test]
fn poison_ticks_until_victory_mid_sequence() {
    let world = World::new(BattleConfig::new());
    let rng = FixedRng(u32::MAX);
    let engine = world.engine(&rng);
    let player = world.player(ClassId::Warrior);

    let mut session = engine.start(&player, dummy(1000, 1, 0), 5).expect("start");
    session.monster.hp = 150;
    session.status.monster_poison = 3;
    session.phase = Phase::MonsterTurn;

    // floor(1000 × 0.06) = 60 per tick
    let first = engine.monster_turn(&session).expect("first tick");
    assert_eq!(first.monster.hp, 90);
    assert_eq!(first.status.monster_poison, 2);
    assert_eq!(first.phase, Phase::PlayerTurn);

    let second = engine.step(&first, &PlayerCommand::Defend).expect("second tick");
    assert_eq!(second.monster.hp, 30);
    assert_eq!(second.status.monster_poison, 1);

    let braced = engine.apply(&second, &PlayerCommand::Defend).expect("defend");
    let before = braced.log.len();
    let third = engine.monster_turn(&braced).expect("third tick");
    assert_eq!(third.monster.hp, 0);
    assert_eq!(third.status.monster_poison, 0);
    assert_eq!(third.phase, Phase::Victory);

    // The monster never gets to strike once the tick kills it
    let kinds: Vec<_> = third.log.since(before).iter().map(|entry| entry.kind).collect();
    assert_eq!(kinds, [LogKind::MonsterDamage, LogKind::Victory]);
    assert_eq!(third.player.hp, second.player.hp);
}

#[test]
fn poison_on_a_nearly_dead_monster_wins_on_the_first_tick() {
    let world = World::new(BattleConfig::new());
    let rng = FixedRng(u32::MAX);
    let engine = world.engine(&rng);
    let player = world.player(ClassId::Warrior);

    let mut session = engine.start(&player, dummy(1000, 1, 0), 5).expect("start");
    session.monster.hp = 50;
    session.status.monster_poison = 3;
    session.phase = Phase::MonsterTurn;

    let next = engine.monster_turn(&session).expect("tick");
    assert_eq!(next.phase, Phase::Victory);
    assert_eq!(next.status.monster_poison, 2);
    assert_eq!(engine.monster_turn(&next), Err(ActionError::BattleOver));
}

#[test]
fn true_damage_ignores_defense() {
    let world = World::new(BattleConfig::new());
    let rng = PcgRng;
    let engine = world.engine(&rng);
    let player = world.player(ClassId::Mage);

    for seed in 0..128 {
        let armored = engine.start(&player, dummy(1000, 1, 50), seed).expect("start");
        let bare = engine.start(&player, dummy(1000, 1, 0), seed).expect("start");

        let armored = engine
            .apply(&armored, &PlayerCommand::class_skill())
            .expect("cast");
        let bare = engine.apply(&bare, &PlayerCommand::class_skill()).expect("cast");
        assert_eq!(armored.monster.hp, bare.monster.hp, "seed {seed}");
    }
}

#[test]
fn bosses_cannot_be_fled() {
    let world = World::new(BattleConfig::new());
    let rng = PcgRng;
    let engine = world.engine(&rng);
    let player = world.player(ClassId::Thief);

    for seed in 0..64 {
        let boss = dummy(500, 10, 5).with_boss_title("Lord of Bones");
        let session = engine.start(&player, boss, seed).expect("start");
        assert_eq!(
            engine.apply(&session, &PlayerCommand::Flee),
            Err(ActionError::FleeDisallowed)
        );
        assert_eq!(session.phase, Phase::PlayerTurn);
        assert_eq!(session.nonce, 0);
    }
}

#[test]
fn tier_three_before_tier_two_is_rejected() {
    let tree = warrior_tree();
    let selection = SkillSelection::new()
        .select(&tree, 10, &SkillId::from("war_t1a"))
        .expect("tier 1 pick");

    assert_eq!(
        selection.select(&tree, 10, &SkillId::from("war_t3a")),
        Err(UnlockError::PreviousTierMissing { tier: 3, missing: 2 })
    );
    assert_eq!(
        selection.select(&tree, 10, &SkillId::from("war_t1b")),
        Err(UnlockError::TierAlreadyChosen { tier: 1 })
    );
    assert_eq!(selection.ids(), &[SkillId::from("war_t1a")]);
}

#[test]
fn dodge_flag_and_charge_each_stop_one_hit() {
    let world = World::new(BattleConfig::new());
    let rng = FixedRng(u32::MAX);
    let engine = world.engine(&rng);
    let player = world.player(ClassId::Warrior);

    let mut session = engine.start(&player, dummy(1000, 30, 0), 9).expect("start");
    session.status.dodge_next = true;
    session.status.dodge_charges = 1;
    session.phase = Phase::MonsterTurn;

    let first = engine.monster_turn(&session).expect("shadow dodge");
    assert_eq!(first.player.hp, 130);
    assert!(!first.status.dodge_next);
    assert_eq!(first.status.dodge_charges, 1);

    let second = engine.step(&first, &PlayerCommand::Attack).expect("charge dodge");
    assert_eq!(second.player.hp, 130);
    assert_eq!(second.status.dodge_charges, 0);

    let third = engine.step(&second, &PlayerCommand::Attack).expect("hit lands");
    assert!(third.player.hp < 130);
}

#[test]
fn undying_will_fires_once() {
    let world = World::new(BattleConfig::new());
    let rng = FixedRng(u32::MAX);
    let engine = world.engine(&rng);
    let player = world.player(ClassId::Warrior);

    let mut session = engine.start(&player, dummy(5000, 500, 0), 9).expect("start");
    session.passives |= PassiveSet::UNDYING_WILL;
    session.phase = Phase::MonsterTurn;

    let saved = engine.monster_turn(&session).expect("lethal hit");
    assert_eq!(saved.player.hp, 1);
    assert_eq!(saved.phase, Phase::PlayerTurn);
    assert!(saved.flags.undying_will_used);

    let dead = engine.step(&saved, &PlayerCommand::Attack).expect("second lethal hit");
    assert_eq!(dead.player.hp, 0);
    assert_eq!(dead.phase, Phase::Defeat);
}

#[test]
fn enemy_debuffs_accumulate() {
    let world = World::new(BattleConfig::new());
    let rng = FixedRng(0);
    let engine = world.engine(&rng);
    let player = world.player(ClassId::Warrior);

    let mut session = engine
        .start(&player, dummy(5000, 4, 0).with_skill("screech"), 9)
        .expect("start");
    session.phase = Phase::MonsterTurn;

    let once = engine.monster_turn(&session).expect("screech");
    assert_eq!(once.status.defense_debuff, 2);
    let twice = engine.step(&once, &PlayerCommand::Defend).expect("screech again");
    assert_eq!(twice.status.defense_debuff, 4);
    assert!(twice.log.mentions("Your defense was lowered!"));
}

#[test]
fn three_turn_avatar_softens_exactly_three_strikes() {
    let world = World::new(BattleConfig::without_variance());
    let rng = FixedRng(u32::MAX);
    let engine = world.engine(&rng);
    let player = world.player(ClassId::Warrior);

    let mut session = engine.start(&player, dummy(5000, 20, 0), 3).expect("start");
    session.status.avatar_turns = 3;
    session.phase = Phase::MonsterTurn;

    let mut taken = Vec::new();
    let mut hp = session.player.hp;
    session = engine.monster_turn(&session).expect("first strike");
    taken.push(hp - session.player.hp);
    for _ in 0..3 {
        hp = session.player.hp;
        session = engine.step(&session, &PlayerCommand::Attack).expect("next strike");
        taken.push(hp - session.player.hp);
    }

    // DEF 10 → 15 under avatar: 20 - 7.5 = 12.5 → 12, plain 20 - 5 = 15
    assert_eq!(taken, [12, 12, 12, 15]);
    assert_eq!(session.status.avatar_turns, 0);
    let fades = session.log.iter().filter(|entry| entry.text == "Avatar of War fades.");
    assert_eq!(fades.count(), 1);
}

#[test]
fn two_turn_armor_break_covers_the_next_two_hits() {
    let mut world = World::new(BattleConfig::without_variance());
    let thief = world
        .content
        .classes
        .iter_mut()
        .find(|class| class.id == ClassId::Thief)
        .expect("fixture thief");
    thief.skill = SkillDefinition::active(
        "class_skill",
        "Sunder",
        ActiveSkill::new(5, 100, Some("armor_break")),
    );
    let rng = FixedRng(u32::MAX);
    let engine = world.engine(&rng);
    let player = world.player(ClassId::Thief);

    let mut session = engine.start(&player, dummy(5000, 1, 20), 3).expect("start");
    let mut dealt = Vec::new();
    let commands = [
        PlayerCommand::class_skill(),
        PlayerCommand::Attack,
        PlayerCommand::Attack,
        PlayerCommand::Attack,
    ];
    for command in &commands {
        let hp = session.monster.hp;
        session = engine.step(&session, command).expect("command");
        dealt.push(hp - session.monster.hp);
    }

    // ATK 16 vs DEF 20: 16 - 10 = 6; broken armor: 16
    assert_eq!(dealt, [6, 16, 16, 6]);
    assert_eq!(session.status.armor_break_turns, 0);
    assert!(session.log.mentions("armor recovers"));
}
