mod common;

use battle_core::engine::check_invariants;
use battle_core::{
    BattleConfig, ClassId, DefenseMode, Item, PcgRng, Phase, PlayerCommand, StatusBlock,
    calc_damage,
};
use common::{World, dummy};
use proptest::prelude::*;

fn defense_mode() -> impl Strategy<Value = DefenseMode> {
    prop_oneof![
        Just(DefenseMode::Full),
        (0u32..=100).prop_map(|keep_pct| DefenseMode::Pierce { keep_pct }),
        Just(DefenseMode::Ignore),
    ]
}

fn command() -> impl Strategy<Value = PlayerCommand> {
    prop_oneof![
        4 => Just(PlayerCommand::Attack),
        2 => Just(PlayerCommand::class_skill()),
        2 => Just(PlayerCommand::Defend),
        1 => (0usize..3).prop_map(PlayerCommand::UseItem),
        1 => Just(PlayerCommand::Flee),
    ]
}

fn class_id() -> impl Strategy<Value = ClassId> {
    prop_oneof![
        Just(ClassId::Berserker),
        Just(ClassId::Warrior),
        Just(ClassId::Thief),
        Just(ClassId::Mage),
    ]
}

proptest! {
    #[test]
    fn damage_is_always_at_least_one(
        attack in 0u32..10_000,
        defense in 0u32..10_000,
        mode in defense_mode(),
        variance in 850u32..=1150,
    ) {
        prop_assert!(calc_damage(attack, defense, mode, variance) >= 1);
    }

    #[test]
    fn true_damage_ignores_any_defense(
        attack in 0u32..10_000,
        low in 0u32..10_000,
        high in 0u32..10_000,
        variance in 850u32..=1150,
    ) {
        prop_assert_eq!(
            calc_damage(attack, low, DefenseMode::Ignore, variance),
            calc_damage(attack, high, DefenseMode::Ignore, variance)
        );
    }

    #[test]
    fn poison_counters_count_down_to_zero(turns in 0u32..20, max_hp in 1u32..5_000) {
        let mut status = StatusBlock::new();
        status.monster_poison = turns;
        status.player_poison = turns;

        for remaining in (0..turns).rev() {
            prop_assert!(status.tick_monster_poison(max_hp, 6).is_some());
            prop_assert!(status.tick_player_poison(max_hp, 5).is_some());
            prop_assert_eq!(status.monster_poison, remaining);
            prop_assert_eq!(status.player_poison, remaining);
        }
        prop_assert_eq!(status.tick_monster_poison(max_hp, 6), None);
        prop_assert_eq!(status.tick_player_poison(max_hp, 5), None);
        prop_assert_eq!(status.monster_poison, 0);
    }

    #[test]
    fn random_battles_keep_invariants(
        seed in any::<u64>(),
        class in class_id(),
        commands in prop::collection::vec(command(), 1..60),
    ) {
        let world = World::new(BattleConfig::new());
        let rng = PcgRng;
        let engine = world.engine(&rng);

        let mut player = world.player(class);
        player.gold = 40;
        player.inventory = player
            .inventory
            .with_item(Item::consumable("Health Potion", 30, 0))
            .with_item(Item::consumable("Mana Potion", 0, 20));
        let monster = dummy(180, 14, 4)
            .with_skill("bite")
            .with_skill("poison")
            .with_skill("screech")
            .with_skill("steal");

        let mut session = engine.start(&player, monster, seed).expect("start");
        prop_assert!(check_invariants(&session).is_ok());

        for command in &commands {
            if session.is_over() {
                break;
            }
            match engine.step(&session, command) {
                Ok(next) => {
                    prop_assert!(next.nonce > session.nonce);
                    prop_assert!(next.log.len() >= session.log.len());
                    session = next;
                }
                // Rejected commands leave the session untouched; keep going.
                Err(_) => continue,
            }
            prop_assert!(check_invariants(&session).is_ok());
            prop_assert!(session.status.player_poison <= 3);
        }

        if session.is_over() {
            let settlement = engine.settle(&player, &session).expect("settle");
            prop_assert!(settlement.player.hp <= settlement.player.max_hp);
            if session.phase == Phase::Defeat {
                prop_assert!(settlement.player.hp >= 1);
                prop_assert!(settlement.player.gold <= session.player.gold);
            }
        }
    }
}
