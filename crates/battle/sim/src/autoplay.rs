//! Player setup and a greedy command policy for unattended battles.

use anyhow::{Context, Result};
use battle_core::stats::effective_mana_cost;
use battle_core::{
    BattleSession, ContentBundle, ContentOracle, Dice, Item, ItemKind, PlayerCommand, PlayerRecord,
    RngOracle, exp_for_level, gain_experience,
};

use crate::config::SimConfig;

/// HP percentage below which the pilot drinks a healing potion.
const HEAL_BELOW_PCT: u32 = 35;

/// Builds a player of the configured class and level, with tree picks
/// along the configured path and a few potions.
pub fn build_player(
    content: &ContentBundle,
    config: &SimConfig,
    rng: &dyn RngOracle,
) -> Result<PlayerRecord> {
    let class = content
        .class(config.class)
        .with_context(|| format!("class {} is not defined in the content", config.class))?;
    let mut player = PlayerRecord::new("Wanderer", class);

    let mut dice = Dice::new(rng, config.seed, 0);
    while player.level < config.player_level {
        let needed = exp_for_level(player.level).saturating_sub(player.exp);
        gain_experience(&mut player, needed, &mut dice);
    }

    if let Some(tree) = content.skill_tree(config.class) {
        for (index, tier) in tree.tiers.iter().enumerate() {
            if tier.level > player.level {
                break;
            }
            let Some(choice) = tier.choices.get(config.tree_path.choice(index)) else {
                break;
            };
            player
                .skills
                .unlock(tree, player.level, &choice.id)
                .with_context(|| format!("unlocking {}", choice.id))?;
            tracing::debug!(skill = %choice.id, tier = index + 1, "tree skill unlocked");
        }
    }

    let potion = 30 + 8 * player.level;
    player.inventory = player
        .inventory
        .with_item(Item::consumable("Small Potion", potion, 0))
        .with_item(Item::consumable("Small Potion", potion, 0))
        .with_item(Item::consumable("Ether", 0, 20));
    Ok(player)
}

/// Greedy policy: heal when low, otherwise cast the strongest affordable
/// skill, otherwise attack.
pub struct AutoPilot<'a> {
    content: &'a ContentBundle,
}

impl<'a> AutoPilot<'a> {
    pub fn new(content: &'a ContentBundle) -> Self {
        Self { content }
    }

    pub fn choose(&self, session: &BattleSession) -> PlayerCommand {
        let player = &session.player;
        if player.hp * 100 < session.limits.max_hp * HEAL_BELOW_PCT {
            if let Some(index) = find_item(session, |heal, _| heal > 0) {
                return PlayerCommand::UseItem(index);
            }
        }

        if let Some(command) = self.strongest_skill(session) {
            return command;
        }

        if player.mana < session.limits.max_mana / 4 {
            if let Some(index) = find_item(session, |_, energy| energy > 0) {
                return PlayerCommand::UseItem(index);
            }
        }
        PlayerCommand::Attack
    }

    fn strongest_skill(&self, session: &BattleSession) -> Option<PlayerCommand> {
        let class = self.content.class(session.player.class)?;
        let mut candidates: Vec<(u32, PlayerCommand)> = Vec::new();

        if let Some(active) = class.skill.as_active() {
            candidates.push((active.mana_cost, PlayerCommand::class_skill()));
        }
        if let Some(tree) = self.content.skill_tree(session.player.class) {
            for id in session.player.skills.ids() {
                if let Some(active) = tree.skill(id).and_then(|skill| skill.as_active()) {
                    candidates.push((active.mana_cost, PlayerCommand::tree_skill(id.clone())));
                }
            }
        }

        candidates
            .into_iter()
            .filter(|(cost, _)| effective_mana_cost(*cost, session.passives) <= session.player.mana)
            .max_by_key(|(cost, _)| *cost)
            .map(|(_, command)| command)
    }
}

fn find_item(session: &BattleSession, wanted: impl Fn(u32, u32) -> bool) -> Option<usize> {
    session
        .player
        .inventory
        .items()
        .iter()
        .position(|item| {
            matches!(item.kind, ItemKind::Consumable { heal, energy } if wanted(heal, energy))
        })
}
