//! Terminal results and write-back to the permanent player record.

use strum::{Display, IntoStaticStr};

use super::errors::ActionError;
use crate::env::{BattleEnv, Dice};
use crate::progression::{LevelUp, gain_experience};
use crate::skills::{PassiveKind, PassiveSet};
use crate::state::{BattleSession, Phase, PickupOutcome, PlayerRecord};
use crate::stats::percent_of;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleOutcome {
    Victory,
    Defeat,
    Fled,
}

impl BattleOutcome {
    pub fn from_phase(phase: Phase) -> Option<Self> {
        match phase {
            Phase::Victory => Some(Self::Victory),
            Phase::Defeat => Some(Self::Defeat),
            Phase::Fled => Some(Self::Fled),
            Phase::PlayerTurn | Phase::MonsterTurn => None,
        }
    }
}

/// Rewards granted by a victory.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleReward {
    pub exp: u32,
    /// Gold after Plunder and Master Thief.
    pub gold: u32,
    /// Pre-rolled drop; `Discarded` when the inventory was full.
    pub drop: Option<PickupOutcome>,
    pub level_ups: Vec<LevelUp>,
    pub boss: bool,
}

/// Result of settling a finished battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Settlement {
    pub outcome: BattleOutcome,
    /// The permanent record with the battle written back.
    pub player: PlayerRecord,
    /// Present on victory only.
    pub reward: Option<BattleReward>,
    /// Gold lost on defeat.
    pub gold_lost: u32,
}

/// Gold yield after Plunder (×1.5) and then Master Thief (×2).
pub fn victory_gold(base: u32, passives: PassiveSet) -> u32 {
    let mut gold = base;
    if passives.has(PassiveKind::Plunder) {
        gold = percent_of(gold, 150);
    }
    if passives.has(PassiveKind::MasterThief) {
        gold = gold.saturating_mul(2);
    }
    gold
}

/// Copies the battle-mutable parts of the live player onto the record,
/// clamping resources to the permanent maxima.
fn write_back(record: &PlayerRecord, live: &PlayerRecord) -> PlayerRecord {
    let mut player = record.clone();
    player.hp = live.hp.min(player.max_hp);
    player.mana = live.mana.min(player.max_mana);
    player.gold = live.gold;
    player.inventory = live.inventory.clone();
    player
}

pub(crate) fn settle(
    record: &PlayerRecord,
    session: &BattleSession,
    env: &BattleEnv<'_>,
) -> Result<Settlement, ActionError> {
    let outcome = BattleOutcome::from_phase(session.phase).ok_or(ActionError::BattleInProgress)?;
    let config = env.config();

    let settlement = match outcome {
        BattleOutcome::Victory => {
            let mut player = write_back(record, &session.player);
            let info = &session.monster_info;

            let gold = victory_gold(info.gold, session.passives);
            player.gold = player.gold.saturating_add(gold);
            let drop = info.drop.clone().map(|item| player.inventory.offer(item));

            let mut dice = Dice::new(env.rng(), session.seed, session.nonce);
            let level_ups = gain_experience(&mut player, info.exp, &mut dice);

            Settlement {
                outcome,
                player,
                reward: Some(BattleReward {
                    exp: info.exp,
                    gold,
                    drop,
                    level_ups,
                    boss: info.is_boss(),
                }),
                gold_lost: 0,
            }
        }
        BattleOutcome::Defeat => {
            let mut player = write_back(record, &session.player);
            let gold_lost = percent_of(player.gold, config.defeat_gold_loss_pct).min(player.gold);
            player.gold -= gold_lost;
            player.hp = percent_of(player.max_hp, config.defeat_hp_restore_pct).max(1);
            Settlement {
                outcome,
                player,
                reward: None,
                gold_lost,
            }
        }
        BattleOutcome::Fled => Settlement {
            outcome,
            player: record.clone(),
            reward: None,
            gold_lost: 0,
        },
    };

    tracing::debug!(
        outcome = %settlement.outcome,
        gold_lost = settlement.gold_lost,
        "battle settled"
    );
    Ok(settlement)
}
