//! Battle state machine.
//!
//! Every step goes through [`BattleTransition`]'s pre-validate, apply,
//! post-validate pipeline against a copy of the session. Callers hold on to
//! the sessions they get back; the engine never mutates one it was handed.
mod command;
mod errors;
mod monster_turn;
mod outcome;
mod player_turn;
mod transition;

pub use command::{PlayerCommand, SkillRef};
pub use errors::{ActionError, TransitionPhase};
pub use outcome::{BattleOutcome, BattleReward, Settlement, victory_gold};
pub use transition::{BattleTransition, check_invariants};

use monster_turn::MonsterTurn;
use player_turn::PlayerAction;
use transition::drive_transition;

use crate::env::{BattleEnv, OracleError};
use crate::skills::PassiveSet;
use crate::state::{
    BattleFlags, BattleLimits, BattleLog, BattleSession, LogKind, MonsterDescriptor, MonsterState,
    Phase, PlayerRecord, StatusBlock,
};
use crate::stats::StatCalculator;

/// Runs battles against one environment.
#[derive(Clone, Copy, Debug)]
pub struct BattleEngine<'a> {
    env: BattleEnv<'a>,
}

impl<'a> BattleEngine<'a> {
    pub fn new(env: BattleEnv<'a>) -> Self {
        Self { env }
    }

    pub fn env(&self) -> &BattleEnv<'a> {
        &self.env
    }

    /// Class innate passive plus every passive unlocked in the class tree.
    ///
    /// # Errors
    ///
    /// Fails if the class or its tree is missing, or if the selection names
    /// a skill the tree does not contain.
    pub fn active_passives(&self, player: &PlayerRecord) -> Result<PassiveSet, OracleError> {
        let class = self.env.class(player.class)?;
        let innate = class.passive.flag();
        if player.skills.is_empty() {
            return Ok(innate);
        }

        let tree = self.env.skill_tree(player.class)?;
        if let Some(missing) = player.skills.ids().iter().find(|id| tree.skill(id).is_none()) {
            return Err(OracleError::SkillNotFound(missing.to_string()));
        }
        if !player.skills.is_consistent(tree) {
            tracing::warn!(player = %player.name, "skill selection does not follow tier order");
        }
        Ok(innate | player.skills.passives(tree))
    }

    /// Opens an encounter. The session starts on the player's turn.
    ///
    /// # Errors
    ///
    /// See [`BattleEngine::active_passives`].
    pub fn start(
        &self,
        player: &PlayerRecord,
        monster: MonsterDescriptor,
        seed: u64,
    ) -> Result<BattleSession, OracleError> {
        let passives = self.active_passives(player)?;
        let calc = StatCalculator::new(player, passives);
        let limits = BattleLimits {
            max_hp: calc.battle_max_hp(),
            max_mana: calc.battle_max_mana(),
        };

        let mut live = player.clone();
        live.hp = live.hp.clamp(1, limits.max_hp);
        live.mana = live.mana.min(limits.max_mana);

        let mut log = BattleLog::new();
        let intro = match &monster.boss_title {
            Some(title) => format!("{}, {title}, appears!", monster.name),
            None => format!("A wild {} appears!", monster.name),
        };
        log.push(LogKind::Info, intro);

        tracing::debug!(
            monster = %monster.name,
            boss = monster.is_boss(),
            passives = passives.bits().count_ones(),
            seed,
            "battle started"
        );

        Ok(BattleSession {
            seed,
            nonce: 0,
            phase: Phase::PlayerTurn,
            round: 0,
            player: live,
            monster: MonsterState::from_descriptor(&monster),
            monster_info: monster,
            status: StatusBlock::new(),
            flags: BattleFlags::default(),
            passives,
            limits,
            log,
        })
    }

    /// Resolves a player command. On success the session is either over or
    /// waiting for [`BattleEngine::monster_turn`].
    ///
    /// # Errors
    ///
    /// Rejections leave `session` as it was; see [`ActionError`].
    pub fn apply(
        &self,
        session: &BattleSession,
        command: &PlayerCommand,
    ) -> Result<BattleSession, ActionError> {
        let next = drive_transition(&PlayerAction::new(command), session, &self.env)?;
        tracing::debug!(
            command = command.as_str(),
            phase = %next.phase,
            nonce = next.nonce,
            "command accepted"
        );
        Ok(next)
    }

    /// Resolves the monster's automated turn.
    ///
    /// # Errors
    ///
    /// `NotMonsterTurn` or `BattleOver` if the session is not waiting on the monster.
    pub fn monster_turn(&self, session: &BattleSession) -> Result<BattleSession, ActionError> {
        let next = drive_transition(&MonsterTurn, session, &self.env)?;
        tracing::debug!(phase = %next.phase, round = next.round, "monster turn resolved");
        Ok(next)
    }

    /// Player command followed by the monster turn, if the battle goes on.
    ///
    /// # Errors
    ///
    /// Same as [`BattleEngine::apply`].
    pub fn step(
        &self,
        session: &BattleSession,
        command: &PlayerCommand,
    ) -> Result<BattleSession, ActionError> {
        let next = self.apply(session, command)?;
        if next.phase == Phase::MonsterTurn {
            self.monster_turn(&next)
        } else {
            Ok(next)
        }
    }

    /// Writes a finished battle back onto the permanent record.
    ///
    /// # Errors
    ///
    /// `BattleInProgress` if the session is not in a terminal phase.
    pub fn settle(
        &self,
        record: &PlayerRecord,
        session: &BattleSession,
    ) -> Result<Settlement, ActionError> {
        outcome::settle(record, session, &self.env)
    }
}
