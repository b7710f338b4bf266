//! Error types for the battle transition pipeline.

use crate::env::OracleError;
use crate::error::{BattleError, ErrorSeverity};
use crate::skills::SkillId;

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

impl core::fmt::Display for TransitionPhase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rejected battle command or turn.
///
/// Whenever one of these is returned the session handed to the engine is
/// unchanged.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("it is not the player's turn")]
    NotPlayerTurn,

    #[error("it is not the monster's turn")]
    NotMonsterTurn,

    #[error("the battle is already over")]
    BattleOver,

    #[error("the battle is still in progress")]
    BattleInProgress,

    #[error("insufficient mana: need {required}, have {available}")]
    InsufficientMana { required: u32, available: u32 },

    #[error("skill '{0}' is not unlocked or not active")]
    UnknownSkill(SkillId),

    #[error("cannot flee from a boss")]
    FleeDisallowed,

    #[error("no item in inventory slot {0}")]
    NoSuchItem(usize),

    #[error("item in inventory slot {0} is not a consumable")]
    NotConsumable(usize),

    #[error("nothing to restore")]
    AlreadyFull,

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("{phase} invariant violated: {reason}")]
    InvariantViolated {
        phase: TransitionPhase,
        reason: &'static str,
    },
}

impl ActionError {
    /// Text a UI shows for the rejection.
    pub fn message(&self) -> &'static str {
        match self {
            ActionError::NotPlayerTurn | ActionError::NotMonsterTurn => "Wait for your turn!",
            ActionError::BattleOver => "The battle is over.",
            ActionError::BattleInProgress => "The battle is still going!",
            ActionError::InsufficientMana { .. } => "Not enough mana!",
            ActionError::UnknownSkill(_) => "You don't know that skill.",
            ActionError::FleeDisallowed => "You cannot flee from a boss!",
            ActionError::NoSuchItem(_) => "No such item!",
            ActionError::NotConsumable(_) => "You can't use that in battle!",
            ActionError::AlreadyFull => "HP is already full!",
            ActionError::Oracle(_) | ActionError::InvariantViolated { .. } => {
                "Something went wrong."
            }
        }
    }
}

impl BattleError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ActionError::InsufficientMana { .. }
            | ActionError::FleeDisallowed
            | ActionError::AlreadyFull => ErrorSeverity::Recoverable,
            ActionError::NotPlayerTurn
            | ActionError::NotMonsterTurn
            | ActionError::BattleOver
            | ActionError::BattleInProgress
            | ActionError::UnknownSkill(_)
            | ActionError::NoSuchItem(_)
            | ActionError::NotConsumable(_) => ErrorSeverity::Validation,
            ActionError::Oracle(err) => err.severity(),
            ActionError::InvariantViolated { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ActionError::NotPlayerTurn => "ACTION_NOT_PLAYER_TURN",
            ActionError::NotMonsterTurn => "ACTION_NOT_MONSTER_TURN",
            ActionError::BattleOver => "ACTION_BATTLE_OVER",
            ActionError::BattleInProgress => "ACTION_BATTLE_IN_PROGRESS",
            ActionError::InsufficientMana { .. } => "ACTION_INSUFFICIENT_MANA",
            ActionError::UnknownSkill(_) => "ACTION_UNKNOWN_SKILL",
            ActionError::FleeDisallowed => "ACTION_FLEE_DISALLOWED",
            ActionError::NoSuchItem(_) => "ACTION_NO_SUCH_ITEM",
            ActionError::NotConsumable(_) => "ACTION_NOT_CONSUMABLE",
            ActionError::AlreadyFull => "ACTION_ALREADY_FULL",
            ActionError::Oracle(err) => err.error_code(),
            ActionError::InvariantViolated { .. } => "ACTION_INVARIANT_VIOLATED",
        }
    }
}
