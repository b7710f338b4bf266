//! Oracle access errors.

use crate::error::{BattleError, ErrorSeverity};
use crate::state::ClassId;

/// Errors that occur when looking up content through the oracles.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// No class definition is registered for the class id.
    #[error("class definition '{0}' not found")]
    ClassNotFound(ClassId),

    /// No skill tree is registered for the class id.
    #[error("skill tree for class '{0}' not found")]
    SkillTreeNotFound(ClassId),

    /// A selected skill id is missing from the class tree.
    #[error("skill '{0}' not found")]
    SkillNotFound(String),
}

impl BattleError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            // Missing class data means the battle cannot be set up at all
            ClassNotFound(_) | SkillTreeNotFound(_) => ErrorSeverity::Fatal,
            // Dangling references point at inconsistent content
            SkillNotFound(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            ClassNotFound(_) => "ORACLE_CLASS_NOT_FOUND",
            SkillTreeNotFound(_) => "ORACLE_SKILL_TREE_NOT_FOUND",
            SkillNotFound(_) => "ORACLE_SKILL_NOT_FOUND",
        }
    }
}
