//! Severity classification shared by every battle-core error.
//!
//! The concrete enums (`ActionError`, `UnlockError`, `OracleError`) sit next
//! to the operations that return them. A rejected command never touches the
//! session it was given, so the caller is free to show the message and offer
//! another command.

use strum::{Display, IntoStaticStr};

/// How a caller should treat a rejected operation.
///
/// - **Recoverable**: legal in principle, not right now (mana short, HP full,
///   level too low)
/// - **Validation**: makes no sense in the current state (wrong turn, battle
///   over, skill not learned)
/// - **Internal**: content and state disagree; a bug somewhere upstream
/// - **Fatal**: the battle cannot proceed at all (class content missing)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, IntoStaticStr, Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    pub const fn is_recoverable(self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Internal and fatal errors point at broken content or engine state.
    pub const fn is_bug(self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Implemented by every battle-core error enum.
pub trait BattleError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable snake_case identifier of the variant, for logs and UIs.
    fn error_code(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severities_order_by_gravity() {
        assert!(ErrorSeverity::Recoverable < ErrorSeverity::Validation);
        assert!(ErrorSeverity::Internal < ErrorSeverity::Fatal);
        assert!(ErrorSeverity::Fatal.is_bug());
        assert!(!ErrorSeverity::Validation.is_bug());
        assert_eq!(ErrorSeverity::Recoverable.to_string(), "recoverable");
    }
}
