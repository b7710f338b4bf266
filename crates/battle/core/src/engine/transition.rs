use super::errors::{ActionError, TransitionPhase};
use crate::env::{BattleEnv, Dice};
use crate::error::BattleError;
use crate::state::{BattleSession, Phase};

/// Defines how one battle step (a player command or the monster turn)
/// produces the next session.
///
/// Hooks receive read-only access to the environment. `apply` runs on a
/// private copy of the session, so a failing hook never leaks a partially
/// mutated state.
pub trait BattleTransition {
    /// Validates pre-conditions using the session **before** mutation.
    fn pre_validate(
        &self,
        _session: &BattleSession,
        _env: &BattleEnv<'_>,
    ) -> Result<(), ActionError> {
        Ok(())
    }

    /// Applies the step. Implementations may assume `pre_validate` passed.
    fn apply(
        &self,
        session: &mut BattleSession,
        dice: &mut Dice<'_>,
        env: &BattleEnv<'_>,
    ) -> Result<(), ActionError>;

    /// Validates post-conditions using the session **after** mutation.
    fn post_validate(
        &self,
        session: &BattleSession,
        _env: &BattleEnv<'_>,
    ) -> Result<(), ActionError> {
        check_invariants(session)
    }
}

fn violated(reason: &'static str) -> ActionError {
    ActionError::InvariantViolated {
        phase: TransitionPhase::PostValidate,
        reason,
    }
}

/// Resource bounds and terminal-state consistency every published session
/// satisfies.
pub fn check_invariants(session: &BattleSession) -> Result<(), ActionError> {
    if session.player.hp > session.limits.max_hp {
        return Err(violated("player hp above battle max"));
    }
    if session.player.mana > session.limits.max_mana {
        return Err(violated("player mana above battle max"));
    }
    if session.monster.hp > session.monster.max_hp {
        return Err(violated("monster hp above max"));
    }
    if !session.monster.is_alive() && session.phase != Phase::Victory {
        return Err(violated("monster dead outside victory"));
    }
    if !session.player.is_alive() && session.phase != Phase::Defeat {
        return Err(violated("player dead outside defeat"));
    }
    Ok(())
}

fn rejected(phase: TransitionPhase, error: &ActionError) {
    tracing::debug!(phase = %phase, code = error.error_code(), %error, "transition rejected");
}

/// Runs the three phases against a copy of `session` and returns the copy.
///
/// The roll stream is keyed by the session seed and nonce; the nonce of the
/// returned session is advanced by one. On error `session` is untouched and
/// the copy is dropped.
pub(crate) fn drive_transition<T>(
    transition: &T,
    session: &BattleSession,
    env: &BattleEnv<'_>,
) -> Result<BattleSession, ActionError>
where
    T: BattleTransition + ?Sized,
{
    transition
        .pre_validate(session, env)
        .inspect_err(|error| rejected(TransitionPhase::PreValidate, error))?;

    let mut next = session.clone();
    let mut dice = Dice::new(env.rng(), next.seed, next.nonce);

    transition
        .apply(&mut next, &mut dice, env)
        .inspect_err(|error| rejected(TransitionPhase::Apply, error))?;

    transition
        .post_validate(&next, env)
        .inspect_err(|error| rejected(TransitionPhase::PostValidate, error))?;

    next.nonce += 1;
    Ok(next)
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use super::*;
    use crate::config::BattleConfig;
    use crate::effects::EffectRegistry;
    use crate::env::ContentBundle;
    use crate::skills::PassiveSet;
    use crate::test_support::{FixedRng, session};

    struct Counting<'a> {
        pre: &'a Cell<u32>,
        post: &'a Cell<u32>,
    }

    impl BattleTransition for Counting<'_> {
        fn pre_validate(
            &self,
            _session: &BattleSession,
            _env: &BattleEnv<'_>,
        ) -> Result<(), ActionError> {
            self.pre.set(self.pre.get() + 1);
            Ok(())
        }

        fn apply(
            &self,
            session: &mut BattleSession,
            _dice: &mut Dice<'_>,
            _env: &BattleEnv<'_>,
        ) -> Result<(), ActionError> {
            session.round += 1;
            Ok(())
        }

        fn post_validate(
            &self,
            session: &BattleSession,
            _env: &BattleEnv<'_>,
        ) -> Result<(), ActionError> {
            self.post.set(self.post.get() + 1);
            check_invariants(session)
        }
    }

    struct Overheal;

    impl BattleTransition for Overheal {
        fn apply(
            &self,
            session: &mut BattleSession,
            _dice: &mut Dice<'_>,
            _env: &BattleEnv<'_>,
        ) -> Result<(), ActionError> {
            session.player.hp = session.limits.max_hp + 1;
            Ok(())
        }
    }

    #[test]
    fn hooks_run_in_order_and_advance_nonce() {
        let content = ContentBundle::default();
        let config = BattleConfig::new();
        let effects = EffectRegistry::empty();
        let rng = FixedRng(0);
        let env = BattleEnv::new(&content, &rng, &config, &effects);

        let pre = Cell::new(0);
        let post = Cell::new(0);
        let start = session(PassiveSet::empty());
        let next = drive_transition(&Counting { pre: &pre, post: &post }, &start, &env)
            .expect("counting transition succeeds");

        assert_eq!((pre.get(), post.get()), (1, 1));
        assert_eq!(next.round, 1);
        assert_eq!(next.nonce, 1);
        assert_eq!(start.nonce, 0);
    }

    #[test]
    fn failed_post_validation_keeps_input() {
        let content = ContentBundle::default();
        let config = BattleConfig::new();
        let effects = EffectRegistry::empty();
        let rng = FixedRng(0);
        let env = BattleEnv::new(&content, &rng, &config, &effects);

        let start = session(PassiveSet::empty());
        let err = drive_transition(&Overheal, &start, &env).unwrap_err();
        assert!(matches!(
            err,
            ActionError::InvariantViolated {
                phase: TransitionPhase::PostValidate,
                ..
            }
        ));
        assert_eq!(start, session(PassiveSet::empty()));
    }
}
