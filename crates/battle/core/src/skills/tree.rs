//! Class skill trees and the append-only player selection.
//!
//! A tree is an ordered list of tiers; each tier offers exactly two mutually
//! exclusive choices. A selection is valid when its n-th entry belongs to the
//! n-th tier, which is what makes "earlier tiers first" and "one choice per
//! tier" checkable without scanning the whole tree.

use arrayvec::ArrayVec;

use super::{PassiveSet, SkillDefinition, SkillId};
use crate::config::BattleConfig;
use crate::error::{BattleError, ErrorSeverity};
use crate::state::ClassId;

/// One level-gated step of a skill tree.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillTier {
    /// Minimum player level to pick from this tier.
    pub level: u32,
    pub choices: ArrayVec<SkillDefinition, { BattleConfig::TIER_CHOICES }>,
}

impl SkillTier {
    pub fn new(level: u32, first: SkillDefinition, second: SkillDefinition) -> Self {
        let mut choices = ArrayVec::new();
        choices.push(first);
        choices.push(second);
        Self { level, choices }
    }

    pub fn offers(&self, id: &SkillId) -> bool {
        self.choices.iter().any(|choice| &choice.id == id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillTree {
    pub class: ClassId,
    pub tiers: Vec<SkillTier>,
}

impl SkillTree {
    pub fn new(class: ClassId, tiers: Vec<SkillTier>) -> Self {
        Self { class, tiers }
    }

    /// Finds a skill and the index of its tier.
    pub fn locate(&self, id: &SkillId) -> Option<(usize, &SkillDefinition)> {
        self.tiers.iter().enumerate().find_map(|(index, tier)| {
            tier.choices
                .iter()
                .find(|choice| &choice.id == id)
                .map(|choice| (index, choice))
        })
    }

    pub fn skill(&self, id: &SkillId) -> Option<&SkillDefinition> {
        self.locate(id).map(|(_, skill)| skill)
    }

    pub fn skills(&self) -> impl Iterator<Item = &SkillDefinition> {
        self.tiers.iter().flat_map(|tier| tier.choices.iter())
    }

    /// Checks structural rules: tier count bound, two choices per tier,
    /// strictly ascending level gates, no duplicate ids.
    pub fn is_well_formed(&self) -> bool {
        if self.tiers.is_empty() || self.tiers.len() > BattleConfig::MAX_TIERS {
            return false;
        }
        let full_tiers = self
            .tiers
            .iter()
            .all(|tier| tier.choices.len() == BattleConfig::TIER_CHOICES);
        let ascending = self.tiers.windows(2).all(|pair| pair[0].level < pair[1].level);
        let mut ids: Vec<&SkillId> = self.skills().map(|skill| &skill.id).collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        full_tiers && ascending && ids.len() == total
    }
}

/// Reasons a skill selection is rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnlockError {
    #[error("skill '{0}' is not part of this class tree")]
    UnknownSkill(SkillId),

    #[error("skill '{0}' is already unlocked")]
    AlreadyUnlocked(SkillId),

    #[error("tier {tier} already has a selection")]
    TierAlreadyChosen { tier: usize },

    #[error("tier {tier} requires a selection in tier {missing} first")]
    PreviousTierMissing { tier: usize, missing: usize },

    #[error("tier {tier} requires level {required} (player is level {level})")]
    LevelTooLow {
        tier: usize,
        required: u32,
        level: u32,
    },
}

impl BattleError for UnlockError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            UnlockError::LevelTooLow { .. } => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            UnlockError::UnknownSkill(_) => "UNLOCK_UNKNOWN_SKILL",
            UnlockError::AlreadyUnlocked(_) => "UNLOCK_ALREADY_UNLOCKED",
            UnlockError::TierAlreadyChosen { .. } => "UNLOCK_TIER_ALREADY_CHOSEN",
            UnlockError::PreviousTierMissing { .. } => "UNLOCK_PREVIOUS_TIER_MISSING",
            UnlockError::LevelTooLow { .. } => "UNLOCK_LEVEL_TOO_LOW",
        }
    }
}

/// Ordered, append-only list of chosen tree skills.
///
/// Entry `n` is the choice made in tier `n` (0-based).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SkillSelection {
    ids: Vec<SkillId>,
}

impl SkillSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &[SkillId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &SkillId) -> bool {
        self.ids.contains(id)
    }

    /// Returns a new selection with `id` appended, or the reason it cannot be.
    ///
    /// `self` is never modified.
    pub fn select(
        &self,
        tree: &SkillTree,
        level: u32,
        id: &SkillId,
    ) -> Result<SkillSelection, UnlockError> {
        let (tier_index, _) = tree
            .locate(id)
            .ok_or_else(|| UnlockError::UnknownSkill(id.clone()))?;
        let tier_number = tier_index + 1;

        if self.contains(id) {
            return Err(UnlockError::AlreadyUnlocked(id.clone()));
        }
        if tier_index < self.ids.len() {
            return Err(UnlockError::TierAlreadyChosen { tier: tier_number });
        }
        if tier_index > self.ids.len() {
            return Err(UnlockError::PreviousTierMissing {
                tier: tier_number,
                missing: self.ids.len() + 1,
            });
        }
        let required = tree.tiers[tier_index].level;
        if level < required {
            return Err(UnlockError::LevelTooLow {
                tier: tier_number,
                required,
                level,
            });
        }

        let mut next = self.clone();
        next.ids.push(id.clone());
        Ok(next)
    }

    /// In-place variant of [`SkillSelection::select`]; unchanged on error.
    pub fn unlock(
        &mut self,
        tree: &SkillTree,
        level: u32,
        id: &SkillId,
    ) -> Result<(), UnlockError> {
        *self = self.select(tree, level, id)?;
        Ok(())
    }

    /// Checks the ordering invariant: entry `n` belongs to tier `n`.
    pub fn is_consistent(&self, tree: &SkillTree) -> bool {
        self.ids.len() <= tree.tiers.len()
            && self
                .ids
                .iter()
                .zip(&tree.tiers)
                .all(|(id, tier)| tier.offers(id))
    }

    /// Passives contributed by the selected tree skills.
    pub fn passives(&self, tree: &SkillTree) -> PassiveSet {
        PassiveSet::from_kinds(
            self.ids
                .iter()
                .filter_map(|id| tree.skill(id))
                .filter_map(SkillDefinition::as_passive),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::{ActiveSkill, PassiveKind};

    fn tree() -> SkillTree {
        SkillTree::new(
            ClassId::Warrior,
            vec![
                SkillTier::new(
                    2,
                    SkillDefinition::passive("t1a", "Iron Skin", PassiveKind::IronSkin),
                    SkillDefinition::active(
                        "t1b",
                        "War Cry",
                        ActiveSkill::new(8, 80, Some("war_cry")),
                    ),
                ),
                SkillTier::new(
                    4,
                    SkillDefinition::passive("t2a", "Bulwark", PassiveKind::Bulwark),
                    SkillDefinition::active(
                        "t2b",
                        "Counter",
                        ActiveSkill::new(10, 200, Some("counter")),
                    ),
                ),
                SkillTier::new(
                    6,
                    SkillDefinition::passive("t3a", "Unbreakable", PassiveKind::Unbreakable),
                    SkillDefinition::active(
                        "t3b",
                        "Quake",
                        ActiveSkill::new(15, 220, Some("quake")),
                    ),
                ),
            ],
        )
    }

    #[test]
    fn tiers_unlock_in_order() {
        let tree = tree();
        let selection = SkillSelection::new()
            .select(&tree, 10, &"t1a".into())
            .and_then(|s| s.select(&tree, 10, &"t2b".into()))
            .and_then(|s| s.select(&tree, 10, &"t3a".into()));
        let selection = selection.expect("ordered picks are valid");

        assert_eq!(selection.len(), 3);
        assert!(selection.is_consistent(&tree));
        assert_eq!(
            selection.passives(&tree),
            PassiveSet::IRON_SKIN | PassiveSet::UNBREAKABLE
        );
    }

    #[test]
    fn skipping_a_tier_is_rejected() {
        let tree = tree();
        let selection = SkillSelection::new()
            .select(&tree, 10, &"t1a".into())
            .expect("tier 1 pick");

        let err = selection.select(&tree, 10, &"t3a".into()).unwrap_err();
        assert_eq!(err, UnlockError::PreviousTierMissing { tier: 3, missing: 2 });
        // Original selection untouched
        assert_eq!(selection.ids(), &[SkillId::from("t1a")]);
    }

    #[test]
    fn second_choice_in_same_tier_is_rejected() {
        let tree = tree();
        let mut selection = SkillSelection::new();
        selection.unlock(&tree, 2, &"t1a".into()).expect("tier 1 pick");

        assert_eq!(
            selection.unlock(&tree, 2, &"t1b".into()),
            Err(UnlockError::TierAlreadyChosen { tier: 1 })
        );
        assert_eq!(
            selection.unlock(&tree, 2, &"t1a".into()),
            Err(UnlockError::AlreadyUnlocked("t1a".into()))
        );
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn level_gate_and_unknown_ids() {
        let tree = tree();
        let selection = SkillSelection::new();
        assert_eq!(
            selection.select(&tree, 1, &"t1a".into()),
            Err(UnlockError::LevelTooLow {
                tier: 1,
                required: 2,
                level: 1
            })
        );
        assert_eq!(
            selection.select(&tree, 20, &"nope".into()),
            Err(UnlockError::UnknownSkill("nope".into()))
        );
    }

    #[test]
    fn well_formed_tree() {
        let mut tree = tree();
        assert!(tree.is_well_formed());
        tree.tiers[2].level = 1;
        assert!(!tree.is_well_formed());
    }
}
