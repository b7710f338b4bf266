//! Cross-reference checks over a loaded content set.

use battle_core::{BattleConfig, ContentBundle, ContentOracle, EffectRegistry, SkillDefinition};

use crate::loaders::LoadResult;
use crate::scaling::MonsterRoster;

/// Checks that every reference between catalogs resolves:
///
/// - each skill tree belongs to a defined class
/// - each active skill names an effect the registry knows
/// - each monster skill id exists and no monster declares more skills than a
///   battle holds
///
/// All problems are reported together.
pub fn validate_content(
    bundle: &ContentBundle,
    roster: &MonsterRoster,
    effects: &EffectRegistry,
) -> LoadResult<()> {
    let mut problems = Vec::new();

    for tree in &bundle.skill_trees {
        if bundle.class(tree.class).is_none() {
            problems.push(format!("skill tree for undefined class {}", tree.class));
        }
    }

    let skills = bundle
        .classes
        .iter()
        .map(|class| &class.skill)
        .chain(bundle.skill_trees.iter().flat_map(|tree| tree.skills()));
    for skill in skills {
        check_effect(skill, effects, &mut problems);
    }

    for template in roster.templates() {
        if template.skills.len() > BattleConfig::MAX_MONSTER_SKILLS {
            problems.push(format!(
                "monster {} declares {} skills (max {})",
                template.id,
                template.skills.len(),
                BattleConfig::MAX_MONSTER_SKILLS
            ));
        }
        for id in &template.skills {
            if bundle.monster_skill(id).is_none() {
                problems.push(format!("monster {} uses unknown skill {}", template.id, id));
            }
        }
    }

    if problems.is_empty() {
        return Ok(());
    }
    for problem in &problems {
        tracing::warn!(%problem, "content cross-reference failed");
    }
    anyhow::bail!("Content validation failed:\n  {}", problems.join("\n  "))
}

fn check_effect(skill: &SkillDefinition, effects: &EffectRegistry, problems: &mut Vec<String>) {
    let Some(effect) = skill.as_active().and_then(|active| active.effect.as_deref()) else {
        return;
    };
    if !effects.contains(effect) {
        problems.push(format!("skill {} uses unknown effect {}", skill.id, effect));
    }
}

#[cfg(test)]
mod tests {
    use battle_core::{ActiveSkill, ClassId, SkillTier, SkillTree};

    use super::*;
    use crate::scaling::MonsterTemplate;

    fn tree_with_effect(effect: &str) -> SkillTree {
        SkillTree::new(
            ClassId::Mage,
            vec![SkillTier::new(
                2,
                SkillDefinition::passive(
                    "m1a",
                    "Mana Shield",
                    battle_core::PassiveKind::ManaShield,
                ),
                SkillDefinition::active("m1b", "Fireball", ActiveSkill::new(10, 200, Some(effect))),
            )],
        )
    }

    #[test]
    fn reports_every_problem_at_once() {
        let bundle = ContentBundle::default().with_skill_tree(tree_with_effect("fireworks"));
        let roster = MonsterRoster {
            monsters: vec![MonsterTemplate {
                id: "imp".into(),
                name: "Imp".into(),
                hp: 10,
                attack: 3,
                defense: 0,
                exp: 5,
                gold: 2,
                skills: vec!["cackle".into()],
                title: None,
                drop: None,
            }],
            bosses: Vec::new(),
        };

        let err = validate_content(&bundle, &roster, &EffectRegistry::builtin()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("undefined class mage"));
        assert!(message.contains("unknown effect fireworks"));
        assert!(message.contains("unknown skill cackle"));
    }

    #[test]
    fn empty_content_is_valid() {
        let result = validate_content(
            &ContentBundle::default(),
            &MonsterRoster::default(),
            &EffectRegistry::builtin(),
        );
        assert!(result.is_ok());
    }
}
