/// Battle rule constants and tunable parameters.
///
/// Percentages are stored as integer percents (`50` = 50%) and the damage
/// variance as per-mille (`850` = ×0.85) so every formula stays in integer
/// arithmetic and replays bit-for-bit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Lower bound of the damage variance roll (per-mille, inclusive).
    pub variance_min_permille: u32,
    /// Upper bound of the damage variance roll (per-mille, inclusive).
    pub variance_max_permille: u32,
    /// Base chance that a flee attempt succeeds.
    pub flee_chance_pct: u32,
    /// Chance that a monster with declared skills uses one instead of a plain attack.
    pub monster_skill_chance_pct: u32,
    /// Poison tick on the player, as a percent of the permanent max HP.
    pub player_poison_pct: u32,
    /// Poison tick on the monster, as a percent of its max HP.
    pub monster_poison_pct: u32,
    /// Doom tick on the monster, as a percent of its max HP.
    pub monster_doom_pct: u32,
    /// Turns of poison a monster skill inflicts on the player.
    pub enemy_poison_turns: u32,
    /// Debuff magnitude added by one enemy debuff skill.
    pub enemy_debuff_step: u32,
    /// Percent of incoming damage kept while defending (no passives).
    pub defend_keep_pct: u32,
    /// Percent of gold lost on defeat.
    pub defeat_gold_loss_pct: u32,
    /// Percent of max HP the player is restored to after a defeat.
    pub defeat_hp_restore_pct: u32,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    /// Number of equipment slots on a player.
    pub const EQUIPMENT_SLOTS: usize = 6;
    /// Number of choices offered by one skill tree tier.
    pub const TIER_CHOICES: usize = 2;
    /// Maximum number of tiers in a class skill tree.
    pub const MAX_TIERS: usize = 10;
    /// Maximum number of skills a monster may declare.
    pub const MAX_MONSTER_SKILLS: usize = 4;
    /// Default inventory capacity for new players.
    pub const DEFAULT_INVENTORY_CAPACITY: usize = 20;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_VARIANCE_MIN_PERMILLE: u32 = 850;
    pub const DEFAULT_VARIANCE_MAX_PERMILLE: u32 = 1150;
    pub const DEFAULT_FLEE_CHANCE_PCT: u32 = 50;
    pub const DEFAULT_MONSTER_SKILL_CHANCE_PCT: u32 = 30;
    pub const DEFAULT_PLAYER_POISON_PCT: u32 = 5;
    pub const DEFAULT_MONSTER_POISON_PCT: u32 = 6;
    pub const DEFAULT_MONSTER_DOOM_PCT: u32 = 8;
    pub const DEFAULT_ENEMY_POISON_TURNS: u32 = 3;
    pub const DEFAULT_ENEMY_DEBUFF_STEP: u32 = 2;
    pub const DEFAULT_DEFEND_KEEP_PCT: u32 = 50;
    pub const DEFAULT_DEFEAT_GOLD_LOSS_PCT: u32 = 20;
    pub const DEFAULT_DEFEAT_HP_RESTORE_PCT: u32 = 30;

    pub fn new() -> Self {
        Self {
            variance_min_permille: Self::DEFAULT_VARIANCE_MIN_PERMILLE,
            variance_max_permille: Self::DEFAULT_VARIANCE_MAX_PERMILLE,
            flee_chance_pct: Self::DEFAULT_FLEE_CHANCE_PCT,
            monster_skill_chance_pct: Self::DEFAULT_MONSTER_SKILL_CHANCE_PCT,
            player_poison_pct: Self::DEFAULT_PLAYER_POISON_PCT,
            monster_poison_pct: Self::DEFAULT_MONSTER_POISON_PCT,
            monster_doom_pct: Self::DEFAULT_MONSTER_DOOM_PCT,
            enemy_poison_turns: Self::DEFAULT_ENEMY_POISON_TURNS,
            enemy_debuff_step: Self::DEFAULT_ENEMY_DEBUFF_STEP,
            defend_keep_pct: Self::DEFAULT_DEFEND_KEEP_PCT,
            defeat_gold_loss_pct: Self::DEFAULT_DEFEAT_GOLD_LOSS_PCT,
            defeat_hp_restore_pct: Self::DEFAULT_DEFEAT_HP_RESTORE_PCT,
        }
    }

    /// Returns a config whose variance roll always yields ×1.0.
    ///
    /// Useful for content balancing tools that want expected-value damage.
    pub fn without_variance() -> Self {
        Self {
            variance_min_permille: 1000,
            variance_max_permille: 1000,
            ..Self::new()
        }
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
