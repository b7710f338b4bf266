//! Simulation parameters read from the environment.
use std::env;
use std::path::PathBuf;

use battle_core::ClassId;

/// Which choice to take at each unlocked skill tree tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TreePath {
    /// Always the passive (first) choice.
    Passive,
    /// Always the active (second) choice.
    Active,
    /// Passive on odd tiers, active on even tiers.
    #[default]
    Alternate,
}

impl TreePath {
    /// Choice index for a zero-based tier index.
    pub fn choice(self, tier_index: usize) -> usize {
        match self {
            TreePath::Passive => 0,
            TreePath::Active => 1,
            TreePath::Alternate => tier_index % 2,
        }
    }
}

impl std::str::FromStr for TreePath {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "passive" => Ok(TreePath::Passive),
            "active" => Ok(TreePath::Active),
            "alternate" | "mixed" => Ok(TreePath::Alternate),
            other => Err(format!("unknown tree path '{other}'")),
        }
    }
}

/// Parameters of one simulated battle.
#[derive(Clone, Debug)]
pub struct SimConfig {
    pub seed: u64,
    pub class: ClassId,
    /// Monster or boss template id.
    pub monster: String,
    pub area_level: u32,
    pub player_level: u32,
    pub tree_path: TreePath,
    /// Data directory; the content shipped with `battle-content` when unset.
    pub content_dir: Option<PathBuf>,
    /// Print the settlement as JSON instead of the narrated log.
    pub json: bool,
    /// Safety cap on player commands.
    pub max_turns: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            class: ClassId::Warrior,
            monster: "wolf".to_string(),
            area_level: 1,
            player_level: 1,
            tree_path: TreePath::default(),
            content_dir: None,
            json: false,
            max_turns: 200,
        }
    }
}

impl SimConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BATTLE_SEED` - Session seed (default: 1)
    /// - `BATTLE_CLASS` - Player class (default: warrior)
    /// - `BATTLE_MONSTER` - Monster or boss id (default: wolf)
    /// - `BATTLE_AREA_LEVEL` - Encounter level used for scaling (default: 1)
    /// - `BATTLE_PLAYER_LEVEL` - Player level before the fight (default: 1)
    /// - `BATTLE_TREE_PATH` - passive, active or alternate (default: alternate)
    /// - `BATTLE_CONTENT_DIR` - Content data directory (default: bundled data)
    /// - `BATTLE_JSON` - Print the settlement as JSON (default: false)
    /// - `BATTLE_MAX_TURNS` - Command cap (default: 200)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(seed) = read_env::<u64>("BATTLE_SEED") {
            config.seed = seed;
        }
        if let Some(class) = read_env::<ClassId>("BATTLE_CLASS") {
            config.class = class;
        }
        if let Ok(monster) = env::var("BATTLE_MONSTER") {
            config.monster = monster;
        }
        if let Some(level) = read_env::<u32>("BATTLE_AREA_LEVEL") {
            config.area_level = level.max(1);
        }
        if let Some(level) = read_env::<u32>("BATTLE_PLAYER_LEVEL") {
            config.player_level = level.max(1);
        }
        if let Some(path) = read_env::<TreePath>("BATTLE_TREE_PATH") {
            config.tree_path = path;
        }
        config.content_dir = env::var("BATTLE_CONTENT_DIR").ok().map(PathBuf::from);
        if let Some(json) = read_env_bool("BATTLE_JSON") {
            config.json = json;
        }
        if let Some(turns) = read_env::<u32>("BATTLE_MAX_TURNS") {
            config.max_turns = turns.max(1);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    match env::var(key).ok()?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
