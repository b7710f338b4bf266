//! Battle simulator binary.
//!
//! Loads the battle content, builds a player and a scaled monster from
//! environment parameters and auto-plays one seeded battle, printing the
//! narrated log (or a JSON report) to stdout. Diagnostics go to stderr.
//!
//! # Examples
//!
//! ```bash
//! BATTLE_CLASS=mage BATTLE_MONSTER=golem BATTLE_AREA_LEVEL=4 BATTLE_PLAYER_LEVEL=6 \
//!     cargo run -p battle-sim
//!
//! RUST_LOG=battle_core=debug BATTLE_JSON=1 cargo run -p battle-sim
//! ```

mod autoplay;
mod config;

use anyhow::{Result, bail};
use battle_content::{ContentFactory, MonsterRoster, MonsterScaler, validate_content};
use battle_core::{
    BattleEngine, BattleEnv, EffectRegistry, MonsterDescriptor, PcgRng, PlayerCommand,
    RngOracle,
};
use tracing_subscriber::EnvFilter;

use crate::autoplay::{AutoPilot, build_player};
use crate::config::SimConfig;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = SimConfig::from_env();
    setup_logging()?;

    tracing::info!(
        seed = config.seed,
        class = %config.class,
        monster = %config.monster,
        area_level = config.area_level,
        "Starting battle simulation"
    );
    run(&config)
}

/// Installs a stderr subscriber filtered by `RUST_LOG` (default `info`).
fn setup_logging() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))
}

fn run(config: &SimConfig) -> Result<()> {
    let factory = match &config.content_dir {
        Some(dir) => ContentFactory::new(dir),
        None => ContentFactory::bundled(),
    };
    tracing::debug!(dir = %factory.data_dir().display(), "Loading content");

    let battle_config = factory.load_config()?;
    let content = factory.load_bundle()?;
    let roster = factory.load_roster()?;
    let effects = EffectRegistry::builtin();
    validate_content(&content, &roster, &effects)?;

    let rng = PcgRng;
    let player = build_player(&content, config, &rng)?;
    let monster = scale_monster(&roster, config, &rng)?;
    tracing::info!(
        level = player.level,
        skills = player.skills.len(),
        monster = %monster.name,
        boss = monster.is_boss(),
        "Combatants ready"
    );

    let engine = BattleEngine::new(BattleEnv::new(&content, &rng, &battle_config, &effects));
    let pilot = AutoPilot::new(&content);
    let mut session = engine.start(&player, monster, config.seed)?;

    let mut turns = 0;
    while !session.is_over() {
        if turns >= config.max_turns {
            bail!("Battle still running after {} commands", config.max_turns);
        }
        turns += 1;

        let command = pilot.choose(&session);
        session = match engine.step(&session, &command) {
            Ok(next) => next,
            Err(error) => {
                tracing::warn!(
                    command = command.as_str(),
                    %error,
                    "Command rejected, attacking instead"
                );
                engine.step(&session, &PlayerCommand::Attack)?
            }
        };
    }

    let settlement = engine.settle(&player, &session)?;
    tracing::info!(outcome = %settlement.outcome, rounds = session.round, "Battle finished");

    if config.json {
        let report = serde_json::json!({
            "seed": config.seed,
            "rounds": session.round,
            "log": session.log.entries(),
            "settlement": settlement,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for entry in session.log.iter() {
            println!("{:>10} | {}", entry.kind, entry.text);
        }
        println!();
        println!(
            "{} after {} rounds: HP {}/{}, gold {} (lost {}), level {}",
            settlement.outcome,
            session.round,
            settlement.player.hp,
            settlement.player.max_hp,
            settlement.player.gold,
            settlement.gold_lost,
            settlement.player.level,
        );
        if let Some(reward) = &settlement.reward {
            println!(
                "Rewards: {} exp, {} gold, {} level-up(s)",
                reward.exp,
                reward.gold,
                reward.level_ups.len()
            );
        }
    }
    Ok(())
}

/// Looks the configured id up among monsters first, then bosses.
fn scale_monster(
    roster: &MonsterRoster,
    config: &SimConfig,
    rng: &dyn RngOracle,
) -> Result<MonsterDescriptor> {
    let scaler = MonsterScaler::new(rng);
    if let Some(template) = roster.monster(&config.monster) {
        return Ok(scaler.monster(template, config.area_level, config.seed));
    }
    if let Some(template) = roster.boss(&config.monster) {
        return Ok(scaler.boss(template, config.area_level, config.seed));
    }

    let known: Vec<&str> = roster.templates().map(|template| template.id.as_str()).collect();
    bail!("Unknown monster '{}' (known: {})", config.monster, known.join(", "))
}
