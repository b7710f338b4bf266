//! RNG oracle for deterministic random number generation.
//!
//! Every random decision in a battle (damage variance, dodge rolls, passive
//! procs, monster skill choice, flee attempts) is drawn through this module.
//! The generator itself is stateless: a roll is a pure function of a seed, and
//! the seed is derived from the session seed, the transition nonce, the kind of
//! roll and its position within the transition. Replaying the same commands
//! against the same session therefore reproduces every roll.
use crate::config::BattleConfig;

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Returns true with probability `chance_pct`/100.
    fn roll_percent(&self, seed: u64, chance_pct: u32) -> bool {
        chance_pct > 0 && self.next_u32(seed) % 100 < chance_pct
    }

    /// Returns true with probability `chance_permille`/1000.
    fn roll_permille(&self, seed: u64, chance_permille: u32) -> bool {
        chance_permille > 0 && self.next_u32(seed) % 1000 < chance_permille
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let range = max - min + 1;
        min + (self.next_u32(seed) % range)
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// Uses the PCG-XSH-RR output permutation over a single LCG step, which is
/// enough for a seed-in/value-out oracle.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR: xorshift high bits, then rotate by the top five bits.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Compute deterministic seed from battle state components.
///
/// * `session_seed` - Seed fixed when the encounter starts
/// * `nonce` - Transition sequence number (increments each player action and monster turn)
/// * `roller` - Which kind of roll is being made (see [`Roll`])
/// * `context` - Position of the roll within the transition
pub fn compute_seed(session_seed: u64, nonce: u64, roller: u32, context: u32) -> u64 {
    // SplitMix64 / FxHash style mixing.
    let mut hash = session_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (roller as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Kinds of random decision made during a battle.
///
/// The discriminant is mixed into the roll seed, so two different decisions in
/// the same transition never share a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Roll {
    Variance = 0,
    LuckyStrike = 1,
    BladeDance = 2,
    SpellEcho = 3,
    SoulSiphon = 4,
    Evasion = 5,
    Aegis = 6,
    CursedBlood = 7,
    MonsterSkill = 8,
    MonsterSkillPick = 9,
    StealGold = 10,
    Flee = 11,
    LevelUp = 12,
    /// Encounter gold bonus rolled by monster scaling.
    GoldBonus = 13,
}

/// Roll stream for a single transition.
///
/// Wraps an oracle together with the session seed and the transition nonce,
/// and counts draws so that repeated rolls of the same kind (for example the
/// two variance rolls of a Blade Dance double attack) stay independent.
pub struct Dice<'a> {
    rng: &'a dyn RngOracle,
    seed: u64,
    nonce: u64,
    draws: u32,
}

impl<'a> Dice<'a> {
    pub fn new(rng: &'a dyn RngOracle, seed: u64, nonce: u64) -> Self {
        Self {
            rng,
            seed,
            nonce,
            draws: 0,
        }
    }

    fn next_seed(&mut self, roll: Roll) -> u64 {
        let seed = compute_seed(self.seed, self.nonce, roll as u32, self.draws);
        self.draws = self.draws.wrapping_add(1);
        seed
    }

    /// Percent chance check.
    pub fn chance(&mut self, roll: Roll, chance_pct: u32) -> bool {
        let seed = self.next_seed(roll);
        self.rng.roll_percent(seed, chance_pct)
    }

    /// Per-mille chance check.
    pub fn chance_permille(&mut self, roll: Roll, chance_permille: u32) -> bool {
        let seed = self.next_seed(roll);
        self.rng.roll_permille(seed, chance_permille)
    }

    /// Uniform value in `[min, max]`.
    pub fn range(&mut self, roll: Roll, min: u32, max: u32) -> u32 {
        let seed = self.next_seed(roll);
        self.rng.range(seed, min, max)
    }

    /// Damage variance in per-mille, drawn from the configured bounds.
    pub fn variance(&mut self, config: &BattleConfig) -> u32 {
        self.range(
            Roll::Variance,
            config.variance_min_permille,
            config.variance_max_permille,
        )
    }

    /// Number of rolls drawn so far.
    pub fn draws(&self) -> u32 {
        self.draws
    }
}
