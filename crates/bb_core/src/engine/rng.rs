//! Random streams and sampling helpers.
//!
//! A game draws from exactly one ChaCha8 stream. Presentation layers get their own
//! stream through [`commentary_rng`] so rendering a game never shifts the simulation.

use crate::models::GameResult;
use rand::distributions::{Distribution, WeightedIndex};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;
use sha2::{Digest, Sha256};
use uuid::{Builder, Uuid};

pub const GAME_STREAM: u64 = 0;
pub const COMMENTARY_STREAM: u64 = 1;

pub type GameRng = ChaCha8Rng;

pub fn game_rng(seed: u64) -> GameRng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(GAME_STREAM);
    rng
}

/// Independent stream reserved for text/JSON renderers.
pub fn commentary_rng(result: &GameResult) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(result.commentary_seed);
    rng.set_stream(COMMENTARY_STREAM);
    rng
}

/// Bernoulli draw that tolerates probabilities outside `[0, 1]`; always consumes one value.
#[inline]
pub fn chance<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    rng.gen::<f64>() < p
}

#[inline]
pub fn normal<R: Rng + ?Sized>(rng: &mut R, mean: f64, sd: f64) -> f64 {
    let z: f64 = rng.sample(StandardNormal);
    mean + sd * z
}

#[inline]
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, low: f64, high: f64) -> f64 {
    if high <= low {
        return low;
    }
    rng.gen_range(low..=high)
}

/// Index chosen proportionally to `weights`. Zero or empty weights fall back to index 0.
pub fn weighted_pick<R: Rng + ?Sized>(rng: &mut R, weights: &[f64]) -> usize {
    match WeightedIndex::new(weights) {
        Ok(dist) => dist.sample(rng),
        Err(_) => 0,
    }
}

#[inline]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Stable per-play identifier derived from the seed, never from the game stream.
pub fn play_id(seed: u64, at_bat_index: u32) -> Uuid {
    let mut hasher = Sha256::new();
    hasher.update(seed.to_le_bytes());
    hasher.update(at_bat_index.to_le_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest[..16]);
    Builder::from_random_bytes(bytes).into_uuid()
}
