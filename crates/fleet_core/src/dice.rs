//! Uniform draws from the injected RNG.
//!
//! Every random decision in the engine goes through `roll`, one `f64` in
//! [0, 1) per call, so a scripted source controls each branch directly.

use rand::Rng;

pub(crate) fn roll(rng: &mut impl Rng) -> f64 {
    rng.gen::<f64>()
}

/// True with probability `p`.
pub(crate) fn chance(rng: &mut impl Rng, p: f64) -> bool {
    roll(rng) < p
}

#[allow(clippy::cast_possible_truncation)]
pub(crate) fn uniform(rng: &mut impl Rng, low: f32, high: f32) -> f32 {
    low + (roll(rng) as f32) * (high - low)
}

/// Index in `0..len`. `len` must be non-zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn pick(rng: &mut impl Rng, len: usize) -> usize {
    let index = (roll(rng) * len as f64) as usize;
    index.min(len - 1)
}
