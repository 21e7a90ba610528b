//! Injectable randomness for the sequencers.
//!
//! Only two decisions are random: whether the alternation phase bundles with
//! the previous category, and how many tasks an EatTheFrog block takes before
//! switching. Both go through [`RandomSource`] so a run can be seeded and
//! replayed exactly.

use std::collections::VecDeque;

use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;

/// Source of the sequencers' random decisions.
pub trait RandomSource {
    /// True with probability `probability` (clamped to [0, 1]).
    fn chance(&mut self, probability: f64) -> bool;

    /// Block length in `min..=max`.
    fn block_len(&mut self, min: usize, max: usize) -> usize;
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn chance(&mut self, probability: f64) -> bool {
        (**self).chance(probability)
    }

    fn block_len(&mut self, min: usize, max: usize) -> usize {
        (**self).block_len(min, max)
    }
}

/// Adapter from any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: RngCore> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<Mcg128Xsl64> {
    /// Reproducible source; the same seed always yields the same decisions.
    pub fn seeded(seed: u64) -> Self {
        Self::new(Mcg128Xsl64::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(Mcg128Xsl64::from_entropy())
    }

    /// Seeded when `seed` is set, entropy otherwise.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<R: RngCore> RandomSource for RngSource<R> {
    fn chance(&mut self, probability: f64) -> bool {
        if probability.is_nan() {
            return false;
        }
        self.rng.gen_bool(probability.clamp(0.0, 1.0))
    }

    fn block_len(&mut self, min: usize, max: usize) -> usize {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..=max)
    }
}

/// Replays a fixed script of decisions.
///
/// When a script runs dry, `chance` answers false and `block_len` answers
/// `min`. Block lengths outside `min..=max` are clamped.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    chances: VecDeque<bool>,
    block_lens: VecDeque<usize>,
}

impl ScriptedSource {
    pub fn new(chances: impl IntoIterator<Item = bool>, block_lens: impl IntoIterator<Item = usize>) -> Self {
        Self {
            chances: chances.into_iter().collect(),
            block_lens: block_lens.into_iter().collect(),
        }
    }

    pub fn with_chances(chances: impl IntoIterator<Item = bool>) -> Self {
        Self {
            chances: chances.into_iter().collect(),
            block_lens: VecDeque::new(),
        }
    }

    pub fn with_block_lens(block_lens: impl IntoIterator<Item = usize>) -> Self {
        Self {
            chances: VecDeque::new(),
            block_lens: block_lens.into_iter().collect(),
        }
    }

    /// Never bundles and always takes the shortest block.
    pub fn never() -> Self {
        Self::default()
    }
}

impl RandomSource for ScriptedSource {
    fn chance(&mut self, _probability: f64) -> bool {
        self.chances.pop_front().unwrap_or(false)
    }

    fn block_len(&mut self, min: usize, max: usize) -> usize {
        self.block_lens
            .pop_front()
            .map(|len| len.clamp(min, max.max(min)))
            .unwrap_or(min)
    }
}
