//! Deterministic, seedable randomness for a simulation run.
//!
//! # Determinism strategy
//!
//! A run owns exactly one [`SimRng`] seeded from `SimConfig::seed`.  Every
//! random decision (inter-arrival gaps, item types, pod choice, overflow
//! station choice, storage slot choice, picking times) draws from it in the
//! order events are processed, so a given seed always replays the same run.
//!
//! Warehouse construction draws from a [`child`](SimRng::child) stream, which
//! keeps the layout shuffle independent of how many draws the run itself
//! makes.  Nothing in the workspace touches thread-local or OS randomness.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp};

use crate::{RmfsError, RmfsResult};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG.
///
/// One per run, never shared between runs.  Independent replications each
/// build their own from their own seed.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Uniform index into a collection of length `len`, or `None` if empty.
    #[inline]
    pub fn choose_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.0.gen_range(0..len))
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.0);
    }
}

// ── Exponential ───────────────────────────────────────────────────────────────

/// Exponential distribution with a validated, strictly positive rate.
///
/// Used for order inter-arrival gaps and workstation picking times; the mean
/// of a sample is `1 / rate`.
#[derive(Copy, Clone, Debug)]
pub struct Exponential {
    rate: f64,
    dist: Exp<f64>,
}

impl Exponential {
    /// # Errors
    /// Returns [`RmfsError::Config`] unless `rate` is finite and `> 0`.
    pub fn new(rate: f64) -> RmfsResult<Self> {
        if !(rate.is_finite() && rate > 0.0) {
            return Err(RmfsError::config(format!(
                "exponential rate must be finite and positive, got {rate}"
            )));
        }
        let dist = Exp::new(rate)
            .map_err(|e| RmfsError::config(format!("exponential rate {rate}: {e}")))?;
        Ok(Self { rate, dist })
    }

    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    #[inline]
    pub fn mean(&self) -> f64 {
        1.0 / self.rate
    }

    /// Draw one duration in seconds.
    #[inline]
    pub fn sample(&self, rng: &mut SimRng) -> f64 {
        self.dist.sample(rng.inner())
    }
}
