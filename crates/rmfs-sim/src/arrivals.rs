//! Order arrival processes.
//!
//! The engine asks for the next arrival each time one is processed, so an
//! arrival stream is self-perpetuating until the process returns `None` or
//! the run hits its time limit.

use std::collections::VecDeque;

use rmfs_core::{Exponential, ItemType, RmfsResult, SimRng};

/// One future arrival, relative to the previous one.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Arrival {
    /// Seconds after the previous arrival (or after time zero for the first).
    pub gap:  f64,
    pub item: ItemType,
}

/// Source of order arrivals.
///
/// Implementations that draw randomness must use only the `rng` passed in,
/// so a seed replays the same stream.
pub trait ArrivalProcess: Send {
    /// The next arrival, or `None` once the stream is exhausted.
    fn next_arrival(&mut self, rng: &mut SimRng) -> Option<Arrival>;
}

// ── PoissonArrivals ───────────────────────────────────────────────────────────

/// Exponential inter-arrival gaps; item types drawn uniformly.
///
/// The gap is drawn before the item type.
#[derive(Copy, Clone, Debug)]
pub struct PoissonArrivals {
    gaps:       Exponential,
    item_types: u16,
}

impl PoissonArrivals {
    /// # Errors
    /// Returns a configuration error unless `rate > 0`.
    pub fn new(rate: f64, item_types: u16) -> RmfsResult<Self> {
        Ok(Self { gaps: Exponential::new(rate)?, item_types })
    }

    #[inline]
    pub fn rate(&self) -> f64 {
        self.gaps.rate()
    }
}

impl ArrivalProcess for PoissonArrivals {
    fn next_arrival(&mut self, rng: &mut SimRng) -> Option<Arrival> {
        let gap = self.gaps.sample(rng);
        let item = ItemType(rng.gen_range(0..self.item_types.max(1)));
        Some(Arrival { gap, item })
    }
}

// ── ScriptedArrivals ──────────────────────────────────────────────────────────

/// Replays a fixed list of arrivals, then stops.  Draws no randomness.
#[derive(Clone, Debug, Default)]
pub struct ScriptedArrivals {
    script: VecDeque<Arrival>,
}

impl ScriptedArrivals {
    /// Arrivals given as `(gap, item)` pairs in order.
    pub fn new(script: impl IntoIterator<Item = (f64, ItemType)>) -> Self {
        Self { script: script.into_iter().map(|(gap, item)| Arrival { gap, item }).collect() }
    }

    /// Arrivals at absolute times, converted to gaps.  `times` must be
    /// non-decreasing.
    pub fn at_times(arrivals: impl IntoIterator<Item = (f64, ItemType)>) -> Self {
        let mut last = 0.0;
        Self::new(arrivals.into_iter().map(|(t, item)| {
            let gap = t - last;
            last = t;
            (gap, item)
        }))
    }

    /// Arrivals not yet handed out.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl ArrivalProcess for ScriptedArrivals {
    fn next_arrival(&mut self, _rng: &mut SimRng) -> Option<Arrival> {
        self.script.pop_front()
    }
}
