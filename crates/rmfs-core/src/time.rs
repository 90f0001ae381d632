//! Simulation time model.
//!
//! # Design
//!
//! Time is continuous: a [`SimTime`] is a number of simulated seconds since
//! the start of the run, stored as `f64`.  Unlike a tick counter, event times
//! come from sampled exponential durations, so no integer grid fits them.
//!
//! `SimTime` is totally ordered via [`f64::total_cmp`] so it can key a
//! `BinaryHeap`.  Constructors reject NaN in debug builds; the engine only
//! ever produces times by adding finite, non-negative durations to the clock.
//!
//! [`SimClock`] holds the current time and refuses to move backwards.

use std::cmp::Ordering;
use std::fmt;

use crate::{RmfsError, RmfsResult};

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute simulation timestamp in seconds.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    #[inline]
    pub fn from_secs(secs: f64) -> Self {
        debug_assert!(!secs.is_nan(), "SimTime cannot be NaN");
        SimTime(secs)
    }

    #[inline]
    pub fn secs(self) -> f64 {
        self.0
    }

    /// The timestamp `dur` seconds after `self`.
    #[inline]
    pub fn after(self, dur: f64) -> SimTime {
        SimTime::from_secs(self.0 + dur)
    }

    /// Seconds elapsed from `earlier` to `self`.
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        self.after(rhs)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.3}s", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The simulation clock: the time of the most recently processed event.
#[derive(Clone, Debug)]
pub struct SimClock {
    now:   SimTime,
    limit: SimTime,
}

impl SimClock {
    /// A clock at time zero that will stop the run after `limit`.
    pub fn new(limit: SimTime) -> Self {
        Self { now: SimTime::ZERO, limit }
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    #[inline]
    pub fn limit(&self) -> SimTime {
        self.limit
    }

    /// `true` if an event at `t` lies beyond the time limit and must not run.
    #[inline]
    pub fn is_past_limit(&self, t: SimTime) -> bool {
        t > self.limit
    }

    /// Move the clock to `t`.
    ///
    /// # Errors
    /// Returns [`RmfsError::ClockRegression`] if `t` is earlier than the
    /// current time.  Equal times are fine (simultaneous events).
    pub fn advance_to(&mut self, t: SimTime) -> RmfsResult<()> {
        if t < self.now {
            return Err(RmfsError::ClockRegression { now: self.now, requested: t });
        }
        self.now = t;
        Ok(())
    }

    /// Break elapsed time into (day, hour, minute) for log lines.
    pub fn elapsed_dhm(&self) -> (u64, u32, u32) {
        let total_secs = self.now.0.max(0.0) as u64;
        let days = total_secs / 86_400;
        let hours = ((total_secs % 86_400) / 3_600) as u32;
        let minutes = ((total_secs % 3_600) / 60) as u32;
        (days, hours, minutes)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (d, h, m) = self.elapsed_dhm();
        write!(f, "{} (day {} {:02}:{:02})", self.now, d, h, m)
    }
}
