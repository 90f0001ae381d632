//! Run results and the statistics derived from them.
//!
//! A [`SimReport`] is what experiment code consumes: the active-order series,
//! the served-order log with its warmup cutoff, and the final clock.  All
//! steady-state statistics skip the first `served_while_warmup` orders.

use rmfs_core::SimTime;
use rmfs_warehouse::Order;

/// Active-order count right after a change.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueueSample {
    pub time:   SimTime,
    /// Orders that have arrived and are not yet picked.
    pub active: usize,
}

/// Everything a finished (or stopped) run produced.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimReport {
    pub seed:                u64,
    pub time_limit:          f64,
    pub warmup_frac:         f64,
    /// Starts with `(0, 0)`; one sample per arrival and per completed pick.
    pub queue_series:        Vec<QueueSample>,
    /// Completed orders in completion order.
    pub served:              Vec<Order>,
    /// Number of leading `served` entries completed during warmup.
    pub served_while_warmup: usize,
    /// Time of the last processed event.
    pub final_time:          SimTime,
    pub events_processed:    u64,
}

impl SimReport {
    /// Orders served after warmup.
    pub fn steady_state(&self) -> &[Order] {
        &self.served[self.served_while_warmup.min(self.served.len())..]
    }

    /// Length of the measurement window in seconds.
    #[inline]
    pub fn steady_state_secs(&self) -> f64 {
        self.time_limit * (1.0 - self.warmup_frac)
    }

    /// Steady-state orders served per second.
    pub fn throughput(&self) -> f64 {
        self.steady_state().len() as f64 / self.steady_state_secs()
    }

    /// Steady-state service times (exit minus enter), in seconds.
    pub fn service_times(&self) -> impl Iterator<Item = f64> + '_ {
        self.steady_state().iter().filter_map(Order::service_time)
    }

    pub fn mean_service_time(&self) -> Option<f64> {
        mean(self.service_times())
    }

    /// Population standard deviation of steady-state service times.
    pub fn service_time_std(&self) -> Option<f64> {
        let m = self.mean_service_time()?;
        let var = mean(self.service_times().map(|s| (s - m) * (s - m)))?;
        Some(var.sqrt())
    }

    /// Largest active-order count seen.
    pub fn max_active(&self) -> usize {
        self.queue_series.iter().map(|s| s.active).max().unwrap_or(0)
    }

    /// Active-order count at the end of the run.
    pub fn final_active(&self) -> usize {
        self.queue_series.last().map_or(0, |s| s.active)
    }

    /// Time-weighted mean of the active-order count over
    /// `[warmup boundary, final_time]`.
    pub fn mean_active(&self) -> Option<f64> {
        let start = self.warmup_frac * self.time_limit;
        let end = self.final_time.secs();
        if end <= start {
            return None;
        }
        let mut area = 0.0;
        let mut level = 0usize;
        let mut t = start;
        for s in &self.queue_series {
            let at = s.time.secs();
            if at > start {
                area += level as f64 * (at.min(end) - t);
                t = at.min(end);
            }
            level = s.active;
        }
        area += level as f64 * (end - t);
        Some(area / (end - start))
    }

    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            seed:              self.seed,
            served:            self.served.len(),
            steady_served:     self.steady_state().len(),
            throughput_per_h:  self.throughput() * 3_600.0,
            mean_service_secs: self.mean_service_time(),
            std_service_secs:  self.service_time_std(),
            mean_active:       self.mean_active(),
            max_active:        self.max_active(),
            final_time:        self.final_time.secs(),
            events_processed:  self.events_processed,
        }
    }
}

/// Scalar digest of one [`SimReport`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReportSummary {
    pub seed:              u64,
    pub served:            usize,
    pub steady_served:     usize,
    pub throughput_per_h:  f64,
    pub mean_service_secs: Option<f64>,
    pub std_service_secs:  Option<f64>,
    pub mean_active:       Option<f64>,
    pub max_active:        usize,
    pub final_time:        f64,
    pub events_processed:  u64,
}

pub(crate) fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (n, sum) = values.fold((0usize, 0.0), |(n, sum), v| (n + 1, sum + v));
    (n > 0).then(|| sum / n as f64)
}
