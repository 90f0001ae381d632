//! Simulation observer trait for progress reporting and data collection.

use rmfs_core::SimTime;
use rmfs_events::Event;
use rmfs_warehouse::Order;

use crate::QueueSample;

/// Callbacks invoked by [`Sim::step`][crate::Sim::step] and
/// [`Sim::run`][crate::Sim::run].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct Progress { every: u64, seen: u64 }
///
/// impl SimObserver for Progress {
///     fn on_event(&mut self, event: &Event) {
///         self.seen += 1;
///         if self.seen % self.every == 0 {
///             println!("{event}");
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called for each event right before its handler runs.
    fn on_event(&mut self, _event: &Event) {}

    /// Called after every change of the active-order count.
    fn on_queue_sample(&mut self, _sample: QueueSample) {}

    /// Called once per order, when its picking finishes.
    fn on_order_served(&mut self, _order: &Order) {}

    /// Called once, after the first event at or past the warmup boundary.
    /// `served` orders were completed during warmup.
    fn on_warmup_end(&mut self, _now: SimTime, _served: usize) {}

    /// Called once when the run stops.
    fn on_sim_end(&mut self, _final_time: SimTime) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
