//! `rmfs-sim` — discrete-event engine for the rmfs warehouse simulator.
//!
//! # Event loop
//!
//! ```text
//! loop:
//!   ① Pop    : earliest event (FIFO among equal times); stop if it lies
//!              past the time limit or the queue is empty.
//!   ② Advance: move the clock to the event time (never backwards).
//!   ③ Handle : one handler per event kind mutates the warehouse and order
//!              state and schedules follow-up events.
//!   ④ Record : queue-length samples and served orders go to the report
//!              and the observer; the warmup cutoff is fixed the first time
//!              the clock reaches the warmup boundary.
//! ```
//!
//! Contention is never an error: an order without a free robot or pod waits
//! in [`QueuedOrders`], and a robot without a free station joins the line of
//! a random one.  Any failed state transition aborts the run with a
//! [`SimError`].
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                   |
//! |------------|----------------------------------------------------------|
//! | `parallel` | [`run_replications`] runs on Rayon's thread pool.        |
//! | `serde`    | `Serialize`/`Deserialize` on reports and summaries.      |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use rmfs_core::SimConfig;
//! use rmfs_sim::{NoopObserver, SimBuilder};
//!
//! let config = SimConfig::new(2.0 * 604_800.0, 2, 0.013).with_seed(7);
//! let mut sim = SimBuilder::new(config).build()?;
//! sim.run(&mut NoopObserver)?;
//! let report = sim.into_report();
//! println!("{:.1} orders/h", report.throughput() * 3600.0);
//! ```

pub mod arrivals;
pub mod builder;
pub mod error;
pub mod observer;
pub mod queued;
pub mod replicate;
pub mod report;
pub mod sim;

#[cfg(test)]
mod tests;

pub use arrivals::{Arrival, ArrivalProcess, PoissonArrivals, ScriptedArrivals};
pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use queued::QueuedOrders;
pub use replicate::{ReplicationSummary, run_once, run_replications};
pub use report::{QueueSample, ReportSummary, SimReport};
pub use sim::Sim;
