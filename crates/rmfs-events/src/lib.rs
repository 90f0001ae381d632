//! `rmfs-events` — event records and the time-ordered event queue.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                 |
//! |------------|----------------------------------------------------------|
//! | [`event`]  | `Event`, `EventKind`                                     |
//! | [`queue`]  | `EventQueue` (`BinaryHeap` keyed by `(time, seq)`)       |
//!
//! # Event lifecycle (summary)
//!
//! ```text
//! OrderArrival ──► RobotLiftsPod ──► RobotArrivesStation ──► PickingFinished ──► RobotStoresPod
//!      │                                      (may wait in the station's FIFO line)
//!      └──► next OrderArrival
//! ```

pub mod event;
pub mod queue;


pub use event::{Event, EventKind};
pub use queue::EventQueue;
