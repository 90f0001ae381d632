//! `rmfs-output` — simulation output writers for the rmfs warehouse
//! simulator.
//!
//! | Backend | Files created                              |
//! |---------|--------------------------------------------|
//! | CSV     | `served_orders.csv`, `queue_length.csv`    |
//!
//! Backends implement [`OutputWriter`] and are driven either live by
//! [`SimOutputObserver`], which implements `rmfs_sim::SimObserver`, or after
//! the fact by [`write_report`].  Both produce identical files.
//!
//! # Usage
//!
//! ```rust,ignore
//! use rmfs_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output")).unwrap();
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs).unwrap();
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::{SimOutputObserver, write_report};
pub use row::{QueueLengthRow, ServedOrderRow};
pub use writer::OutputWriter;
