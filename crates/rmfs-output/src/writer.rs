//! The `OutputWriter` trait implemented by backend writers.

use crate::{OutputResult, QueueLengthRow, ServedOrderRow};

/// Sink for simulation output rows.
///
/// All methods are infallible from the observer's perspective: errors are
/// stored internally and retrieved with
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write a batch of served orders.
    fn write_served(&mut self, rows: &[ServedOrderRow]) -> OutputResult<()>;

    /// Write one active-order sample.
    fn write_queue_sample(&mut self, row: &QueueLengthRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
