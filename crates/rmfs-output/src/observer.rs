//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`, and
//! [`write_report`] for runs that are already finished.

use rmfs_core::SimTime;
use rmfs_sim::{QueueSample, SimObserver, SimReport};
use rmfs_warehouse::Order;

use crate::row::{QueueLengthRow, ServedOrderRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that streams served orders and queue-length samples to
/// any [`OutputWriter`] backend while the run progresses.
///
/// Served orders are buffered and written in batches of `batch` rows.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    pending:    Vec<ServedOrderRow>,
    batch:      usize,
    in_warmup:  bool,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`.  Writes the `(0, 0)` sample
    /// that opens every queue-length series.
    pub fn new(writer: W) -> Self {
        let mut obs = Self {
            writer,
            pending:    Vec::new(),
            batch:      1_024,
            in_warmup:  true,
            last_error: None,
        };
        let result = obs.writer.write_queue_sample(&QueueLengthRow { time: 0.0, active: 0 });
        obs.store_err(result);
        obs
    }

    /// Served-order rows buffered before each write.
    pub fn with_batch(mut self, batch: usize) -> Self {
        self.batch = batch.max(1);
        self
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn flush_served(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let result = self.writer.write_served(&self.pending);
        self.pending.clear();
        self.store_err(result);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_queue_sample(&mut self, sample: QueueSample) {
        let result = self.writer.write_queue_sample(&sample.into());
        self.store_err(result);
    }

    fn on_order_served(&mut self, order: &Order) {
        self.pending.push(ServedOrderRow::new(order, !self.in_warmup));
        if self.pending.len() >= self.batch {
            self.flush_served();
        }
    }

    fn on_warmup_end(&mut self, _now: SimTime, _served: usize) {
        self.in_warmup = false;
    }

    fn on_sim_end(&mut self, _final_time: SimTime) {
        self.flush_served();
        let result = self.writer.finish();
        self.store_err(result);
    }
}

/// Write a finished run's served orders and queue-length series, then
/// finish the writer.
pub fn write_report<W: OutputWriter>(report: &SimReport, writer: &mut W) -> OutputResult<()> {
    for &sample in &report.queue_series {
        writer.write_queue_sample(&sample.into())?;
    }
    let cutoff = report.served_while_warmup;
    let rows: Vec<ServedOrderRow> = report
        .served
        .iter()
        .enumerate()
        .map(|(i, order)| ServedOrderRow::new(order, i >= cutoff))
        .collect();
    writer.write_served(&rows)?;
    writer.finish()
}
