//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `served_orders.csv`
//! - `queue_length.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, QueueLengthRow, ServedOrderRow};

pub const SERVED_ORDERS_FILE: &str = "served_orders.csv";
pub const QUEUE_LENGTH_FILE: &str = "queue_length.csv";

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    served:   Writer<File>,
    queue:    Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create the two CSV files in `dir` (creating `dir` if needed) and write
    /// the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut served = Writer::from_path(dir.join(SERVED_ORDERS_FILE))?;
        served.write_record([
            "order_id", "item_type", "enter_time", "exit_time", "service_time", "steady_state",
        ])?;

        let mut queue = Writer::from_path(dir.join(QUEUE_LENGTH_FILE))?;
        queue.write_record(["time", "active_orders"])?;

        Ok(Self { served, queue, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_served(&mut self, rows: &[ServedOrderRow]) -> OutputResult<()> {
        for row in rows {
            self.served.write_record(&[
                row.order_id.to_string(),
                row.item_type.to_string(),
                row.enter_time.to_string(),
                row.exit_time.to_string(),
                row.service_time.to_string(),
                (row.steady_state as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_queue_sample(&mut self, row: &QueueLengthRow) -> OutputResult<()> {
        self.queue.write_record(&[row.time.to_string(), row.active.to_string()])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.served.flush()?;
        self.queue.flush()?;
        Ok(())
    }
}
