//! Plain data row types written by output backends.

use rmfs_sim::QueueSample;
use rmfs_warehouse::Order;

/// One completed order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServedOrderRow {
    pub order_id:     u64,
    pub item_type:    u16,
    pub enter_time:   f64,
    pub exit_time:    f64,
    pub service_time: f64,
    /// `false` for orders completed during warmup.
    pub steady_state: bool,
}

impl ServedOrderRow {
    /// Row for a served order.  An order without an exit time is written
    /// with `exit_time = NaN`.
    pub fn new(order: &Order, steady_state: bool) -> Self {
        let exit = order.exit_time.map_or(f64::NAN, |t| t.secs());
        Self {
            order_id:     order.id.0,
            item_type:    order.item.0,
            enter_time:   order.enter_time.secs(),
            exit_time:    exit,
            service_time: exit - order.enter_time.secs(),
            steady_state,
        }
    }
}

/// One point of the active-order series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueueLengthRow {
    pub time:   f64,
    pub active: u64,
}

impl From<QueueSample> for QueueLengthRow {
    fn from(s: QueueSample) -> Self {
        Self { time: s.time.secs(), active: s.active as u64 }
    }
}
