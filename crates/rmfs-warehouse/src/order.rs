//! Customer orders.

use rmfs_core::{ItemType, OrderId, SimTime};

use crate::{WarehouseError, WarehouseResult};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OrderStatus {
    /// Waiting for a robot and a pod.
    Queued,
    /// A robot is fetching, carrying, or waiting with its pod.
    InProgress,
    /// Picked; `exit_time` is set.
    Done,
}

/// A single-line order for one item type.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Order {
    pub id:         OrderId,
    pub enter_time: SimTime,
    pub exit_time:  Option<SimTime>,
    pub item:       ItemType,
    pub status:     OrderStatus,
}

impl Order {
    pub fn new(id: OrderId, enter_time: SimTime, item: ItemType) -> Self {
        Self { id, enter_time, exit_time: None, item, status: OrderStatus::Queued }
    }

    /// A robot and pod have been assigned.
    pub fn start(&mut self) -> WarehouseResult<()> {
        self.transition(OrderStatus::Queued, OrderStatus::InProgress)
    }

    /// Picking finished at `now`.
    pub fn finish(&mut self, now: SimTime) -> WarehouseResult<()> {
        self.transition(OrderStatus::InProgress, OrderStatus::Done)?;
        self.exit_time = Some(now);
        Ok(())
    }

    /// Seconds from arrival to picking completion, once done.
    pub fn service_time(&self) -> Option<f64> {
        self.exit_time.map(|exit| exit.since(self.enter_time))
    }

    fn transition(&mut self, from: OrderStatus, to: OrderStatus) -> WarehouseResult<()> {
        if self.status != from {
            return Err(WarehouseError::OrderTransition { order: self.id, from: self.status, to });
        }
        self.status = to;
        Ok(())
    }
}
