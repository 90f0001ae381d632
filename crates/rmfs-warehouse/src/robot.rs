//! Robot state machine.
//!
//! ```text
//!   free ──assign_order──► to pod ──head_to_station──► to station
//!    ▲                                                   │ take_order (picking done)
//!    └────────────store_pod────────── to slot ◄──head_to_slot
//! ```
//!
//! A robot is free exactly when it carries no pod.  Each transition that
//! starts a trip moves the robot's position to the trip's end immediately and
//! returns the trip duration; the engine schedules the matching event.

use rmfs_core::{DistanceMetric, OrderId, PodId, Point, RobotConfig, RobotId, SlotId, StationId, travel_secs};

use crate::{WarehouseError, WarehouseResult};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Robot {
    pub id:          RobotId,
    pub pos:         Point,
    pub carried_pod: Option<PodId>,
    pub station:     Option<StationId>,
    pub order:       Option<OrderId>,
    /// Slot the carried pod is being returned to.
    pub dest_slot:   Option<SlotId>,
}

impl Robot {
    pub fn new(id: RobotId, pos: Point) -> Self {
        Self { id, pos, carried_pod: None, station: None, order: None, dest_slot: None }
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        self.carried_pod.is_none()
    }

    /// Take on `order` using `pod`; returns seconds until the pod is lifted.
    pub fn assign_order(
        &mut self,
        order:   OrderId,
        pod:     PodId,
        pod_pos: Point,
        metric:  DistanceMetric,
        kin:     &RobotConfig,
    ) -> WarehouseResult<f64> {
        if !self.is_free() {
            return Err(WarehouseError::RobotBusy(self.id));
        }
        let secs = metric.travel_secs(self.pos, pod_pos, kin.speed) + kin.lift_secs;
        self.carried_pod = Some(pod);
        self.order = Some(order);
        self.pos = pod_pos;
        Ok(secs)
    }

    /// Drive the lifted pod to `station`; returns the trip duration.
    pub fn head_to_station(
        &mut self,
        station:     StationId,
        station_pos: Point,
        metric:      DistanceMetric,
        kin:         &RobotConfig,
    ) -> WarehouseResult<f64> {
        if self.is_free() {
            return Err(WarehouseError::RobotIdle(self.id));
        }
        let dist = metric.distance(self.pos, station_pos) + self.pos.aisle_crossing_penalty();
        self.station = Some(station);
        self.pos = station_pos;
        Ok(travel_secs(dist, kin.speed))
    }

    /// Hand back the order whose picking just finished.
    pub fn take_order(&mut self) -> WarehouseResult<OrderId> {
        self.order.take().ok_or(WarehouseError::NoOrder(self.id))
    }

    /// Drive the pod back to `slot`; returns seconds until it is set down.
    pub fn head_to_slot(
        &mut self,
        slot:     SlotId,
        slot_pos: Point,
        metric:   DistanceMetric,
        kin:      &RobotConfig,
    ) -> WarehouseResult<f64> {
        if self.is_free() {
            return Err(WarehouseError::RobotIdle(self.id));
        }
        let secs = metric.travel_secs(self.pos, slot_pos, kin.speed) + kin.store_secs;
        self.station = None;
        self.dest_slot = Some(slot);
        self.pos = slot_pos;
        Ok(secs)
    }

    /// Set the pod down; the robot becomes free.  Returns the pod and the slot
    /// it now stands on.
    pub fn store_pod(&mut self) -> WarehouseResult<(PodId, SlotId)> {
        let pod = self.carried_pod.ok_or(WarehouseError::RobotIdle(self.id))?;
        let slot = self.dest_slot.take().ok_or(WarehouseError::NoDestination(self.id))?;
        self.carried_pod = None;
        Ok((pod, slot))
    }
}
