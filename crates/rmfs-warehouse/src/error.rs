use rmfs_core::{OrderId, PodId, RmfsError, RobotId, SlotId, StationId};
use thiserror::Error;

use crate::OrderStatus;

/// Rejected state transitions.
///
/// None of these occur in a correct run: contention (no free robot, pod, or
/// station) is handled by queueing, never reported as an error.  Seeing one
/// means two handlers disagreed about an entity's state, and the run is
/// aborted rather than allowed to produce skewed statistics.
#[derive(Debug, Error)]
pub enum WarehouseError {
    #[error(transparent)]
    Core(#[from] RmfsError),

    #[error("{0} is already carrying a pod")]
    RobotBusy(RobotId),

    #[error("{0} is not carrying a pod")]
    RobotIdle(RobotId),

    #[error("{0} has no assigned workstation")]
    NoStation(RobotId),

    #[error("{0} has no current order")]
    NoOrder(RobotId),

    #[error("{0} has no storage destination")]
    NoDestination(RobotId),

    #[error("{0} is already in use")]
    PodInUse(PodId),

    #[error("{0} is not in use")]
    PodNotInUse(PodId),

    #[error("{0} is not stored on a slot")]
    PodNotStored(PodId),

    #[error("{0} is already occupied")]
    SlotOccupied(SlotId),

    #[error("{0} is already vacant")]
    SlotVacant(SlotId),

    #[error("{station} is not serving {robot}")]
    NotServing { station: StationId, robot: RobotId },

    #[error("{order} cannot move from {from:?} to {to:?}")]
    OrderTransition { order: OrderId, from: OrderStatus, to: OrderStatus },

    #[error("invariant violated: {0}")]
    Invariant(String),
}

pub type WarehouseResult<T> = Result<T, WarehouseError>;
