//! Event records consumed by the engine.

use std::fmt;

use rmfs_core::{OrderId, RobotId, SimTime};

/// What happens, and to whom.
///
/// Each variant carries its subject: the order for arrivals, the robot for
/// every step of a fulfilment trip.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    /// A new order enters the system.
    OrderArrival(OrderId),
    /// The robot has driven to its pod and lifted it.
    RobotLiftsPod(RobotId),
    /// The robot has delivered its pod to a workstation.
    RobotArrivesStation(RobotId),
    /// The workstation finished picking the robot's order.
    PickingFinished(RobotId),
    /// The robot has set its pod down on a storage slot.
    RobotStoresPod(RobotId),
}

impl EventKind {
    /// The robot this event concerns, if any.
    pub fn robot(self) -> Option<RobotId> {
        match self {
            EventKind::OrderArrival(_) => None,
            EventKind::RobotLiftsPod(r)
            | EventKind::RobotArrivesStation(r)
            | EventKind::PickingFinished(r)
            | EventKind::RobotStoresPod(r) => Some(r),
        }
    }

    /// Short snake_case label, used in logs and exported traces.
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::OrderArrival(_)        => "order_arrival",
            EventKind::RobotLiftsPod(_)       => "robot_lifts_pod",
            EventKind::RobotArrivesStation(_) => "robot_arrives_station",
            EventKind::PickingFinished(_)     => "picking_finished",
            EventKind::RobotStoresPod(_)      => "robot_stores_pod",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::OrderArrival(o) => write!(f, "{} {o}", self.as_str()),
            _ => match self.robot() {
                Some(r) => write!(f, "{} {r}", self.as_str()),
                None => f.write_str(self.as_str()),
            },
        }
    }
}

/// A scheduled occurrence.  Immutable once created and consumed exactly once.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    pub time: SimTime,
    pub kind: EventKind,
}

impl Event {
    #[inline]
    pub fn new(time: SimTime, kind: EventKind) -> Self {
        Self { time, kind }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.kind, self.time)
    }
}
