//! Picking workstation: a single-server FIFO queue with exponential service.

use std::collections::VecDeque;

use rmfs_core::{Exponential, Point, RobotId, SimRng, StationId};

use crate::{WarehouseError, WarehouseResult};

/// A fixed picking station.
///
/// `occupied` is raised when a robot is routed here as the station's first
/// commitment (or when a robot starts being served), and lowered only when a
/// pick finishes with nobody waiting.
#[derive(Clone, Debug)]
pub struct Station {
    pub id:       StationId,
    pub pos:      Point,
    pub occupied: bool,
    picking:      Exponential,
    serving:      Option<RobotId>,
    line:         VecDeque<RobotId>,
}

impl Station {
    pub fn new(id: StationId, pos: Point, picking: Exponential) -> Self {
        Self { id, pos, occupied: false, picking, serving: None, line: VecDeque::new() }
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        !self.occupied
    }

    /// Mean picks per second.
    #[inline]
    pub fn picking_rate(&self) -> f64 {
        self.picking.rate()
    }

    /// Robot whose order is being picked right now.
    #[inline]
    pub fn serving(&self) -> Option<RobotId> {
        self.serving
    }

    /// Robots waiting behind the one being served, front first.
    pub fn line(&self) -> impl Iterator<Item = RobotId> + '_ {
        self.line.iter().copied()
    }

    #[inline]
    pub fn line_len(&self) -> usize {
        self.line.len()
    }

    /// Route a robot here as the station's first commitment.
    #[inline]
    pub fn reserve(&mut self) {
        self.occupied = true;
    }

    /// A robot has arrived.  Returns the picking duration if picking starts
    /// now, or `None` if the robot joined the line.
    pub fn arrive(&mut self, robot: RobotId, rng: &mut SimRng) -> Option<f64> {
        self.occupied = true;
        if self.serving.is_none() {
            self.serving = Some(robot);
            Some(self.picking.sample(rng))
        } else {
            self.line.push_back(robot);
            None
        }
    }

    /// Picking for `robot` is done.  Starts the next robot in line, returning
    /// it with its picking duration, or frees the station if the line is empty.
    pub fn finish(&mut self, robot: RobotId, rng: &mut SimRng) -> WarehouseResult<Option<(RobotId, f64)>> {
        if self.serving != Some(robot) {
            return Err(WarehouseError::NotServing { station: self.id, robot });
        }
        match self.line.pop_front() {
            Some(next) => {
                self.serving = Some(next);
                Ok(Some((next, self.picking.sample(rng))))
            }
            None => {
                self.serving = None;
                self.occupied = false;
                Ok(None)
            }
        }
    }
}
