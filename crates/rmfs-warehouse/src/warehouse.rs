//! The `Warehouse` arena: every robot, pod, slot, and station of a run, plus
//! the free-resource indexes the engine queries on every event.
//!
//! # Consistency
//!
//! Robots, pods, and stations refer to each other only by id.  Each public
//! mutating method here performs one complete, consistent transition across
//! all the entities it touches *and* the indexes that mirror their state, so
//! no caller ever observes a robot that carries a pod still listed as free.
//!
//! # Indexes
//!
//! | Index          | Type                       | Pick rule                   |
//! |----------------|----------------------------|-----------------------------|
//! | free robots    | `BTreeSet<RobotId>`        | lowest id                   |
//! | free pods      | `FreeSet<PodId>` per item  | uniform random              |
//! | free stations  | `BTreeSet<StationId>`      | lowest id                   |
//! | vacated slots  | [`VacatedSlots`]           | per `StoragePolicy`         |

use std::collections::BTreeSet;

use rmfs_core::{
    DistanceMetric, ItemType, OrderId, PodId, Point, RobotConfig, RobotId, SimRng, SlotId,
    StationId,
};

use crate::{FreeSet, Layout, Pod, Robot, Station, VacatedSlots, WarehouseError, WarehouseResult};

/// Where a lifted pod is being taken.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StationChoice {
    /// A free station, now reserved for this robot.
    Free(StationId),
    /// Every station was committed; the robot joins an arbitrary one.
    Overflow(StationId),
}

impl StationChoice {
    #[inline]
    pub fn id(self) -> StationId {
        match self {
            StationChoice::Free(s) | StationChoice::Overflow(s) => s,
        }
    }
}

/// Outcome of a finished pick at a station.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PickOutcome {
    /// The order that was just picked.
    pub order:   OrderId,
    /// The next robot in line and its picking duration, if any.
    pub next:    Option<(RobotId, f64)>,
    /// The station the pick happened at.
    pub station: StationId,
}

pub struct Warehouse {
    pub(crate) metric:        DistanceMetric,
    pub(crate) kinematics:    RobotConfig,
    pub(crate) layout:        Layout,
    pub(crate) pods:          Vec<Pod>,
    pub(crate) item_pods:     Vec<Vec<PodId>>,
    pub(crate) stations:      Vec<Station>,
    pub(crate) robots:        Vec<Robot>,
    pub(crate) free_robots:   BTreeSet<RobotId>,
    pub(crate) free_pods:     Vec<FreeSet<PodId>>,
    pub(crate) free_stations: BTreeSet<StationId>,
    pub(crate) vacated:       VacatedSlots,
}

impl Warehouse {
    // ── Read access ───────────────────────────────────────────────────────

    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    pub fn kinematics(&self) -> &RobotConfig {
        &self.kinematics
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn item_types(&self) -> u16 {
        self.item_pods.len() as u16
    }

    pub fn robots(&self) -> &[Robot] {
        &self.robots
    }

    pub fn pods(&self) -> &[Pod] {
        &self.pods
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    #[inline]
    pub fn robot(&self, id: RobotId) -> &Robot {
        &self.robots[id.index()]
    }

    #[inline]
    pub fn pod(&self, id: PodId) -> &Pod {
        &self.pods[id.index()]
    }

    #[inline]
    pub fn station(&self, id: StationId) -> &Station {
        &self.stations[id.index()]
    }

    /// Pods holding `item`, in the fixed partition order.
    pub fn pods_for_item(&self, item: ItemType) -> &[PodId] {
        &self.item_pods[item.index()]
    }

    pub fn vacated_slots(&self) -> &VacatedSlots {
        &self.vacated
    }

    // ── Free-resource lookups ─────────────────────────────────────────────

    /// Lowest-numbered free robot.
    pub fn first_free_robot(&self) -> Option<RobotId> {
        self.free_robots.first().copied()
    }

    pub fn free_robot_count(&self) -> usize {
        self.free_robots.len()
    }

    pub fn has_free_pod(&self, item: ItemType) -> bool {
        !self.free_pods[item.index()].is_empty()
    }

    pub fn free_pod_count(&self, item: ItemType) -> usize {
        self.free_pods[item.index()].len()
    }

    /// Uniformly random free pod holding `item`.
    pub fn choose_free_pod(&self, item: ItemType, rng: &mut SimRng) -> Option<PodId> {
        self.free_pods[item.index()].choose(rng)
    }

    /// Lowest-numbered free station.
    pub fn first_free_station(&self) -> Option<StationId> {
        self.free_stations.first().copied()
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Dispatch free `robot` to fetch free `pod` for `order`.
    ///
    /// Returns seconds until the pod is lifted.
    pub fn dispatch(&mut self, robot: RobotId, pod: PodId, order: OrderId) -> WarehouseResult<f64> {
        if !self.robots[robot.index()].is_free() {
            return Err(WarehouseError::RobotBusy(robot));
        }
        let p = &mut self.pods[pod.index()];
        p.reserve()?;
        let (item, pod_pos) = (p.item, p.pos);

        let secs = self.robots[robot.index()].assign_order(
            order, pod, pod_pos, self.metric, &self.kinematics,
        )?;
        self.free_robots.remove(&robot);
        self.free_pods[item.index()].remove(pod);
        Ok(secs)
    }

    /// The robot lifts its pod: the pod's slot joins the vacated pool.
    pub fn lift_pod(&mut self, robot: RobotId) -> WarehouseResult<SlotId> {
        let pod = self.carried_pod(robot)?;
        let slot = self.pods[pod.index()].lift()?;
        self.layout.release(slot)?;
        self.vacated.insert(slot, self.layout.pos(slot));
        Ok(slot)
    }

    /// Choose the station for a robot that just lifted its pod.
    ///
    /// Takes the lowest free station if there is one; otherwise picks any
    /// station uniformly at random.  Overflow lines are unbounded.
    pub fn choose_station(&mut self, rng: &mut SimRng) -> WarehouseResult<StationChoice> {
        if let Some(id) = self.free_stations.pop_first() {
            self.stations[id.index()].reserve();
            return Ok(StationChoice::Free(id));
        }
        let idx = rng
            .choose_index(self.stations.len())
            .ok_or_else(|| WarehouseError::Invariant("warehouse has no workstations".into()))?;
        Ok(StationChoice::Overflow(self.stations[idx].id))
    }

    /// Drive `robot` and its pod to `station`; returns the trip duration.
    pub fn send_to_station(&mut self, robot: RobotId, station: StationId) -> WarehouseResult<f64> {
        let station_pos = self.stations[station.index()].pos;
        let pod = self.carried_pod(robot)?;
        let secs = self.robots[robot.index()].head_to_station(
            station, station_pos, self.metric, &self.kinematics,
        )?;
        self.pods[pod.index()].move_to(station_pos);
        Ok(secs)
    }

    /// `robot` reached its station.  Returns the picking duration if picking
    /// starts immediately, `None` if the robot waits in line.
    pub fn arrive_at_station(&mut self, robot: RobotId, rng: &mut SimRng) -> WarehouseResult<Option<f64>> {
        let station = self.assigned_station(robot)?;
        let picking = self.stations[station.index()].arrive(robot, rng);
        self.free_stations.remove(&station);
        Ok(picking)
    }

    /// Picking for `robot`'s order finished.  Hands the station to the next
    /// robot in line, or frees it.
    pub fn finish_picking(&mut self, robot: RobotId, rng: &mut SimRng) -> WarehouseResult<PickOutcome> {
        let station = self.assigned_station(robot)?;
        let order = self.robots[robot.index()].take_order()?;
        let next = self.stations[station.index()].finish(robot, rng)?;
        if next.is_none() {
            self.free_stations.insert(station);
        }
        Ok(PickOutcome { order, next, station })
    }

    /// Send `robot` back with its pod to a vacated slot.
    ///
    /// Returns the chosen slot and the seconds until the pod is set down.
    pub fn send_to_storage(&mut self, robot: RobotId, rng: &mut SimRng) -> WarehouseResult<(SlotId, f64)> {
        let pod = self.carried_pod(robot)?;
        let from = self.robots[robot.index()].pos;
        let slot = self.vacated.take(from, rng).ok_or_else(|| {
            WarehouseError::Invariant(format!("no vacated slot for the pod carried by {robot}"))
        })?;
        self.layout.claim(slot)?;
        let slot_pos = self.layout.pos(slot);
        let secs = self.robots[robot.index()].head_to_slot(
            slot, slot_pos, self.metric, &self.kinematics,
        )?;
        self.pods[pod.index()].move_to(slot_pos);
        Ok((slot, secs))
    }

    /// The pod is set down; robot and pod become free again.
    pub fn store_pod(&mut self, robot: RobotId) -> WarehouseResult<PodId> {
        let (pod, slot) = self.robots[robot.index()].store_pod()?;
        let p = &mut self.pods[pod.index()];
        p.store(slot, self.layout.pos(slot))?;
        let item = p.item;
        self.free_robots.insert(robot);
        self.free_pods[item.index()].insert(pod);
        Ok(pod)
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    fn carried_pod(&self, robot: RobotId) -> WarehouseResult<PodId> {
        self.robots[robot.index()].carried_pod.ok_or(WarehouseError::RobotIdle(robot))
    }

    fn assigned_station(&self, robot: RobotId) -> WarehouseResult<StationId> {
        self.robots[robot.index()].station.ok_or(WarehouseError::NoStation(robot))
    }

    /// Position of a free-standing or carried pod.
    pub fn pod_pos(&self, pod: PodId) -> Point {
        self.pods[pod.index()].pos
    }
}
