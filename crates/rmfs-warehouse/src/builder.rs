//! Fluent builder for constructing a [`Warehouse`] from a [`SimConfig`].
//!
//! # Usage
//!
//! ```rust
//! use rmfs_core::{SimConfig, SimRng};
//! use rmfs_warehouse::WarehouseBuilder;
//!
//! let config = SimConfig::new(3_600.0, 4, 0.01);
//! let mut rng = SimRng::new(config.seed);
//! let warehouse = WarehouseBuilder::from_config(&config).build(&mut rng).unwrap();
//!
//! assert_eq!(warehouse.pods().len(), 1440);
//! assert_eq!(warehouse.robots().len(), 4);
//! ```

use std::collections::BTreeSet;

use rmfs_core::{
    DistanceMetric, Exponential, ItemType, LayoutConfig, PodId, Point, RmfsError, RobotConfig,
    RobotId, SimConfig, SimRng, SlotId, StationId, StoragePolicy,
};

use crate::{FreeSet, Layout, Pod, Robot, Station, VacatedSlots, Warehouse, WarehouseResult};

/// Fluent builder for [`Warehouse`].
///
/// Everything is read from the config at construction; the only overrides
/// are the ones tests need most often.
pub struct WarehouseBuilder {
    layout:       LayoutConfig,
    kinematics:   RobotConfig,
    metric:       DistanceMetric,
    storage:      StoragePolicy,
    robot_num:    u32,
    picking_rate: f64,
    robot_start:  Point,
}

impl WarehouseBuilder {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            layout:       config.layout.clone(),
            kinematics:   config.robot.clone(),
            metric:       config.metric,
            storage:      config.storage,
            robot_num:    config.robot_num,
            picking_rate: config.picking_rate,
            robot_start:  Point::ORIGIN,
        }
    }

    /// Where every robot starts.  Defaults to the origin.
    pub fn robot_start(mut self, pos: Point) -> Self {
        self.robot_start = pos;
        self
    }

    /// Lay out slots and pods, partition pods over item types, and place
    /// stations and robots.
    ///
    /// `rng` drives the item partition shuffle only.  The caller is expected
    /// to pass a stream dedicated to construction.
    ///
    /// # Errors
    /// Returns a configuration error for a layout without stations, item
    /// types, or enough pods, for an empty robot pool, and for a picking rate
    /// that is not positive.
    pub fn build(self, rng: &mut SimRng) -> WarehouseResult<Warehouse> {
        self.layout.validate()?;
        if self.robot_num == 0 {
            return Err(RmfsError::config("robot_num must be at least 1").into());
        }
        let picking = Exponential::new(self.picking_rate)?;

        // ── Slots and pods ────────────────────────────────────────────────
        let layout = Layout::build(&self.layout);
        let pod_count = layout.len();
        let item_pods = partition_items(pod_count, self.layout.item_types, rng);

        let mut item_of = vec![ItemType(0); pod_count];
        for (item, pods) in item_pods.iter().enumerate() {
            for &pod in pods {
                item_of[pod.index()] = ItemType(item as u16);
            }
        }
        let pods: Vec<Pod> = (0..pod_count)
            .map(|i| {
                let slot = SlotId(i as u32);
                Pod::new(PodId(i as u32), item_of[i], slot, layout.pos(slot))
            })
            .collect();

        let free_pods: Vec<FreeSet<PodId>> = item_pods
            .iter()
            .map(|ids| {
                let mut set = FreeSet::with_capacity(ids.len());
                for &id in ids {
                    set.insert(id);
                }
                set
            })
            .collect();

        // ── Stations and robots ───────────────────────────────────────────
        let stations: Vec<Station> = self
            .layout
            .stations
            .iter()
            .enumerate()
            .map(|(i, &pos)| Station::new(StationId(i as u16), pos, picking))
            .collect();
        let free_stations: BTreeSet<StationId> = stations.iter().map(|s| s.id).collect();

        let robots: Vec<Robot> = (0..self.robot_num)
            .map(|i| Robot::new(RobotId(i), self.robot_start))
            .collect();
        let free_robots: BTreeSet<RobotId> = robots.iter().map(|r| r.id).collect();

        Ok(Warehouse {
            metric:     self.metric,
            kinematics: self.kinematics,
            vacated:    VacatedSlots::new(self.storage, self.metric),
            layout,
            pods,
            item_pods,
            stations,
            robots,
            free_robots,
            free_pods,
            free_stations,
        })
    }
}

/// Shuffle pod ids and cut them into `item_types` consecutive chunks.
///
/// Chunks differ in size by at most one; the first `pods % item_types` types
/// get the extra pod.  `item_types` is non-zero once the layout is validated.
fn partition_items(pods: usize, item_types: u16, rng: &mut SimRng) -> Vec<Vec<PodId>> {
    let types = item_types as usize;
    let mut ids: Vec<PodId> = (0..pods).map(|i| PodId(i as u32)).collect();
    rng.shuffle(&mut ids);

    let base = pods / types;
    let extra = pods % types;
    let mut rest = ids.as_slice();
    (0..types)
        .map(|t| {
            let (chunk, tail) = rest.split_at(base + usize::from(t < extra));
            rest = tail;
            chunk.to_vec()
        })
        .collect()
}
