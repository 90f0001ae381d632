//! Run configuration.
//!
//! Typically built in code with [`SimConfig::new`] plus field overrides, or
//! loaded from a JSON file by the application crate (enable the `serde`
//! feature).  Every field has a default, so a config file only needs to name
//! what it changes.
//!
//! [`SimConfig::validate`] is the fail-fast gate: a configuration that would
//! deadlock or divide by zero at runtime is rejected here instead.  The shape
//! checks live in [`LayoutConfig::validate`], which the warehouse builder also
//! runs on its own.

use crate::{DistanceMetric, Point, RmfsError, RmfsResult, SimTime};

/// Slots per storage block between two cross aisles.
pub const SLOTS_PER_BLOCK: u32 = 5;

// ── LayoutConfig ──────────────────────────────────────────────────────────────

/// Warehouse shape parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutConfig {
    /// Number of picking aisles.  Each aisle is flanked by two storage rows.
    pub pick_aisles: u32,
    /// Number of cross aisles cutting every row into `cross_aisles + 1` blocks.
    pub cross_aisles: u32,
    /// Number of distinct SKU classes.  Pods are split evenly between them.
    pub item_types: u16,
    /// Workstation positions, one station per entry.
    pub stations: Vec<Point>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            pick_aisles:  12,
            cross_aisles: 11,
            item_types:   60,
            stations:     vec![Point::new(6.0, 0.0), Point::new(41.0, 0.0), Point::new(76.0, 0.0)],
        }
    }
}

impl LayoutConfig {
    /// Storage rows in the grid (two per picking aisle).
    #[inline]
    pub fn row_count(&self) -> u32 {
        2 * self.pick_aisles
    }

    /// Slots in one storage row.
    #[inline]
    pub fn slots_per_row(&self) -> u32 {
        SLOTS_PER_BLOCK * (self.cross_aisles + 1)
    }

    /// Total slots, which is also the pod count (one pod per slot).
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.row_count() as usize * self.slots_per_row() as usize
    }

    /// Reject shapes that leave a station, pod, or item type missing.
    pub fn validate(&self) -> RmfsResult<()> {
        if self.pick_aisles == 0 {
            return Err(RmfsError::config("layout.pick_aisles must be at least 1"));
        }
        if self.stations.is_empty() {
            return Err(RmfsError::config("layout.stations must name at least one workstation"));
        }
        if self.stations.len() > u16::MAX as usize {
            return Err(RmfsError::config("too many workstations"));
        }
        if self.stations.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
            return Err(RmfsError::config("workstation coordinates must be finite"));
        }
        if self.item_types == 0 {
            return Err(RmfsError::config("layout.item_types must be at least 1"));
        }
        let pods = self.slot_count();
        if pods > u32::MAX as usize {
            return Err(RmfsError::config(format!("layout too large: {pods} slots")));
        }
        if self.item_types as usize > pods {
            return Err(RmfsError::config(format!(
                "{} item types cannot be spread over {pods} pods; some type would have no pod",
                self.item_types
            )));
        }
        Ok(())
    }
}

// ── RobotConfig ───────────────────────────────────────────────────────────────

/// Kinematics shared by every robot in the pool.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RobotConfig {
    /// Constant driving speed in m/s.
    pub speed: f64,
    /// Seconds spent lifting a pod off its slot.
    pub lift_secs: f64,
    /// Seconds spent setting a pod down on a slot.
    pub store_secs: f64,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self { speed: 1.3, lift_secs: 1.0, store_secs: 1.0 }
    }
}

// ── StoragePolicy ─────────────────────────────────────────────────────────────

/// Where a pod goes after picking.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StoragePolicy {
    /// Uniformly random slot among the currently vacated ones.
    #[default]
    Random,
    /// The vacated slot closest to the robot.
    Nearest,
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Simulated seconds to run.
    pub time_limit: f64,
    /// Size of the robot pool.
    pub robot_num: u32,
    /// Mean order arrivals per second (Poisson arrivals).
    pub order_enter_rate: f64,
    /// Fraction of `time_limit` treated as warmup and excluded from
    /// steady-state statistics.
    pub warmup_frac: f64,
    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,
    /// Mean picks per second at every workstation.
    pub picking_rate: f64,
    pub metric: DistanceMetric,
    pub storage: StoragePolicy,
    pub layout: LayoutConfig,
    pub robot: RobotConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            time_limit:       2.0 * 604_800.0, // two weeks
            robot_num:        2,
            order_enter_rate: 0.013,
            warmup_frac:      0.1,
            seed:             0,
            picking_rate:     1.0 / 15.0,
            metric:           DistanceMetric::default(),
            storage:          StoragePolicy::default(),
            layout:           LayoutConfig::default(),
            robot:            RobotConfig::default(),
        }
    }
}

impl SimConfig {
    /// Config with the three required run parameters and defaults elsewhere.
    pub fn new(time_limit: f64, robot_num: u32, order_enter_rate: f64) -> Self {
        Self { time_limit, robot_num, order_enter_rate, ..Self::default() }
    }

    /// Builder-style seed override.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// The simulated time limit as a timestamp.
    #[inline]
    pub fn end_time(&self) -> SimTime {
        SimTime::from_secs(self.time_limit)
    }

    /// Timestamp at which the warmup window ends.
    #[inline]
    pub fn warmup_boundary(&self) -> SimTime {
        SimTime::from_secs(self.warmup_frac * self.time_limit)
    }

    /// Length of the steady-state measurement window in seconds.
    #[inline]
    pub fn steady_state_secs(&self) -> f64 {
        self.time_limit * (1.0 - self.warmup_frac)
    }

    /// Reject parameters that cannot produce a meaningful run.
    pub fn validate(&self) -> RmfsResult<()> {
        positive("time_limit", self.time_limit)?;
        positive("order_enter_rate", self.order_enter_rate)?;
        positive("picking_rate", self.picking_rate)?;
        positive("robot.speed", self.robot.speed)?;
        non_negative("robot.lift_secs", self.robot.lift_secs)?;
        non_negative("robot.store_secs", self.robot.store_secs)?;

        if self.robot_num == 0 {
            return Err(RmfsError::config("robot_num must be at least 1"));
        }
        if !(0.0..1.0).contains(&self.warmup_frac) {
            return Err(RmfsError::config(format!(
                "warmup_frac must lie in [0, 1), got {}",
                self.warmup_frac
            )));
        }

        self.layout.validate()
    }
}

fn positive(name: &str, v: f64) -> RmfsResult<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(RmfsError::config(format!("{name} must be finite and positive, got {v}")))
    }
}

fn non_negative(name: &str, v: f64) -> RmfsResult<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(RmfsError::config(format!("{name} must be finite and non-negative, got {v}")))
    }
}
