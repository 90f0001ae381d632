//! `rmfs-core` — foundational types for the `rmfs` warehouse simulator.
//!
//! This crate is a dependency of every other `rmfs-*` crate.  It has no
//! `rmfs-*` dependencies and few external ones (`rand`, `rand_distr`,
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`ids`]     | `RobotId`, `PodId`, `SlotId`, `StationId`, `OrderId`, `ItemType` |
//! | [`geo`]     | `Point`, `DistanceMetric`, travel durations                  |
//! | [`time`]    | `SimTime`, `SimClock`                                        |
//! | [`config`]  | `SimConfig`, `LayoutConfig`, `RobotConfig`, `StoragePolicy`  |
//! | [`rng`]     | `SimRng`, `Exponential`                                      |
//! | [`error`]   | `RmfsError`, `RmfsResult`                                    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public data types.   |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{LayoutConfig, RobotConfig, SLOTS_PER_BLOCK, SimConfig, StoragePolicy};
pub use error::{RmfsError, RmfsResult};
pub use geo::{DistanceMetric, Point, travel_secs};
pub use ids::{ItemType, OrderId, PodId, RobotId, SlotId, StationId};
pub use rng::{Exponential, SimRng};
pub use time::{SimClock, SimTime};
