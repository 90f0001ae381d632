//! `rmfs-warehouse` — the physical side of the simulation: storage layout,
//! entity state machines, and the indexes the engine queries on every event.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`layout`]    | `Layout`, `Slot`: the fixed slot grid and its occupancy   |
//! | [`robot`]     | `Robot` state machine                                     |
//! | [`pod`]       | `Pod` state                                               |
//! | [`station`]   | `Station`: single-server FIFO picking queue               |
//! | [`order`]     | `Order`, `OrderStatus`                                    |
//! | [`free_set`]  | `FreeSet`: O(1) insert/remove/random-choice id set        |
//! | [`slots`]     | `VacatedSlots`: storage destinations per `StoragePolicy`  |
//! | [`warehouse`] | `Warehouse` arena with atomic cross-entity transitions    |
//! | [`builder`]   | `WarehouseBuilder`                                        |
//! | [`error`]     | `WarehouseError`, `WarehouseResult`                       |
//!
//! `Warehouse::audit` (in a private module) checks every cross-entity
//! invariant in one pass.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                      |
//! |---------|-------------------------------------------------------------|
//! | `serde` | `Serialize`/`Deserialize` on slots, robots, pods, orders.   |

pub mod builder;
pub mod error;
pub mod free_set;
pub mod layout;
pub mod order;
pub mod pod;
pub mod robot;
pub mod slots;
pub mod station;
pub mod warehouse;

mod audit;


pub use builder::WarehouseBuilder;
pub use error::{WarehouseError, WarehouseResult};
pub use free_set::FreeSet;
pub use layout::{Layout, Slot};
pub use order::{Order, OrderStatus};
pub use pod::Pod;
pub use robot::Robot;
pub use slots::VacatedSlots;
pub use station::Station;
pub use warehouse::{PickOutcome, StationChoice, Warehouse};
