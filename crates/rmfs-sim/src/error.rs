use rmfs_core::{ItemType, OrderId, RmfsError, SimTime};
use rmfs_warehouse::WarehouseError;
use thiserror::Error;

/// Everything that can abort a run.
///
/// Apart from `Core(Config)` at build time, each variant is a defect: the run
/// stops instead of producing statistics from inconsistent state.
#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] RmfsError),

    #[error(transparent)]
    Warehouse(#[from] WarehouseError),

    #[error("{0} is not an active order")]
    UnknownOrder(OrderId),

    #[error("arrival for {item} but the warehouse stocks only {types} item types")]
    UnknownItem { item: ItemType, types: u16 },

    #[error("arrival gap must be finite and non-negative, got {0}")]
    InvalidGap(f64),

    #[error("active order count would drop below zero at {0}")]
    NegativeQueue(SimTime),

    #[error("order accounting broken: {0}")]
    Accounting(String),
}

pub type SimResult<T> = Result<T, SimError>;
