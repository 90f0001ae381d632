//! Base error type.
//!
//! Sub-crates define their own error enums and wrap `RmfsError` as one
//! variant via `#[from]`.

use thiserror::Error;

use crate::SimTime;

/// The error type for `rmfs-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum RmfsError {
    /// The run cannot start with these parameters.
    #[error("configuration error: {0}")]
    Config(String),

    /// An event was scheduled before the current clock value.
    #[error("clock regression: requested {requested} while at {now}")]
    ClockRegression { now: SimTime, requested: SimTime },
}

impl RmfsError {
    /// Shorthand for building a [`RmfsError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        RmfsError::Config(msg.into())
    }
}

/// Shorthand result type for all `rmfs-*` crates.
pub type RmfsResult<T> = Result<T, RmfsError>;
