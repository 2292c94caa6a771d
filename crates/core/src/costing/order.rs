//! Production order lifecycle.

use serde::{Deserialize, Serialize};

use super::error::CostingError;

/// Production order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Created with planned quantities.
    Planned,
    /// Released to the shop floor.
    InProgress,
    /// Finished; quantities and costs are actuals. Terminal.
    Completed,
}

impl OrderStatus {
    /// Validates that an order can be completed from this status.
    ///
    /// Completion is terminal: completing a completed order fails with
    /// `AlreadyCompleted` rather than silently recomputing.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyCompleted` when already completed.
    pub fn ensure_completable(self) -> Result<(), CostingError> {
        match self {
            Self::Planned | Self::InProgress => Ok(()),
            Self::Completed => Err(CostingError::AlreadyCompleted),
        }
    }

    /// Validates that an order can be released to the shop floor.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` unless the order is planned.
    pub fn ensure_releasable(self) -> Result<(), CostingError> {
        match self {
            Self::Planned => Ok(()),
            _ => Err(CostingError::InvalidState {
                status: self,
                operation: "released",
            }),
        }
    }
}
