//! Costing error types.

use ledgermill_shared::AppError;
use thiserror::Error;

use super::order::OrderStatus;

/// Errors that can occur during production costing.
#[derive(Debug, Error)]
pub enum CostingError {
    /// Completion was attempted on a completed order.
    #[error("Production order is already completed")]
    AlreadyCompleted,

    /// The order is not in a state that allows the operation.
    #[error("Production order in status {status:?} cannot be {operation}")]
    InvalidState {
        /// The order's current status.
        status: OrderStatus,
        /// The attempted operation, e.g. "completed".
        operation: &'static str,
    },

    /// An injection order carries no operations to expand.
    #[error("Injection order has no operations")]
    NoOperations,

    /// An operation parameter is out of range.
    #[error("Invalid operation parameter: {reason}")]
    InvalidParameter {
        /// What was wrong.
        reason: String,
    },
}

impl CostingError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyCompleted => "ALREADY_COMPLETED",
            Self::InvalidState { .. } => "INVALID_ORDER_STATE",
            Self::NoOperations => "NO_OPERATIONS",
            Self::InvalidParameter { .. } => "INVALID_PARAMETER",
        }
    }
}

impl From<CostingError> for AppError {
    fn from(err: CostingError) -> Self {
        match err {
            CostingError::AlreadyCompleted | CostingError::InvalidState { .. } => {
                Self::InvalidState(err.to_string())
            }
            CostingError::NoOperations | CostingError::InvalidParameter { .. } => {
                Self::Validation(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(CostingError::AlreadyCompleted.error_code(), "ALREADY_COMPLETED");
        assert_eq!(
            CostingError::InvalidState {
                status: OrderStatus::Planned,
                operation: "completed",
            }
            .error_code(),
            "INVALID_ORDER_STATE"
        );
    }

    #[test]
    fn test_app_error_categories() {
        let app: AppError = CostingError::AlreadyCompleted.into();
        assert_eq!(app.error_code(), "INVALID_STATE");

        let app: AppError = CostingError::NoOperations.into();
        assert_eq!(app.error_code(), "VALIDATION_ERROR");
    }
}
