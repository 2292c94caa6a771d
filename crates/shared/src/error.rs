//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// This is the outermost taxonomy callers see. Domain crates define richer
/// typed errors (ledger, valuation, costing) that convert into these
/// categories at the boundary.
#[derive(Debug, Error)]
pub enum AppError {
    /// Validation error (malformed/missing input - caller's fault, no retry).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Business rule violation (e.g. unbalanced voucher, insufficient stock).
    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Operation not legal in the current state.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Concurrent modification / lock contention - safe to retry.
    #[error("Concurrency conflict, please retry")]
    ConcurrencyConflict,

    /// Transient persistence failure - safe to retry the whole operation.
    #[error("Persistence failure")]
    Persistence(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BusinessRule(_) => "BUSINESS_RULE_VIOLATION",
            Self::NotFound(_) => "NOT_FOUND",
            Self::InvalidState(_) => "INVALID_STATE",
            Self::ConcurrencyConflict => "CONCURRENCY_CONFLICT",
            Self::Persistence(_) => "PERSISTENCE_FAILURE",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true if retrying the whole operation may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrencyConflict | Self::Persistence(_))
    }

    /// Returns the message shown to end users.
    ///
    /// Validation and business-rule errors are actionable and pass through;
    /// persistence and concurrency errors return a generic retry-safe
    /// message without leaking internals.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(_)
            | Self::BusinessRule(_)
            | Self::NotFound(_)
            | Self::InvalidState(_) => self.to_string(),
            Self::ConcurrencyConflict => {
                "The record was modified concurrently, please retry".to_string()
            }
            Self::Persistence(_) | Self::Internal(_) => {
                "A temporary error occurred, please retry".to_string()
            }
        }
    }
}
