//! Shared error type for the transaction orchestrators.

use ledgermill_core::costing::CostingError;
use ledgermill_core::directory::DirectoryError;
use ledgermill_core::ledger::LedgerError;
use ledgermill_shared::AppError;
use rust_decimal::Decimal;
use sea_orm::DbErr;
use uuid::Uuid;

use crate::repositories::{AccountError, BomError, PostingError, ProductionError, StockError};

/// Errors raised while orchestrating a business document.
#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    /// Input failed validation before anything was persisted.
    #[error("{0}")]
    Validation(String),

    /// A referenced row does not exist in the company.
    #[error("{0} not found")]
    NotFound(String),

    /// The item does not hold enough stock for the requested quantity.
    #[error("Insufficient stock for item {item_id}: requested {requested}, available {available}")]
    InsufficientStock {
        /// The item short of stock.
        item_id: Uuid,
        /// Quantity the document asked for.
        requested: Decimal,
        /// Quantity currently on hand.
        available: Decimal,
    },

    /// The document is in a state that forbids this operation.
    #[error("{0}")]
    InvalidState(String),

    /// Role or account resolution failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// Core ledger rule violation.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Costing rule violation.
    #[error(transparent)]
    Costing(#[from] CostingError),

    /// Voucher posting failed.
    #[error(transparent)]
    Posting(#[from] PostingError),

    /// Account lookup failed.
    #[error(transparent)]
    Account(#[from] AccountError),

    /// Stock operation failed.
    #[error(transparent)]
    Stock(#[from] StockError),

    /// Bill-of-materials lookup failed.
    #[error(transparent)]
    Bom(#[from] BomError),

    /// Production order operation failed.
    #[error(transparent)]
    Production(#[from] ProductionError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<OrchestratorError> for AppError {
    fn from(err: OrchestratorError) -> Self {
        match err {
            OrchestratorError::Validation(msg) => Self::Validation(msg),
            OrchestratorError::NotFound(what) => Self::NotFound(what),
            OrchestratorError::InsufficientStock { .. } => Self::BusinessRule(err.to_string()),
            OrchestratorError::InvalidState(msg) => Self::InvalidState(msg),
            OrchestratorError::Directory(e) => e.into(),
            OrchestratorError::Ledger(e) => e.into(),
            OrchestratorError::Costing(e) => e.into(),
            OrchestratorError::Posting(e) => e.into(),
            OrchestratorError::Account(e) => e.into(),
            OrchestratorError::Stock(e) => e.into(),
            OrchestratorError::Bom(e) => e.into(),
            OrchestratorError::Production(e) => e.into(),
            OrchestratorError::Database(e) => db_error(&e),
        }
    }
}

/// Maps lock and serialization failures to a retryable conflict.
fn db_error(err: &DbErr) -> AppError {
    let msg = err.to_string();
    if msg.contains("could not serialize") || msg.contains("deadlock detected") {
        AppError::ConcurrencyConflict
    } else {
        AppError::Persistence(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_insufficient_stock_is_business_rule() {
        let err = OrchestratorError::InsufficientStock {
            item_id: Uuid::now_v7(),
            requested: dec!(10),
            available: dec!(4),
        };
        assert!(matches!(AppError::from(err), AppError::BusinessRule(_)));
    }

    #[test]
    fn test_serialization_failure_maps_to_conflict() {
        let err = OrchestratorError::Database(DbErr::Custom(
            "could not serialize access due to concurrent update".into(),
        ));
        assert!(matches!(AppError::from(err), AppError::ConcurrencyConflict));
    }
}
