//! Ledger error types for validation and state errors.

use ledgermill_shared::AppError;
use rust_decimal::Decimal;
use thiserror::Error;

use super::types::VoucherStatus;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Voucher must have at least 2 lines.
    #[error("Voucher must have at least 2 lines")]
    InsufficientLines,

    /// A line must have exactly one non-zero side.
    #[error("Line {ordinal} must have exactly one of debit or credit non-zero")]
    InvalidLine {
        /// Zero-based line position.
        ordinal: usize,
    },

    /// Line amounts cannot be negative.
    #[error("Line {ordinal} has a negative amount")]
    NegativeAmount {
        /// Zero-based line position.
        ordinal: usize,
    },

    /// Voucher is not balanced (debits != credits beyond epsilon).
    #[error("Voucher is not balanced. Debits: {debits}, Credits: {credits}")]
    UnbalancedVoucher {
        /// Total debit amount.
        debits: Decimal,
        /// Total credit amount.
        credits: Decimal,
    },

    // ========== State Errors ==========
    /// Illegal status transition.
    #[error("Cannot transition voucher from {from:?} to {to:?}")]
    InvalidTransition {
        /// The current status.
        from: VoucherStatus,
        /// The attempted target status.
        to: VoucherStatus,
    },

    /// Voucher cannot be deleted in its current state.
    #[error("Voucher in status {status:?} cannot be deleted")]
    NotDeletable {
        /// The voucher's status.
        status: VoucherStatus,
    },

    /// A lines-less draft has no typed intent to materialize.
    #[error("Draft voucher has no intent to materialize lines from")]
    MissingIntent,

    /// The voucher was already reversed.
    #[error("Voucher has already been reversed")]
    AlreadyReversed,
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientLines => "INSUFFICIENT_LINES",
            Self::InvalidLine { .. } => "INVALID_LINE",
            Self::NegativeAmount { .. } => "NEGATIVE_AMOUNT",
            Self::UnbalancedVoucher { .. } => "UNBALANCED_VOUCHER",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::NotDeletable { .. } => "NOT_DELETABLE",
            Self::MissingIntent => "MISSING_INTENT",
            Self::AlreadyReversed => "ALREADY_REVERSED",
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientLines
            | LedgerError::InvalidLine { .. }
            | LedgerError::NegativeAmount { .. } => Self::Validation(err.to_string()),
            LedgerError::UnbalancedVoucher { .. } => Self::BusinessRule(err.to_string()),
            LedgerError::InvalidTransition { .. }
            | LedgerError::NotDeletable { .. }
            | LedgerError::MissingIntent
            | LedgerError::AlreadyReversed => Self::InvalidState(err.to_string()),
        }
    }
}
