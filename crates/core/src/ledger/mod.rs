//! Double-entry journal voucher logic.
//!
//! This module implements the core ledger functionality:
//! - Voucher and line domain types
//! - Balance validation (debits = credits within epsilon)
//! - Voucher number formatting
//! - Draft/posted/approved/rejected state machine
//! - Reversing voucher construction
//! - Error types for ledger operations

pub mod error;
pub mod numbering;
pub mod reversal;
pub mod types;
pub mod validation;
pub mod workflow;

#[cfg(test)]
mod validation_props;

pub use error::LedgerError;
pub use numbering::VoucherNumber;
pub use reversal::{build_reversal, PostedLine};
pub use types::{
    DocumentRef, LineInput, PayeeRef, ReferenceType, VoucherDraft, VoucherIntent, VoucherSource,
    VoucherStatus, VoucherTotals,
};
pub use validation::{validate_lines, BALANCE_EPSILON};
pub use workflow::{TransitionOutcome, VoucherWorkflow};
