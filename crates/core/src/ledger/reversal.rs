//! Reversal voucher construction.
//!
//! Posted vouchers are never edited or deleted. To undo one, a reversing
//! voucher is built with every line's debit and credit swapped, dated on
//! the reversal date, and linked back to the original.

use chrono::NaiveDate;
use ledgermill_shared::types::{AccountId, VoucherId};

use super::types::{DocumentRef, LineInput, PayeeRef, ReferenceType, VoucherDraft, VoucherSource};
use rust_decimal::Decimal;

/// A line as posted on an existing voucher.
#[derive(Debug, Clone)]
pub struct PostedLine {
    /// The account the line was posted to.
    pub account_id: AccountId,
    /// Posted debit amount.
    pub debit: Decimal,
    /// Posted credit amount.
    pub credit: Decimal,
    /// Line description, if any.
    pub description: Option<String>,
    /// Counterparty, if any.
    pub payee: Option<PayeeRef>,
}

/// Builds a reversal draft for a posted voucher.
///
/// Each line's debit and credit are swapped; descriptions and payees are
/// carried over so counterparty sub-ledgers net to zero.
#[must_use]
pub fn build_reversal(
    original_id: VoucherId,
    original_number: &str,
    reversal_date: NaiveDate,
    lines: &[PostedLine],
) -> VoucherDraft {
    let reversed = lines
        .iter()
        .map(|line| LineInput {
            account_id: line.account_id,
            debit: line.credit,
            credit: line.debit,
            description: line.description.clone(),
            payee: line.payee,
        })
        .collect();

    VoucherDraft {
        entry_date: reversal_date,
        source: VoucherSource::Reversal,
        narration: format!("Reversal of {original_number}"),
        reference: Some(DocumentRef {
            reference_type: ReferenceType::JournalVoucher,
            reference_id: original_id.into(),
        }),
        lines: reversed,
    }
}
