//! Business rule validation for voucher lines.

use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::{LineInput, VoucherTotals};

/// Balance tolerance in currency units.
///
/// A voucher balances iff `|debits - credits| < 0.01`: a full cent of
/// discrepancy is rejected, sub-cent rounding residue passes.
pub const BALANCE_EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Validates a set of voucher lines and returns their totals.
///
/// Rules:
/// 1. At least 2 lines.
/// 2. No negative amounts.
/// 3. Each line has exactly one non-zero side.
/// 4. Debits equal credits within [`BALANCE_EPSILON`].
///
/// # Errors
///
/// Returns the first rule violation encountered.
pub fn validate_lines(lines: &[LineInput]) -> Result<VoucherTotals, LedgerError> {
    if lines.len() < 2 {
        return Err(LedgerError::InsufficientLines);
    }

    let mut debits = Decimal::ZERO;
    let mut credits = Decimal::ZERO;

    for (ordinal, line) in lines.iter().enumerate() {
        if line.debit < Decimal::ZERO || line.credit < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount { ordinal });
        }
        if line.debit.is_zero() == line.credit.is_zero() {
            return Err(LedgerError::InvalidLine { ordinal });
        }
        debits += line.debit;
        credits += line.credit;
    }

    let totals = VoucherTotals::new(debits, credits);
    if !totals.is_balanced() {
        return Err(LedgerError::UnbalancedVoucher { debits, credits });
    }

    Ok(totals)
}
