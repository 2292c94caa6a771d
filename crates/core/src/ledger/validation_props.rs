//! Property-based tests for voucher line validation.

use ledgermill_shared::types::{AccountId, VoucherId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::reversal::{build_reversal, PostedLine};
use super::types::LineInput;
use super::validation::{validate_lines, BALANCE_EPSILON};

/// Strategy for a positive amount with 2 decimal places, up to 1,000,000.00.
fn amount() -> impl Strategy<Value = Decimal> {
    (1i64..=100_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    /// A debit mirrored by an equal credit always validates.
    #[test]
    fn prop_mirrored_pair_always_balances(value in amount()) {
        let lines = vec![
            LineInput::debit(AccountId::new(), value),
            LineInput::credit(AccountId::new(), value),
        ];

        let totals = validate_lines(&lines).unwrap();
        prop_assert_eq!(totals.debits, value);
        prop_assert_eq!(totals.credits, value);
        prop_assert!(totals.difference().is_zero());
    }

    /// Splitting a credit across many lines never breaks the balance.
    #[test]
    fn prop_split_credits_balance(value in amount(), splits in 2usize..6) {
        let share = value / Decimal::from(splits as i64);
        let mut lines = vec![LineInput::debit(AccountId::new(), value)];
        let mut allocated = Decimal::ZERO;
        for _ in 0..splits - 1 {
            lines.push(LineInput::credit(AccountId::new(), share));
            allocated += share;
        }
        // Last split absorbs the rounding remainder.
        lines.push(LineInput::credit(AccountId::new(), value - allocated));

        prop_assert!(validate_lines(&lines).is_ok());
    }

    /// Any pair off by at least a full cent is rejected.
    #[test]
    fn prop_cent_discrepancy_rejected(value in amount(), off_cents in 1i64..10_000) {
        let skew = Decimal::new(off_cents, 2);
        let lines = vec![
            LineInput::debit(AccountId::new(), value + skew),
            LineInput::credit(AccountId::new(), value),
        ];

        prop_assert!(validate_lines(&lines).is_err());
    }

    /// Sub-epsilon residue always passes.
    #[test]
    fn prop_sub_cent_residue_accepted(value in amount(), residue_milli in 1i64..10) {
        let residue = Decimal::new(residue_milli, 3);
        prop_assume!(residue < BALANCE_EPSILON);
        let lines = vec![
            LineInput::debit(AccountId::new(), value + residue),
            LineInput::credit(AccountId::new(), value),
        ];

        prop_assert!(validate_lines(&lines).is_ok());
    }

    /// Reversing any valid voucher yields another valid voucher whose
    /// totals mirror the original.
    #[test]
    fn prop_reversal_preserves_validity(debit in amount(), split in amount()) {
        prop_assume!(split < debit);
        let posted = vec![
            PostedLine {
                account_id: AccountId::new(),
                debit,
                credit: Decimal::ZERO,
                description: None,
                payee: None,
            },
            PostedLine {
                account_id: AccountId::new(),
                debit: Decimal::ZERO,
                credit: split,
                description: None,
                payee: None,
            },
            PostedLine {
                account_id: AccountId::new(),
                debit: Decimal::ZERO,
                credit: debit - split,
                description: None,
                payee: None,
            },
        ];

        let draft = build_reversal(
            VoucherId::new(),
            "JV-2026-00001",
            chrono::NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            &posted,
        );

        let totals = validate_lines(&draft.lines).unwrap();
        prop_assert_eq!(totals.debits, debit);
        prop_assert_eq!(totals.credits, debit);
    }
}
