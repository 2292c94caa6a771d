//! Ledger domain types for voucher creation and posting.

use chrono::NaiveDate;
use ledgermill_shared::types::{AccountId, CustomerId, SupplierId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Voucher status in the posting workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoucherStatus {
    /// Voucher holds a typed intent and no ledger lines yet.
    Draft,
    /// Lines are materialized and immutable.
    Posted,
    /// Peer-reviewed and accepted (terminal).
    Approved,
    /// Declined (terminal). Posted ledger effect requires a reversal.
    Rejected,
}

impl VoucherStatus {
    /// Returns true if no further transitions are legal from this status.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// Returns true if the voucher's lines are immutable.
    #[must_use]
    pub fn lines_immutable(&self) -> bool {
        !matches!(self, Self::Draft)
    }
}

/// The business event a voucher records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoucherSource {
    /// Manually entered journal voucher.
    ManualJournal,
    /// Sales invoice issuance.
    SalesInvoice,
    /// Production order completion.
    ProductionOrder,
    /// Customer payment receipt.
    PaymentVoucher,
    /// Supplier bill payment.
    SupplierBill,
    /// Opening balance posting.
    OpeningBalance,
    /// Reversal of a previous voucher.
    Reversal,
}

impl VoucherSource {
    /// Returns the voucher number prefix for this source.
    #[must_use]
    pub const fn number_prefix(self) -> &'static str {
        match self {
            Self::ManualJournal => "JV",
            Self::SalesInvoice => "SI",
            Self::ProductionOrder => "PR",
            Self::PaymentVoucher => "PV",
            Self::SupplierBill => "SB",
            Self::OpeningBalance => "OB",
            Self::Reversal => "RV",
        }
    }

    /// Returns true if vouchers from this source post directly.
    ///
    /// System-generated vouchers skip the approval workflow; manual journal
    /// entries start as drafts.
    #[must_use]
    pub const fn posts_directly(self) -> bool {
        !matches!(self, Self::ManualJournal)
    }
}

/// Counterparty reference on a voucher line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "id")]
pub enum PayeeRef {
    /// A customer.
    Customer(CustomerId),
    /// A supplier.
    Supplier(SupplierId),
}

/// The kind of document a voucher references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceType {
    /// A sales invoice.
    SalesInvoice,
    /// A production order.
    ProductionOrder,
    /// A payment voucher.
    PaymentVoucher,
    /// A supplier invoice.
    SupplierInvoice,
    /// Another journal voucher (reversals).
    JournalVoucher,
}

/// Reference to the document that originated a voucher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    /// The kind of document referenced.
    pub reference_type: ReferenceType,
    /// The referenced document's ID.
    pub reference_id: Uuid,
}

/// Input for a single voucher line.
///
/// Exactly one of `debit`/`credit` must be non-zero; validation enforces
/// this before anything is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineInput {
    /// The account to post to.
    pub account_id: AccountId,
    /// Debit amount (0 if this is a credit line).
    pub debit: Decimal,
    /// Credit amount (0 if this is a debit line).
    pub credit: Decimal,
    /// Optional line description.
    pub description: Option<String>,
    /// Optional counterparty.
    pub payee: Option<PayeeRef>,
}

impl LineInput {
    /// Creates a debit line.
    #[must_use]
    pub fn debit(account_id: AccountId, amount: Decimal) -> Self {
        Self {
            account_id,
            debit: amount,
            credit: Decimal::ZERO,
            description: None,
            payee: None,
        }
    }

    /// Creates a credit line.
    #[must_use]
    pub fn credit(account_id: AccountId, amount: Decimal) -> Self {
        Self {
            account_id,
            debit: Decimal::ZERO,
            credit: amount,
            description: None,
            payee: None,
        }
    }

    /// Attaches a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attaches a counterparty.
    #[must_use]
    pub const fn with_payee(mut self, payee: PayeeRef) -> Self {
        self.payee = Some(payee);
        self
    }
}

/// Input for posting a new voucher.
#[derive(Debug, Clone)]
pub struct VoucherDraft {
    /// The accounting date.
    pub entry_date: NaiveDate,
    /// The business event being recorded.
    pub source: VoucherSource,
    /// Narration describing the voucher.
    pub narration: String,
    /// The document that originated this voucher, if any.
    pub reference: Option<DocumentRef>,
    /// The voucher lines (must have at least 2).
    pub lines: Vec<LineInput>,
}

/// Voucher totals for validation and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoucherTotals {
    /// Total debit amount.
    pub debits: Decimal,
    /// Total credit amount.
    pub credits: Decimal,
}

impl VoucherTotals {
    /// Creates totals from debit and credit sums.
    #[must_use]
    pub const fn new(debits: Decimal, credits: Decimal) -> Self {
        Self { debits, credits }
    }

    /// Returns the difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.debits - self.credits
    }

    /// Returns true if the totals balance within the epsilon tolerance.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.difference().abs() < super::validation::BALANCE_EPSILON
    }
}

/// Typed accounting intent carried by a draft voucher.
///
/// Drafts awaiting approval store their intent here instead of ledger
/// lines; posting materializes the lines from the intent. This replaces
/// the legacy practice of stuffing JSON into the narration text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum VoucherIntent {
    /// Money received: debit the deposit account, credit revenue.
    Income {
        /// Asset account receiving the funds.
        deposit_account: AccountId,
        /// Revenue account being credited.
        revenue_account: AccountId,
        /// The amount.
        amount: Decimal,
    },
    /// Money paid out: debit the expense account, credit the payment account.
    Payment {
        /// Expense account being debited.
        expense_account: AccountId,
        /// Asset account the payment draws on.
        payment_account: AccountId,
        /// The amount.
        amount: Decimal,
    },
}

impl VoucherIntent {
    /// Materializes the intent into concrete voucher lines.
    #[must_use]
    pub fn materialize(&self) -> Vec<LineInput> {
        match *self {
            Self::Income {
                deposit_account,
                revenue_account,
                amount,
            } => vec![
                LineInput::debit(deposit_account, amount),
                LineInput::credit(revenue_account, amount),
            ],
            Self::Payment {
                expense_account,
                payment_account,
                amount,
            } => vec![
                LineInput::debit(expense_account, amount),
                LineInput::credit(payment_account, amount),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_status_terminal() {
        assert!(!VoucherStatus::Draft.is_terminal());
        assert!(!VoucherStatus::Posted.is_terminal());
        assert!(VoucherStatus::Approved.is_terminal());
        assert!(VoucherStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_lines_immutable_after_draft() {
        assert!(!VoucherStatus::Draft.lines_immutable());
        assert!(VoucherStatus::Posted.lines_immutable());
        assert!(VoucherStatus::Approved.lines_immutable());
        assert!(VoucherStatus::Rejected.lines_immutable());
    }

    #[test]
    fn test_source_posting_policy() {
        assert!(!VoucherSource::ManualJournal.posts_directly());
        assert!(VoucherSource::SalesInvoice.posts_directly());
        assert!(VoucherSource::ProductionOrder.posts_directly());
        assert!(VoucherSource::OpeningBalance.posts_directly());
        assert!(VoucherSource::Reversal.posts_directly());
    }

    #[test]
    fn test_line_constructors() {
        let account = AccountId::new();
        let line = LineInput::debit(account, dec!(100));
        assert_eq!(line.debit, dec!(100));
        assert_eq!(line.credit, Decimal::ZERO);

        let line = LineInput::credit(account, dec!(50)).with_description("VAT");
        assert_eq!(line.credit, dec!(50));
        assert_eq!(line.description.as_deref(), Some("VAT"));
    }

    #[test]
    fn test_totals_balanced_within_epsilon() {
        assert!(VoucherTotals::new(dec!(100.00), dec!(100.00)).is_balanced());
        assert!(VoucherTotals::new(dec!(100.00), dec!(99.995)).is_balanced());
        assert!(!VoucherTotals::new(dec!(100.00), dec!(99.99)).is_balanced());
        assert!(!VoucherTotals::new(dec!(100.00), dec!(50.00)).is_balanced());
    }

    #[test]
    fn test_income_intent_materializes_balanced_lines() {
        let deposit = AccountId::new();
        let revenue = AccountId::new();
        let intent = VoucherIntent::Income {
            deposit_account: deposit,
            revenue_account: revenue,
            amount: dec!(250),
        };

        let lines = intent.materialize();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], LineInput::debit(deposit, dec!(250)));
        assert_eq!(lines[1], LineInput::credit(revenue, dec!(250)));
    }

    #[test]
    fn test_payment_intent_materializes_balanced_lines() {
        let expense = AccountId::new();
        let bank = AccountId::new();
        let intent = VoucherIntent::Payment {
            expense_account: expense,
            payment_account: bank,
            amount: dec!(75.50),
        };

        let lines = intent.materialize();
        assert_eq!(lines[0].debit, dec!(75.50));
        assert_eq!(lines[1].credit, dec!(75.50));
    }
}
