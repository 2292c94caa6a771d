//! Account directory domain types.

use ledgermill_shared::types::AccountId;
use serde::{Deserialize, Serialize};

/// Account type classification.
///
/// The type drives validation: a payment account must be an Asset, sales
/// postings credit a Revenue account, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Asset account (cash, bank, receivables, inventory).
    Asset,
    /// Liability account (payables, VAT/WHT payable).
    Liability,
    /// Equity account (capital, opening balance equity).
    Equity,
    /// Revenue account (sales).
    Revenue,
    /// Expense account (COGS, discounts).
    Expense,
}

/// Well-known logical roles an account can fill.
///
/// Orchestrators never hard-code account identifiers; they resolve one of
/// these roles against the company's chart of accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemRole {
    /// Cash on hand.
    Cash,
    /// Bank / deposit account.
    Bank,
    /// Trade receivables.
    AccountsReceivable,
    /// Trade payables.
    AccountsPayable,
    /// Sales revenue.
    SalesRevenue,
    /// Sales discounts granted.
    SalesDiscount,
    /// Output VAT collected on sales.
    VatPayable,
    /// Input VAT paid on purchases.
    InputVat,
    /// Withholding tax payable.
    WhtPayable,
    /// Cost of goods sold.
    CostOfGoodsSold,
    /// Raw material inventory.
    RawMaterialInventory,
    /// Finished goods inventory.
    FinishedGoodsInventory,
    /// Work in progress.
    WorkInProgress,
    /// Opening balance equity.
    OpeningEquity,
}

impl SystemRole {
    /// Returns the account type an account mapped to this role must have.
    #[must_use]
    pub const fn expected_type(self) -> AccountType {
        match self {
            Self::Cash
            | Self::Bank
            | Self::AccountsReceivable
            | Self::RawMaterialInventory
            | Self::FinishedGoodsInventory
            | Self::WorkInProgress => AccountType::Asset,
            Self::AccountsPayable | Self::VatPayable | Self::WhtPayable => AccountType::Liability,
            Self::InputVat => AccountType::Asset,
            Self::SalesRevenue => AccountType::Revenue,
            Self::SalesDiscount | Self::CostOfGoodsSold => AccountType::Expense,
            Self::OpeningEquity => AccountType::Equity,
        }
    }
}

/// A resolved account reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRef {
    /// The account ID.
    pub id: AccountId,
    /// The account code (unique per company).
    pub code: String,
    /// Human-readable account name.
    pub name: String,
    /// The account's type.
    pub account_type: AccountType,
    /// The logical role this account fills, if any.
    pub role: Option<SystemRole>,
}
