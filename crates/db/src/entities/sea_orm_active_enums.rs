//! Postgres enum mappings and conversions to the core domain enums.

use ledgermill_core::costing::{OrderStatus as CoreOrderStatus, ProductionStage};
use ledgermill_core::directory::{AccountType as CoreAccountType, SystemRole};
use ledgermill_core::ledger::{VoucherSource as CoreVoucherSource, VoucherStatus as CoreVoucherStatus};
use ledgermill_core::valuation::MovementSource as CoreMovementSource;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_type")]
pub enum AccountType {
    /// Asset account.
    #[sea_orm(string_value = "asset")]
    Asset,
    /// Liability account.
    #[sea_orm(string_value = "liability")]
    Liability,
    /// Equity account.
    #[sea_orm(string_value = "equity")]
    Equity,
    /// Revenue account.
    #[sea_orm(string_value = "revenue")]
    Revenue,
    /// Expense account.
    #[sea_orm(string_value = "expense")]
    Expense,
}

impl From<AccountType> for CoreAccountType {
    fn from(value: AccountType) -> Self {
        match value {
            AccountType::Asset => Self::Asset,
            AccountType::Liability => Self::Liability,
            AccountType::Equity => Self::Equity,
            AccountType::Revenue => Self::Revenue,
            AccountType::Expense => Self::Expense,
        }
    }
}

impl From<CoreAccountType> for AccountType {
    fn from(value: CoreAccountType) -> Self {
        match value {
            CoreAccountType::Asset => Self::Asset,
            CoreAccountType::Liability => Self::Liability,
            CoreAccountType::Equity => Self::Equity,
            CoreAccountType::Revenue => Self::Revenue,
            CoreAccountType::Expense => Self::Expense,
        }
    }
}

/// Well-known logical role an account fills (nullable on the row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "system_role")]
#[allow(missing_docs)]
pub enum SystemRoleDb {
    #[sea_orm(string_value = "cash")]
    Cash,
    #[sea_orm(string_value = "bank")]
    Bank,
    #[sea_orm(string_value = "accounts_receivable")]
    AccountsReceivable,
    #[sea_orm(string_value = "accounts_payable")]
    AccountsPayable,
    #[sea_orm(string_value = "sales_revenue")]
    SalesRevenue,
    #[sea_orm(string_value = "sales_discount")]
    SalesDiscount,
    #[sea_orm(string_value = "vat_payable")]
    VatPayable,
    #[sea_orm(string_value = "input_vat")]
    InputVat,
    #[sea_orm(string_value = "wht_payable")]
    WhtPayable,
    #[sea_orm(string_value = "cost_of_goods_sold")]
    CostOfGoodsSold,
    #[sea_orm(string_value = "raw_material_inventory")]
    RawMaterialInventory,
    #[sea_orm(string_value = "finished_goods_inventory")]
    FinishedGoodsInventory,
    #[sea_orm(string_value = "work_in_progress")]
    WorkInProgress,
    #[sea_orm(string_value = "opening_equity")]
    OpeningEquity,
}

impl From<SystemRoleDb> for SystemRole {
    fn from(value: SystemRoleDb) -> Self {
        match value {
            SystemRoleDb::Cash => Self::Cash,
            SystemRoleDb::Bank => Self::Bank,
            SystemRoleDb::AccountsReceivable => Self::AccountsReceivable,
            SystemRoleDb::AccountsPayable => Self::AccountsPayable,
            SystemRoleDb::SalesRevenue => Self::SalesRevenue,
            SystemRoleDb::SalesDiscount => Self::SalesDiscount,
            SystemRoleDb::VatPayable => Self::VatPayable,
            SystemRoleDb::InputVat => Self::InputVat,
            SystemRoleDb::WhtPayable => Self::WhtPayable,
            SystemRoleDb::CostOfGoodsSold => Self::CostOfGoodsSold,
            SystemRoleDb::RawMaterialInventory => Self::RawMaterialInventory,
            SystemRoleDb::FinishedGoodsInventory => Self::FinishedGoodsInventory,
            SystemRoleDb::WorkInProgress => Self::WorkInProgress,
            SystemRoleDb::OpeningEquity => Self::OpeningEquity,
        }
    }
}

impl From<SystemRole> for SystemRoleDb {
    fn from(value: SystemRole) -> Self {
        match value {
            SystemRole::Cash => Self::Cash,
            SystemRole::Bank => Self::Bank,
            SystemRole::AccountsReceivable => Self::AccountsReceivable,
            SystemRole::AccountsPayable => Self::AccountsPayable,
            SystemRole::SalesRevenue => Self::SalesRevenue,
            SystemRole::SalesDiscount => Self::SalesDiscount,
            SystemRole::VatPayable => Self::VatPayable,
            SystemRole::InputVat => Self::InputVat,
            SystemRole::WhtPayable => Self::WhtPayable,
            SystemRole::CostOfGoodsSold => Self::CostOfGoodsSold,
            SystemRole::RawMaterialInventory => Self::RawMaterialInventory,
            SystemRole::FinishedGoodsInventory => Self::FinishedGoodsInventory,
            SystemRole::WorkInProgress => Self::WorkInProgress,
            SystemRole::OpeningEquity => Self::OpeningEquity,
        }
    }
}

/// Voucher workflow status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "voucher_status")]
#[allow(missing_docs)]
pub enum VoucherStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "posted")]
    Posted,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl From<VoucherStatus> for CoreVoucherStatus {
    fn from(value: VoucherStatus) -> Self {
        match value {
            VoucherStatus::Draft => Self::Draft,
            VoucherStatus::Posted => Self::Posted,
            VoucherStatus::Approved => Self::Approved,
            VoucherStatus::Rejected => Self::Rejected,
        }
    }
}

impl From<CoreVoucherStatus> for VoucherStatus {
    fn from(value: CoreVoucherStatus) -> Self {
        match value {
            CoreVoucherStatus::Draft => Self::Draft,
            CoreVoucherStatus::Posted => Self::Posted,
            CoreVoucherStatus::Approved => Self::Approved,
            CoreVoucherStatus::Rejected => Self::Rejected,
        }
    }
}

/// The business event a voucher records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "voucher_source")]
#[allow(missing_docs)]
pub enum VoucherSource {
    #[sea_orm(string_value = "manual_journal")]
    ManualJournal,
    #[sea_orm(string_value = "sales_invoice")]
    SalesInvoice,
    #[sea_orm(string_value = "production_order")]
    ProductionOrder,
    #[sea_orm(string_value = "payment_voucher")]
    PaymentVoucher,
    #[sea_orm(string_value = "supplier_bill")]
    SupplierBill,
    #[sea_orm(string_value = "opening_balance")]
    OpeningBalance,
    #[sea_orm(string_value = "reversal")]
    Reversal,
}

impl From<VoucherSource> for CoreVoucherSource {
    fn from(value: VoucherSource) -> Self {
        match value {
            VoucherSource::ManualJournal => Self::ManualJournal,
            VoucherSource::SalesInvoice => Self::SalesInvoice,
            VoucherSource::ProductionOrder => Self::ProductionOrder,
            VoucherSource::PaymentVoucher => Self::PaymentVoucher,
            VoucherSource::SupplierBill => Self::SupplierBill,
            VoucherSource::OpeningBalance => Self::OpeningBalance,
            VoucherSource::Reversal => Self::Reversal,
        }
    }
}

impl From<CoreVoucherSource> for VoucherSource {
    fn from(value: CoreVoucherSource) -> Self {
        match value {
            CoreVoucherSource::ManualJournal => Self::ManualJournal,
            CoreVoucherSource::SalesInvoice => Self::SalesInvoice,
            CoreVoucherSource::ProductionOrder => Self::ProductionOrder,
            CoreVoucherSource::PaymentVoucher => Self::PaymentVoucher,
            CoreVoucherSource::SupplierBill => Self::SupplierBill,
            CoreVoucherSource::OpeningBalance => Self::OpeningBalance,
            CoreVoucherSource::Reversal => Self::Reversal,
        }
    }
}

/// Counterparty kind on a voucher or payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payee_type")]
#[allow(missing_docs)]
pub enum PayeeType {
    #[sea_orm(string_value = "customer")]
    Customer,
    #[sea_orm(string_value = "supplier")]
    Supplier,
}

/// Inventory item classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "item_kind")]
#[allow(missing_docs)]
pub enum ItemKind {
    #[sea_orm(string_value = "raw_material")]
    RawMaterial,
    #[sea_orm(string_value = "semi_finished")]
    SemiFinished,
    #[sea_orm(string_value = "product")]
    Product,
}

/// Originating document of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "movement_source")]
#[allow(missing_docs)]
pub enum MovementSource {
    #[sea_orm(string_value = "opening_stock")]
    OpeningStock,
    #[sea_orm(string_value = "goods_receipt")]
    GoodsReceipt,
    #[sea_orm(string_value = "production_output")]
    ProductionOutput,
    #[sea_orm(string_value = "consumption")]
    Consumption,
    #[sea_orm(string_value = "issue")]
    Issue,
    #[sea_orm(string_value = "sale")]
    Sale,
    #[sea_orm(string_value = "sales_return")]
    SalesReturn,
}

impl From<MovementSource> for CoreMovementSource {
    fn from(value: MovementSource) -> Self {
        match value {
            MovementSource::OpeningStock => Self::OpeningStock,
            MovementSource::GoodsReceipt => Self::GoodsReceipt,
            MovementSource::ProductionOutput => Self::ProductionOutput,
            MovementSource::Consumption => Self::Consumption,
            MovementSource::Issue => Self::Issue,
            MovementSource::Sale => Self::Sale,
            MovementSource::SalesReturn => Self::SalesReturn,
        }
    }
}

impl From<CoreMovementSource> for MovementSource {
    fn from(value: CoreMovementSource) -> Self {
        match value {
            CoreMovementSource::OpeningStock => Self::OpeningStock,
            CoreMovementSource::GoodsReceipt => Self::GoodsReceipt,
            CoreMovementSource::ProductionOutput => Self::ProductionOutput,
            CoreMovementSource::Consumption => Self::Consumption,
            CoreMovementSource::Issue => Self::Issue,
            CoreMovementSource::Sale => Self::Sale,
            CoreMovementSource::SalesReturn => Self::SalesReturn,
        }
    }
}

/// Production stage of a bill of materials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "production_stage")]
#[allow(missing_docs)]
pub enum Stage {
    #[sea_orm(string_value = "injection")]
    Injection,
    #[sea_orm(string_value = "blowing")]
    Blowing,
}

impl From<Stage> for ProductionStage {
    fn from(value: Stage) -> Self {
        match value {
            Stage::Injection => Self::Injection,
            Stage::Blowing => Self::Blowing,
        }
    }
}

impl From<ProductionStage> for Stage {
    fn from(value: ProductionStage) -> Self {
        match value {
            ProductionStage::Injection => Self::Injection,
            ProductionStage::Blowing => Self::Blowing,
        }
    }
}

/// Production order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "order_status")]
#[allow(missing_docs)]
pub enum OrderStatus {
    #[sea_orm(string_value = "planned")]
    Planned,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "completed")]
    Completed,
}

impl From<OrderStatus> for CoreOrderStatus {
    fn from(value: OrderStatus) -> Self {
        match value {
            OrderStatus::Planned => Self::Planned,
            OrderStatus::InProgress => Self::InProgress,
            OrderStatus::Completed => Self::Completed,
        }
    }
}

impl From<CoreOrderStatus> for OrderStatus {
    fn from(value: CoreOrderStatus) -> Self {
        match value {
            CoreOrderStatus::Planned => Self::Planned,
            CoreOrderStatus::InProgress => Self::InProgress,
            CoreOrderStatus::Completed => Self::Completed,
        }
    }
}

/// Sales invoice status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "invoice_status")]
#[allow(missing_docs)]
pub enum InvoiceStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "issued")]
    Issued,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// Supplier bill payment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "bill_status")]
#[allow(missing_docs)]
pub enum BillStatus {
    #[sea_orm(string_value = "open")]
    Open,
    #[sea_orm(string_value = "partially_paid")]
    PartiallyPaid,
    #[sea_orm(string_value = "paid")]
    Paid,
}

/// Payment voucher status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_status")]
#[allow(missing_docs)]
pub enum PaymentStatus {
    #[sea_orm(string_value = "posted")]
    Posted,
    #[sea_orm(string_value = "reversed")]
    Reversed,
}

/// Document kind referenced by a voucher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "reference_type")]
#[allow(missing_docs)]
pub enum ReferenceType {
    #[sea_orm(string_value = "sales_invoice")]
    SalesInvoice,
    #[sea_orm(string_value = "production_order")]
    ProductionOrder,
    #[sea_orm(string_value = "payment_voucher")]
    PaymentVoucher,
    #[sea_orm(string_value = "supplier_invoice")]
    SupplierInvoice,
    #[sea_orm(string_value = "journal_voucher")]
    JournalVoucher,
}

impl From<ReferenceType> for ledgermill_core::ledger::ReferenceType {
    fn from(value: ReferenceType) -> Self {
        match value {
            ReferenceType::SalesInvoice => Self::SalesInvoice,
            ReferenceType::ProductionOrder => Self::ProductionOrder,
            ReferenceType::PaymentVoucher => Self::PaymentVoucher,
            ReferenceType::SupplierInvoice => Self::SupplierInvoice,
            ReferenceType::JournalVoucher => Self::JournalVoucher,
        }
    }
}

impl From<ledgermill_core::ledger::ReferenceType> for ReferenceType {
    fn from(value: ledgermill_core::ledger::ReferenceType) -> Self {
        match value {
            ledgermill_core::ledger::ReferenceType::SalesInvoice => Self::SalesInvoice,
            ledgermill_core::ledger::ReferenceType::ProductionOrder => Self::ProductionOrder,
            ledgermill_core::ledger::ReferenceType::PaymentVoucher => Self::PaymentVoucher,
            ledgermill_core::ledger::ReferenceType::SupplierInvoice => Self::SupplierInvoice,
            ledgermill_core::ledger::ReferenceType::JournalVoucher => Self::JournalVoucher,
        }
    }
}
