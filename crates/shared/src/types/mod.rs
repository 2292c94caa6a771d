//! Shared domain types.

pub mod id;

pub use id::{
    AccountId, BomId, CompanyId, CustomerId, ItemId, PaymentVoucherId, ProductionOrderId,
    SalesInvoiceId, StockMovementId, SupplierId, SupplierInvoiceId, UserId, VoucherId,
    VoucherLineId,
};
