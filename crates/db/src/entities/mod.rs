//! `SeaORM` entity definitions.

pub mod bom_components;
pub mod boms;
pub mod chart_of_accounts;
pub mod companies;
pub mod customers;
pub mod inventory_items;
pub mod journal_voucher_lines;
pub mod journal_vouchers;
pub mod payment_voucher_lines;
pub mod payment_vouchers;
pub mod production_operations;
pub mod production_orders;
pub mod sales_invoice_items;
pub mod sales_invoices;
pub mod sea_orm_active_enums;
pub mod stock_movements;
pub mod supplier_invoices;
pub mod suppliers;
pub mod voucher_sequences;
