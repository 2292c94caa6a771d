//! `SeaORM` entity for sales invoice headers.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::InvoiceStatus;

#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "sales_invoices")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company_id: Uuid,
    pub customer_id: Uuid,
    pub invoice_number: String,
    pub invoice_date: Date,
    pub due_date: Option<Date>,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub vat_amount: Decimal,
    pub total: Decimal,
    /// Cost of goods sold recorded at issue time, used for cancellation.
    pub total_cogs: Decimal,
    pub amount_paid: Decimal,
    pub status: InvoiceStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customers::Entity",
        from = "Column::CustomerId",
        to = "super::customers::Column::Id"
    )]
    Customers,
    #[sea_orm(has_many = "super::sales_invoice_items::Entity")]
    SalesInvoiceItems,
}

impl Related<super::sales_invoice_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SalesInvoiceItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
