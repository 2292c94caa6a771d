//! `SeaORM` entity for payment allocations against invoices.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "payment_voucher_lines")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub payment_id: Uuid,
    pub invoice_id: Uuid,
    pub allocated: Decimal,
}

#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::payment_vouchers::Entity",
        from = "Column::PaymentId",
        to = "super::payment_vouchers::Column::Id"
    )]
    PaymentVouchers,
}

impl Related<super::payment_vouchers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PaymentVouchers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
