//! `SeaORM` entity for payment voucher headers.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{PayeeType, PaymentStatus};

#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "payment_vouchers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company_id: Uuid,
    pub payee_type: PayeeType,
    pub payee_id: Uuid,
    pub payment_date: Date,
    pub payment_account_id: Uuid,
    pub amount: Decimal,
    pub status: PaymentStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::chart_of_accounts::Entity",
        from = "Column::PaymentAccountId",
        to = "super::chart_of_accounts::Column::Id"
    )]
    ChartOfAccounts,
    #[sea_orm(has_many = "super::payment_voucher_lines::Entity")]
    PaymentVoucherLines,
}

impl Related<super::payment_voucher_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PaymentVoucherLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
