//! `SeaORM` entity for journal voucher headers.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{ReferenceType, VoucherSource, VoucherStatus};

#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "journal_vouchers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company_id: Uuid,
    pub voucher_number: String,
    pub entry_date: Date,
    pub source: VoucherSource,
    pub reference_id: Option<Uuid>,
    pub reference_type: Option<ReferenceType>,
    pub narration: String,
    pub total_debits: Decimal,
    pub total_credits: Decimal,
    pub status: VoucherStatus,
    /// Typed pending payload for draft vouchers awaiting approval.
    pub intent: Option<Json>,
    pub created_by: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::companies::Entity",
        from = "Column::CompanyId",
        to = "super::companies::Column::Id"
    )]
    Companies,
    #[sea_orm(has_many = "super::journal_voucher_lines::Entity")]
    JournalVoucherLines,
}

impl Related<super::journal_voucher_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JournalVoucherLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
