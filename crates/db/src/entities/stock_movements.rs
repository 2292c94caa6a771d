//! `SeaORM` entity for stock movements.
//!
//! The append-only event stream the valuation engine replays. `seq` is a
//! database-assigned insertion id used as the same-day tie-breaker.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{MovementSource, ReferenceType};

#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "stock_movements")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company_id: Uuid,
    pub item_id: Uuid,
    pub movement_date: Date,
    pub source: MovementSource,
    /// Signed quantity delta: positive receipts, negative issues.
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub reference_id: Option<Uuid>,
    pub reference_type: Option<ReferenceType>,
    /// Insertion id assigned by a database sequence; never set by the
    /// application.
    #[sea_orm(unique)]
    pub seq: i64,
    pub created_at: DateTimeWithTimeZone,
}

#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::inventory_items::Entity",
        from = "Column::ItemId",
        to = "super::inventory_items::Column::Id"
    )]
    InventoryItems,
}

impl Related<super::inventory_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InventoryItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
