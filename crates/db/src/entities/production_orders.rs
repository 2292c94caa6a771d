//! `SeaORM` entity for production orders.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::OrderStatus;

#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "production_orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company_id: Uuid,
    pub bom_id: Uuid,
    pub order_number: String,
    pub order_date: Date,
    pub gross_planned: Decimal,
    pub good_planned: Decimal,
    pub defective_planned: Decimal,
    pub total_material_cost: Decimal,
    pub cost_per_unit: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::boms::Entity",
        from = "Column::BomId",
        to = "super::boms::Column::Id"
    )]
    Boms,
    #[sea_orm(has_many = "super::production_operations::Entity")]
    ProductionOperations,
}

impl Related<super::production_operations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductionOperations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
