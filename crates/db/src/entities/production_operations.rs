//! `SeaORM` entity for production machine operations (injection only).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "production_operations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub order_id: Uuid,
    pub cycle_time_seconds: Decimal,
    pub cavities_per_round: Decimal,
    pub running_hours: Decimal,
    pub scrap_percent: Decimal,
}

#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::production_orders::Entity",
        from = "Column::OrderId",
        to = "super::production_orders::Column::Id"
    )]
    ProductionOrders,
}

impl Related<super::production_orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductionOrders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
