//! `SeaORM` entity for bill-of-materials components.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "bom_components")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub bom_id: Uuid,
    pub component_item_id: Uuid,
    /// Quantity consumed per one gross output unit.
    pub quantity_required: Decimal,
    pub unit: String,
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
    #[sea_orm(
        belongs_to = "super::inventory_items::Entity",
        from = "Column::ComponentItemId",
        to = "super::inventory_items::Column::Id"
    )]
    InventoryItems,
}

impl Related<super::boms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Boms.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
