//! Bill-of-materials repository.

use chrono::Utc;
use ledgermill_core::costing::ComponentRequirement;
use ledgermill_core::costing::ProductionStage;
use ledgermill_shared::types::{BomId, ItemId};
use ledgermill_shared::{AppError, RequestContext};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, TransactionTrait,
};
use sea_orm::Set;
use uuid::Uuid;

use crate::entities::{bom_components, boms};

/// Error types for bill-of-materials operations.
#[derive(Debug, thiserror::Error)]
pub enum BomError {
    /// Bill of materials not found.
    #[error("Bill of materials not found: {0}")]
    NotFound(Uuid),

    /// A bill of materials must consume at least one component.
    #[error("Bill of materials has no components")]
    NoComponents,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<BomError> for AppError {
    fn from(err: BomError) -> Self {
        match err {
            BomError::NotFound(id) => Self::NotFound(format!("Bill of materials {id}")),
            BomError::NoComponents => Self::Validation(err.to_string()),
            BomError::Database(e) => Self::Persistence(e.to_string()),
        }
    }
}

/// One component line on a new bill of materials.
#[derive(Debug, Clone)]
pub struct ComponentInput {
    /// The item consumed.
    pub component_item_id: ItemId,
    /// Quantity consumed per one gross output unit.
    pub quantity_required: Decimal,
    /// Unit of measure.
    pub unit: String,
}

/// Input for creating a bill of materials.
#[derive(Debug, Clone)]
pub struct CreateBomInput {
    /// Production stage this recipe belongs to.
    pub stage: ProductionStage,
    /// The item the recipe produces.
    pub output_item_id: ItemId,
    /// Display name.
    pub name: String,
    /// Component lines.
    pub components: Vec<ComponentInput>,
}

/// A bill of materials with its component lines.
#[derive(Debug, Clone)]
pub struct BomWithComponents {
    /// The header row.
    pub bom: boms::Model,
    /// Component lines.
    pub components: Vec<bom_components::Model>,
}

impl BomWithComponents {
    /// Maps component rows into the costing engine's requirement form.
    #[must_use]
    pub fn requirements(&self) -> Vec<ComponentRequirement> {
        self.components
            .iter()
            .map(|c| ComponentRequirement {
                item_id: ItemId::from_uuid(c.component_item_id),
                quantity_required: c.quantity_required,
            })
            .collect()
    }
}

/// Bill-of-materials repository.
#[derive(Debug, Clone)]
pub struct BomRepository {
    db: DatabaseConnection,
}

impl BomRepository {
    /// Creates a new bill-of-materials repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a bill of materials with its components atomically.
    ///
    /// # Errors
    ///
    /// Returns `NoComponents` if the component list is empty, or a
    /// database error if an insert fails.
    pub async fn create_bom(
        &self,
        ctx: &RequestContext,
        input: CreateBomInput,
    ) -> Result<BomWithComponents, BomError> {
        if input.components.is_empty() {
            return Err(BomError::NoComponents);
        }

        let txn = self.db.begin().await?;

        let now = Utc::now().into();
        let bom = boms::ActiveModel {
            id: Set(BomId::new().into()),
            company_id: Set(ctx.company_id.into()),
            stage: Set(input.stage.into()),
            output_item_id: Set(input.output_item_id.into()),
            name: Set(input.name),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let bom = bom.insert(&txn).await?;

        let mut components = Vec::with_capacity(input.components.len());
        for component in input.components {
            let row = bom_components::ActiveModel {
                id: Set(Uuid::now_v7()),
                bom_id: Set(bom.id),
                component_item_id: Set(component.component_item_id.into()),
                quantity_required: Set(component.quantity_required),
                unit: Set(component.unit),
            };
            components.push(row.insert(&txn).await?);
        }

        txn.commit().await?;
        tracing::debug!(bom_id = %bom.id, components = components.len(), "bill of materials created");
        Ok(BomWithComponents { bom, components })
    }

    /// Fetches a bill of materials with its components.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if absent in the company.
    pub async fn get_with_components(
        &self,
        ctx: &RequestContext,
        bom_id: BomId,
    ) -> Result<BomWithComponents, BomError> {
        Self::get_with_components_in(&self.db, ctx, bom_id).await
    }

    /// Fetch on a caller-supplied connection or transaction.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if absent in the company.
    pub async fn get_with_components_in<C: ConnectionTrait>(
        conn: &C,
        ctx: &RequestContext,
        bom_id: BomId,
    ) -> Result<BomWithComponents, BomError> {
        let bom = boms::Entity::find_by_id(Uuid::from(bom_id))
            .filter(boms::Column::CompanyId.eq(Uuid::from(ctx.company_id)))
            .one(conn)
            .await?
            .ok_or(BomError::NotFound(bom_id.into()))?;

        let components = bom_components::Entity::find()
            .filter(bom_components::Column::BomId.eq(bom.id))
            .all(conn)
            .await?;

        Ok(BomWithComponents { bom, components })
    }
}
