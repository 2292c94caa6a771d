//! Production order repository.
//!
//! Planned quantities are expanded from machine parameters at creation
//! time; costing happens at completion on actual quantities.

use chrono::{NaiveDate, Utc};
use ledgermill_core::costing::{
    expand_run, CostingError, OperationParams, ProductionStage, RunQuantities,
};
use ledgermill_shared::types::{BomId, ProductionOrderId};
use ledgermill_shared::{AppError, RequestContext};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, IntoActiveModel, QueryFilter, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::OrderStatus;
use crate::entities::{production_operations, production_orders};
use crate::repositories::bom::{BomError, BomRepository, BomWithComponents};

/// Error types for production order operations.
#[derive(Debug, thiserror::Error)]
pub enum ProductionError {
    /// Production order not found.
    #[error("Production order not found: {0}")]
    NotFound(Uuid),

    /// Bill-of-materials lookup failed.
    #[error(transparent)]
    Bom(#[from] BomError),

    /// Costing rule violated.
    #[error(transparent)]
    Costing(#[from] CostingError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<ProductionError> for AppError {
    fn from(err: ProductionError) -> Self {
        match err {
            ProductionError::NotFound(id) => Self::NotFound(format!("Production order {id}")),
            ProductionError::Bom(e) => e.into(),
            ProductionError::Costing(e) => e.into(),
            ProductionError::Database(e) => Self::Persistence(e.to_string()),
        }
    }
}

/// Input for creating a production order.
#[derive(Debug, Clone)]
pub struct CreateOrderInput {
    /// The recipe the run follows.
    pub bom_id: BomId,
    /// Order number, unique within the company.
    pub order_number: String,
    /// Date the run is planned for.
    pub order_date: NaiveDate,
    /// Planned output for stages that do not derive quantities from
    /// machine parameters.
    pub planned_quantity: Decimal,
    /// Machine operations; required for injection runs.
    pub operations: Vec<OperationParams>,
}

/// A production order with its operations and recipe.
#[derive(Debug, Clone)]
pub struct OrderWithDetails {
    /// The order row.
    pub order: production_orders::Model,
    /// Machine operations on the order.
    pub operations: Vec<production_operations::Model>,
    /// The recipe the order follows.
    pub bom: BomWithComponents,
}

impl OrderWithDetails {
    /// Maps operation rows back into machine parameters.
    #[must_use]
    pub fn operation_params(&self) -> Vec<OperationParams> {
        self.operations.iter().map(to_params).collect()
    }
}

/// Production order repository.
#[derive(Debug, Clone)]
pub struct ProductionRepository {
    db: DatabaseConnection,
}

impl ProductionRepository {
    /// Creates a new production repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a production order in `Planned` status.
    ///
    /// Planned quantities are expanded from the operations for
    /// injection recipes, or taken from `planned_quantity` otherwise.
    /// Material cost stays zero until completion.
    ///
    /// # Errors
    ///
    /// Returns `NoOperations` for an injection run without operations,
    /// `Bom` if the recipe is missing, or a database error.
    pub async fn create_order(
        &self,
        ctx: &RequestContext,
        input: CreateOrderInput,
    ) -> Result<OrderWithDetails, ProductionError> {
        let txn = self.db.begin().await?;

        let bom = BomRepository::get_with_components_in(&txn, ctx, input.bom_id).await?;
        let stage = ProductionStage::from(bom.bom.stage);
        if stage == ProductionStage::Injection && input.operations.is_empty() {
            return Err(CostingError::NoOperations.into());
        }

        let planned = expand_run(stage, &input.operations, input.planned_quantity);

        let now = Utc::now().into();
        let order = production_orders::ActiveModel {
            id: Set(ProductionOrderId::new().into()),
            company_id: Set(ctx.company_id.into()),
            bom_id: Set(input.bom_id.into()),
            order_number: Set(input.order_number),
            order_date: Set(input.order_date),
            gross_planned: Set(planned.gross),
            good_planned: Set(planned.good),
            defective_planned: Set(planned.defective),
            total_material_cost: Set(Decimal::ZERO),
            cost_per_unit: Set(Decimal::ZERO),
            status: Set(OrderStatus::Planned),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let order = order.insert(&txn).await?;

        let mut operations = Vec::with_capacity(input.operations.len());
        for params in &input.operations {
            let row = production_operations::ActiveModel {
                id: Set(Uuid::now_v7()),
                order_id: Set(order.id),
                cycle_time_seconds: Set(params.cycle_time_seconds),
                cavities_per_round: Set(params.cavities_per_round),
                running_hours: Set(params.running_hours),
                scrap_percent: Set(params.scrap_percent),
            };
            operations.push(row.insert(&txn).await?);
        }

        txn.commit().await?;
        tracing::info!(
            order_id = %order.id,
            order_number = %order.order_number,
            gross_planned = %order.gross_planned,
            "production order created"
        );
        Ok(OrderWithDetails { order, operations, bom })
    }

    /// Fetches an order with its operations and recipe.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if absent in the company.
    pub async fn get_with_details(
        &self,
        ctx: &RequestContext,
        order_id: ProductionOrderId,
    ) -> Result<OrderWithDetails, ProductionError> {
        let order = production_orders::Entity::find_by_id(Uuid::from(order_id))
            .filter(production_orders::Column::CompanyId.eq(Uuid::from(ctx.company_id)))
            .one(&self.db)
            .await?
            .ok_or(ProductionError::NotFound(order_id.into()))?;
        Self::details_for(&self.db, ctx, order).await
    }

    /// Locks and fetches an order with its operations and recipe on a
    /// caller-supplied transaction.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if absent in the company.
    pub async fn find_locked_in(
        txn: &DatabaseTransaction,
        ctx: &RequestContext,
        order_id: ProductionOrderId,
    ) -> Result<OrderWithDetails, ProductionError> {
        let order = production_orders::Entity::find_by_id(Uuid::from(order_id))
            .filter(production_orders::Column::CompanyId.eq(Uuid::from(ctx.company_id)))
            .lock_exclusive()
            .one(txn)
            .await?
            .ok_or(ProductionError::NotFound(order_id.into()))?;
        Self::details_for(txn, ctx, order).await
    }

    /// Records actual quantities and costs and marks the order
    /// `Completed` on a caller-supplied transaction.
    ///
    /// # Errors
    ///
    /// Returns a database error if the update fails.
    pub async fn complete_in(
        txn: &DatabaseTransaction,
        order: production_orders::Model,
        actual: RunQuantities,
        total_material_cost: Decimal,
        cost_per_unit: Decimal,
    ) -> Result<production_orders::Model, ProductionError> {
        let mut row = order.into_active_model();
        row.gross_planned = Set(actual.gross);
        row.good_planned = Set(actual.good);
        row.defective_planned = Set(actual.defective);
        row.total_material_cost = Set(total_material_cost);
        row.cost_per_unit = Set(cost_per_unit);
        row.status = Set(OrderStatus::Completed);
        row.updated_at = Set(Utc::now().into());
        Ok(row.update(txn).await?)
    }

    async fn details_for<C: ConnectionTrait>(
        conn: &C,
        ctx: &RequestContext,
        order: production_orders::Model,
    ) -> Result<OrderWithDetails, ProductionError> {
        let operations = production_operations::Entity::find()
            .filter(production_operations::Column::OrderId.eq(order.id))
            .all(conn)
            .await?;
        let bom =
            BomRepository::get_with_components_in(conn, ctx, BomId::from_uuid(order.bom_id))
                .await?;
        Ok(OrderWithDetails { order, operations, bom })
    }
}

fn to_params(row: &production_operations::Model) -> OperationParams {
    OperationParams {
        cycle_time_seconds: row.cycle_time_seconds,
        cavities_per_round: row.cavities_per_round,
        running_hours: row.running_hours,
        scrap_percent: row.scrap_percent,
    }
}
