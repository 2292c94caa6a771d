//! Stock repository: items and the append-only movement stream.
//!
//! There is no cached quantity or cost column anywhere; valuation is
//! always a replay of the item's movement history.

use chrono::{NaiveDate, Utc};
use ledgermill_core::ledger::DocumentRef;
use ledgermill_core::valuation::{valuate, valuate_trace, MovementSource, StockEvent, Valuation};
use ledgermill_shared::types::ItemId;
use ledgermill_shared::{AppError, RequestContext};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::{ItemKind, ReferenceType as DbReferenceType};
use crate::entities::{inventory_items, stock_movements};

/// Error types for stock operations.
#[derive(Debug, thiserror::Error)]
pub enum StockError {
    /// Item not found.
    #[error("Inventory item not found: {0}")]
    ItemNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<StockError> for AppError {
    fn from(err: StockError) -> Self {
        match err {
            StockError::ItemNotFound(id) => Self::NotFound(format!("Item {id}")),
            StockError::Database(e) => Self::Persistence(e.to_string()),
        }
    }
}

/// Input for creating an inventory item.
#[derive(Debug, Clone)]
pub struct CreateItemInput {
    /// Stock-keeping unit code, unique within the company.
    pub sku: String,
    /// Display name.
    pub name: String,
    /// Item classification.
    pub kind: ItemKind,
    /// Unit of measure, e.g. "pcs" or "kg".
    pub unit: String,
}

/// A movement to append to an item's stream.
#[derive(Debug, Clone)]
pub struct NewMovement {
    /// The item moved.
    pub item_id: ItemId,
    /// Date the movement took effect.
    pub movement_date: NaiveDate,
    /// Originating document kind.
    pub source: MovementSource,
    /// Signed quantity delta.
    pub quantity: Decimal,
    /// Cost per unit for receipts; zero for issues.
    pub unit_price: Decimal,
    /// Originating document, if any.
    pub reference: Option<DocumentRef>,
}

/// Stock repository.
#[derive(Debug, Clone)]
pub struct StockRepository {
    db: DatabaseConnection,
}

impl StockRepository {
    /// Creates a new stock repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an inventory item.
    ///
    /// # Errors
    ///
    /// Returns a database error if the insert fails (duplicate SKU).
    pub async fn create_item(
        &self,
        ctx: &RequestContext,
        input: CreateItemInput,
    ) -> Result<inventory_items::Model, StockError> {
        let now = Utc::now().into();
        let item = inventory_items::ActiveModel {
            id: Set(ItemId::new().into()),
            company_id: Set(ctx.company_id.into()),
            sku: Set(input.sku),
            name: Set(input.name),
            kind: Set(input.kind),
            unit: Set(input.unit),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let model = item.insert(&self.db).await?;
        tracing::debug!(item_id = %model.id, sku = %model.sku, "inventory item created");
        Ok(model)
    }

    /// Fetches an item by id within the tenant.
    ///
    /// # Errors
    ///
    /// Returns `ItemNotFound` if absent.
    pub async fn get_item(
        &self,
        ctx: &RequestContext,
        item_id: ItemId,
    ) -> Result<inventory_items::Model, StockError> {
        inventory_items::Entity::find_by_id(Uuid::from(item_id))
            .filter(inventory_items::Column::CompanyId.eq(Uuid::from(ctx.company_id)))
            .one(&self.db)
            .await?
            .ok_or(StockError::ItemNotFound(item_id.into()))
    }

    /// Appends a movement on a caller-supplied connection or transaction.
    ///
    /// `seq` is assigned by the database.
    ///
    /// # Errors
    ///
    /// Returns a database error if the insert fails.
    pub async fn append_movement_in<C: ConnectionTrait>(
        conn: &C,
        ctx: &RequestContext,
        movement: NewMovement,
    ) -> Result<stock_movements::Model, StockError> {
        let row = stock_movements::ActiveModel {
            id: Set(Uuid::now_v7()),
            company_id: Set(ctx.company_id.into()),
            item_id: Set(movement.item_id.into()),
            movement_date: Set(movement.movement_date),
            source: Set(movement.source.into()),
            quantity: Set(movement.quantity),
            unit_price: Set(movement.unit_price),
            reference_id: Set(movement.reference.map(|r| r.reference_id)),
            reference_type: Set(movement.reference.map(|r| DbReferenceType::from(r.reference_type))),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };
        let model = row.insert(conn).await?;
        tracing::debug!(
            item_id = %model.item_id,
            quantity = %model.quantity,
            source = ?model.source,
            "stock movement appended"
        );
        Ok(model)
    }

    /// Loads an item's full movement history ordered by (date, seq).
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn history(
        &self,
        ctx: &RequestContext,
        item_id: ItemId,
    ) -> Result<Vec<stock_movements::Model>, StockError> {
        Self::history_in(&self.db, ctx, item_id).await
    }

    /// History on a caller-supplied connection or transaction.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn history_in<C: ConnectionTrait>(
        conn: &C,
        ctx: &RequestContext,
        item_id: ItemId,
    ) -> Result<Vec<stock_movements::Model>, StockError> {
        let rows = stock_movements::Entity::find()
            .filter(stock_movements::Column::CompanyId.eq(Uuid::from(ctx.company_id)))
            .filter(stock_movements::Column::ItemId.eq(Uuid::from(item_id)))
            .order_by_asc(stock_movements::Column::MovementDate)
            .order_by_asc(stock_movements::Column::Seq)
            .all(conn)
            .await?;
        Ok(rows)
    }

    /// Replays an item's history into its current valuation.
    ///
    /// # Errors
    ///
    /// Returns a database error if the history query fails.
    pub async fn valuate_item(
        &self,
        ctx: &RequestContext,
        item_id: ItemId,
    ) -> Result<Valuation, StockError> {
        Self::valuate_item_in(&self.db, ctx, item_id).await
    }

    /// Valuation on a caller-supplied connection or transaction.
    ///
    /// # Errors
    ///
    /// Returns a database error if the history query fails.
    pub async fn valuate_item_in<C: ConnectionTrait>(
        conn: &C,
        ctx: &RequestContext,
        item_id: ItemId,
    ) -> Result<Valuation, StockError> {
        let events = Self::events_in(conn, ctx, item_id).await?;
        Ok(valuate(&events))
    }

    /// Returns the item's movement ledger with the running valuation
    /// after each movement.
    ///
    /// # Errors
    ///
    /// Returns a database error if the history query fails.
    pub async fn movement_ledger(
        &self,
        ctx: &RequestContext,
        item_id: ItemId,
    ) -> Result<Vec<(StockEvent, Valuation)>, StockError> {
        let events = Self::events_in(&self.db, ctx, item_id).await?;
        Ok(valuate_trace(&events))
    }

    async fn events_in<C: ConnectionTrait>(
        conn: &C,
        ctx: &RequestContext,
        item_id: ItemId,
    ) -> Result<Vec<StockEvent>, StockError> {
        let rows = Self::history_in(conn, ctx, item_id).await?;
        Ok(rows.iter().map(to_event).collect())
    }
}

fn to_event(row: &stock_movements::Model) -> StockEvent {
    StockEvent {
        movement_date: row.movement_date,
        seq: row.seq,
        quantity: row.quantity,
        unit_price: row.unit_price,
        source: row.source.into(),
    }
}
