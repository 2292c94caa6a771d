//! Production completion orchestrator.
//!
//! Completion prices the run against the components' weighted averages
//! at completion time, posts the material cost through work in
//! progress, and records consumption and output movements.

use chrono::NaiveDate;
use ledgermill_core::costing::{price_run, OrderStatus, RunCosting, RunQuantities};
use ledgermill_core::directory::SystemRole;
use ledgermill_core::ledger::{
    DocumentRef, LineInput, ReferenceType, VoucherDraft, VoucherSource,
};
use ledgermill_core::valuation::{MovementSource, Valuation};
use ledgermill_shared::types::{ItemId, ProductionOrderId};
use ledgermill_shared::RequestContext;
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, TransactionTrait,
};
use std::collections::HashMap;
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::ItemKind;
use crate::entities::{inventory_items, production_orders};
use crate::orchestrators::OrchestratorError;
use crate::repositories::voucher::VoucherRepository;
use crate::repositories::{
    AccountRepository, NewMovement, ProductionRepository, StockRepository,
};

/// Input for completing a production order.
#[derive(Debug, Clone)]
pub struct CompleteOrderInput {
    /// The order to complete.
    pub order_id: ProductionOrderId,
    /// Date the run finished.
    pub completion_date: NaiveDate,
    /// Actual saleable output.
    pub good_quantity: Decimal,
    /// Actual scrapped output.
    pub defective_quantity: Decimal,
}

/// Drives production order completion in one transaction.
#[derive(Debug, Clone)]
pub struct ProductionOrchestrator {
    db: DatabaseConnection,
}

impl ProductionOrchestrator {
    /// Creates a new production orchestrator.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Completes a production order with actual quantities.
    ///
    /// Material cost is computed on actual gross output at the
    /// components' current weighted averages; the per-unit cost is
    /// amortized over good output. Shortage and unpriced components
    /// are advisories, not failures: the run completes and the gaps
    /// are logged.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyCompleted` on a second completion, `Validation`
    /// for non-positive quantities, or `NotFound` for an unknown order.
    pub async fn complete_order(
        &self,
        ctx: &RequestContext,
        input: CompleteOrderInput,
    ) -> Result<production_orders::Model, OrchestratorError> {
        if input.good_quantity < Decimal::ZERO || input.defective_quantity < Decimal::ZERO {
            return Err(OrchestratorError::Validation(
                "Actual quantities cannot be negative".into(),
            ));
        }
        let gross = input.good_quantity + input.defective_quantity;
        if gross <= Decimal::ZERO {
            return Err(OrchestratorError::Validation(
                "Actual output must be positive".into(),
            ));
        }

        let txn = self.db.begin().await?;

        let details = ProductionRepository::find_locked_in(&txn, ctx, input.order_id).await?;
        OrderStatus::from(details.order.status).ensure_completable()?;

        let actual = RunQuantities {
            gross,
            good: input.good_quantity,
            defective: input.defective_quantity,
        };

        let requirements = details.bom.requirements();
        let mut valuations: HashMap<ItemId, Valuation> =
            HashMap::with_capacity(requirements.len());
        let mut kinds: HashMap<ItemId, ItemKind> = HashMap::with_capacity(requirements.len());
        for requirement in &requirements {
            let valuation =
                StockRepository::valuate_item_in(&txn, ctx, requirement.item_id).await?;
            valuations.insert(requirement.item_id, valuation);

            let item = inventory_items::Entity::find_by_id(Uuid::from(requirement.item_id))
                .filter(inventory_items::Column::CompanyId.eq(Uuid::from(ctx.company_id)))
                .one(&txn)
                .await?
                .ok_or_else(|| {
                    OrchestratorError::NotFound(format!("Item {}", requirement.item_id))
                })?;
            kinds.insert(requirement.item_id, item.kind);
        }

        let costing = price_run(
            &requirements,
            |item_id| valuations.get(&item_id).copied(),
            actual.gross,
            actual.good,
        );
        log_advisories(&details.order.order_number, &costing);

        let reference = DocumentRef {
            reference_type: ReferenceType::ProductionOrder,
            reference_id: details.order.id,
        };

        // Consumption is credited against the account holding the component:
        // raw materials and semi-finished parts sit in different inventory
        // accounts.
        let mut raw_cost = Decimal::ZERO;
        let mut finished_cost = Decimal::ZERO;
        for component in &costing.components {
            match kinds.get(&component.item_id) {
                Some(ItemKind::SemiFinished | ItemKind::Product) => {
                    finished_cost += component.cost;
                }
                _ => raw_cost += component.cost,
            }
        }

        if costing.total_material_cost > Decimal::ZERO {
            let voucher = build_completion_voucher(
                &txn,
                ctx,
                &details.order.order_number,
                input.completion_date,
                reference,
                raw_cost,
                finished_cost,
            )
            .await?;
            VoucherRepository::post_voucher_in(&txn, ctx, voucher).await?;
        }

        for component in &costing.components {
            if component.consumption <= Decimal::ZERO {
                continue;
            }
            StockRepository::append_movement_in(
                &txn,
                ctx,
                NewMovement {
                    item_id: component.item_id,
                    movement_date: input.completion_date,
                    source: MovementSource::Consumption,
                    quantity: -component.consumption,
                    unit_price: Decimal::ZERO,
                    reference: Some(reference),
                },
            )
            .await?;
        }

        if actual.good > Decimal::ZERO {
            StockRepository::append_movement_in(
                &txn,
                ctx,
                NewMovement {
                    item_id: ItemId::from_uuid(details.bom.bom.output_item_id),
                    movement_date: input.completion_date,
                    source: MovementSource::ProductionOutput,
                    quantity: actual.good,
                    unit_price: costing.cost_per_good_unit,
                    reference: Some(reference),
                },
            )
            .await?;
        }

        let order = ProductionRepository::complete_in(
            &txn,
            details.order,
            actual,
            costing.total_material_cost,
            costing.cost_per_good_unit,
        )
        .await?;

        txn.commit().await?;
        tracing::info!(
            company_id = %ctx.company_id,
            order_id = %order.id,
            number = %order.order_number,
            total_material_cost = %order.total_material_cost,
            cost_per_unit = %order.cost_per_unit,
            "production order completed"
        );
        Ok(order)
    }
}

fn log_advisories(order_number: &str, costing: &RunCosting) {
    for component in &costing.components {
        if component.shortage {
            tracing::warn!(
                order = order_number,
                item_id = %component.item_id,
                consumption = %component.consumption,
                "component consumption exceeds stock on hand"
            );
        }
        if component.no_cost {
            tracing::warn!(
                order = order_number,
                item_id = %component.item_id,
                "component has no recorded cost, priced at zero"
            );
        }
    }
}

#[allow(clippy::too_many_arguments)]
async fn build_completion_voucher(
    txn: &sea_orm::DatabaseTransaction,
    ctx: &RequestContext,
    order_number: &str,
    completion_date: NaiveDate,
    reference: DocumentRef,
    raw_cost: Decimal,
    finished_cost: Decimal,
) -> Result<VoucherDraft, OrchestratorError> {
    let directory = AccountRepository::load_directory_in(txn, ctx).await?;
    let wip = directory.resolve_role(SystemRole::WorkInProgress)?;
    let finished = directory.resolve_role(SystemRole::FinishedGoodsInventory)?;
    let total = raw_cost + finished_cost;

    let mut lines = vec![
        LineInput::debit(wip.id, total).with_description("Materials into work in progress"),
    ];
    if raw_cost > Decimal::ZERO {
        let raw = directory.resolve_role(SystemRole::RawMaterialInventory)?;
        lines.push(LineInput::credit(raw.id, raw_cost));
    }
    if finished_cost > Decimal::ZERO {
        lines.push(
            LineInput::credit(finished.id, finished_cost)
                .with_description("Semi-finished components consumed"),
        );
    }
    lines.push(LineInput::debit(finished.id, total).with_description("Finished goods at run cost"));
    lines.push(LineInput::credit(wip.id, total));

    Ok(VoucherDraft {
        entry_date: completion_date,
        source: VoucherSource::ProductionOrder,
        narration: format!("Production order {order_number} completed"),
        reference: Some(reference),
        lines,
    })
}
