//! Integration tests for production orders: quantity expansion,
//! completion costing, and the movements it drives.

mod common;

use ledgermill_core::costing::{CostingError, OperationParams, ProductionStage};
use ledgermill_core::directory::SystemRole;
use ledgermill_db::entities::sea_orm_active_enums as db_enums;
use ledgermill_db::entities::{journal_voucher_lines, journal_vouchers};
use ledgermill_db::orchestrators::{
    CompleteOrderInput, OrchestratorError, ProductionOrchestrator,
};
use ledgermill_db::repositories::{
    BomRepository, ComponentInput, CreateBomInput, CreateOrderInput, ProductionRepository,
    StockRepository,
};
use ledgermill_shared::types::{BomId, ItemId, ProductionOrderId};
use ledgermill_shared::RequestContext;
use rust_decimal_macros::dec;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use sea_orm::DatabaseConnection;

struct Fixture {
    bom_id: BomId,
    raw: ItemId,
    output: ItemId,
}

async fn seed_bom(
    conn: &DatabaseConnection,
    ctx: &RequestContext,
    stage: ProductionStage,
    quantity_required: rust_decimal::Decimal,
) -> Fixture {
    let raw = common::seed_item(conn, ctx, "RM-800", db_enums::ItemKind::RawMaterial).await;
    let output = common::seed_item(conn, ctx, "SF-800", db_enums::ItemKind::SemiFinished).await;

    let boms = BomRepository::new(conn.clone());
    let bom = boms
        .create_bom(
            ctx,
            CreateBomInput {
                stage,
                output_item_id: output,
                name: "Preform 28mm".to_string(),
                components: vec![ComponentInput {
                    component_item_id: raw,
                    quantity_required,
                    unit: "kg".to_string(),
                }],
            },
        )
        .await
        .unwrap();

    Fixture {
        bom_id: BomId::from_uuid(bom.bom.id),
        raw,
        output,
    }
}

#[tokio::test]
async fn test_injection_order_expands_from_machine_parameters() {
    let db = common::start().await;
    let ctx = common::seed_company(&db.conn).await;
    common::seed_chart(&db.conn, &ctx).await;
    let fixture = seed_bom(&db.conn, &ctx, ProductionStage::Injection, dec!(0.05)).await;

    let production = ProductionRepository::new(db.conn.clone());
    let details = production
        .create_order(
            &ctx,
            CreateOrderInput {
                bom_id: fixture.bom_id,
                order_number: "PO-2026-001".to_string(),
                order_date: common::date(2026, 2, 1),
                planned_quantity: dec!(0),
                operations: vec![OperationParams {
                    cycle_time_seconds: dec!(30),
                    cavities_per_round: dec!(32),
                    running_hours: dec!(8),
                    scrap_percent: dec!(3),
                }],
            },
        )
        .await
        .unwrap();

    assert_eq!(details.order.gross_planned, dec!(30720));
    assert_eq!(details.order.defective_planned, dec!(921.60));
    assert_eq!(details.order.good_planned, dec!(29798.40));
    assert_eq!(details.order.status, db_enums::OrderStatus::Planned);
    assert_eq!(details.operations.len(), 1);
}

#[tokio::test]
async fn test_injection_order_requires_operations() {
    let db = common::start().await;
    let ctx = common::seed_company(&db.conn).await;
    common::seed_chart(&db.conn, &ctx).await;
    let fixture = seed_bom(&db.conn, &ctx, ProductionStage::Injection, dec!(0.05)).await;

    let production = ProductionRepository::new(db.conn.clone());
    let err = production
        .create_order(
            &ctx,
            CreateOrderInput {
                bom_id: fixture.bom_id,
                order_number: "PO-2026-002".to_string(),
                order_date: common::date(2026, 2, 1),
                planned_quantity: dec!(1000),
                operations: vec![],
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ledgermill_db::repositories::ProductionError::Costing(CostingError::NoOperations)
    ));
}

#[tokio::test]
async fn test_completion_prices_gross_and_amortizes_over_good() {
    let db = common::start().await;
    let ctx = common::seed_company(&db.conn).await;
    common::seed_chart(&db.conn, &ctx).await;
    // Blowing run: quantities are taken as planned, 2 kg of raw per unit.
    let fixture = seed_bom(&db.conn, &ctx, ProductionStage::Blowing, dec!(2)).await;
    common::receive_stock(&db.conn, &ctx, fixture.raw, common::date(2026, 2, 1), dec!(1000), dec!(1.50))
        .await;

    let production = ProductionRepository::new(db.conn.clone());
    let details = production
        .create_order(
            &ctx,
            CreateOrderInput {
                bom_id: fixture.bom_id,
                order_number: "PO-2026-003".to_string(),
                order_date: common::date(2026, 2, 5),
                planned_quantity: dec!(100),
                operations: vec![],
            },
        )
        .await
        .unwrap();

    let orchestrator = ProductionOrchestrator::new(db.conn.clone());
    let order = orchestrator
        .complete_order(
            &ctx,
            CompleteOrderInput {
                order_id: ProductionOrderId::from_uuid(details.order.id),
                completion_date: common::date(2026, 2, 10),
                good_quantity: dec!(90),
                defective_quantity: dec!(10),
            },
        )
        .await
        .unwrap();

    assert_eq!(order.status, db_enums::OrderStatus::Completed);
    assert_eq!(order.gross_planned, dec!(100));
    assert_eq!(order.good_planned, dec!(90));
    // Consumption 200 kg at 1.50: cost borne by gross, amortized over good.
    assert_eq!(order.total_material_cost, dec!(300));
    let unit_drift = (order.cost_per_unit - dec!(300) / dec!(90)).abs();
    assert!(unit_drift < dec!(0.0001), "unit cost drifted by {unit_drift}");

    let stock = StockRepository::new(db.conn.clone());
    let raw = stock.valuate_item(&ctx, fixture.raw).await.unwrap();
    assert_eq!(raw.quantity_on_hand, dec!(800));
    assert_eq!(raw.average_unit_cost, dec!(1.50));

    let output = stock.valuate_item(&ctx, fixture.output).await.unwrap();
    assert_eq!(output.quantity_on_hand, dec!(90));
    // Receipt price is the amortized unit cost; replay may differ in the
    // last digit of the repeating fraction.
    let drift = (output.average_unit_cost - dec!(300) / dec!(90)).abs();
    assert!(drift < dec!(0.0001), "average drifted by {drift}");

    let voucher = journal_vouchers::Entity::find()
        .filter(journal_vouchers::Column::ReferenceId.eq(order.id))
        .filter(journal_vouchers::Column::Source.eq(db_enums::VoucherSource::ProductionOrder))
        .one(&db.conn)
        .await
        .unwrap()
        .expect("completion posts a voucher");
    // Materials through WIP, then WIP into finished goods.
    assert_eq!(voucher.total_debits, dec!(600));
    assert_eq!(voucher.total_credits, dec!(600));
}

#[tokio::test]
async fn test_semi_finished_consumption_credits_finished_goods() {
    let db = common::start().await;
    let ctx = common::seed_company(&db.conn).await;
    let directory = common::seed_chart(&db.conn, &ctx).await;

    // Blowing a bottle from a semi-finished preform: the consumption
    // credit belongs on finished goods, not raw material.
    let preform =
        common::seed_item(&db.conn, &ctx, "SF-900", db_enums::ItemKind::SemiFinished).await;
    let bottle = common::seed_item(&db.conn, &ctx, "FG-900", db_enums::ItemKind::Product).await;
    common::receive_stock(&db.conn, &ctx, preform, common::date(2026, 5, 1), dec!(500), dec!(2))
        .await;

    let boms = BomRepository::new(db.conn.clone());
    let bom = boms
        .create_bom(
            &ctx,
            CreateBomInput {
                stage: ProductionStage::Blowing,
                output_item_id: bottle,
                name: "Bottle 600ml".to_string(),
                components: vec![ComponentInput {
                    component_item_id: preform,
                    quantity_required: dec!(1),
                    unit: "pcs".to_string(),
                }],
            },
        )
        .await
        .unwrap();

    let production = ProductionRepository::new(db.conn.clone());
    let details = production
        .create_order(
            &ctx,
            CreateOrderInput {
                bom_id: BomId::from_uuid(bom.bom.id),
                order_number: "PO-2026-006".to_string(),
                order_date: common::date(2026, 5, 2),
                planned_quantity: dec!(100),
                operations: vec![],
            },
        )
        .await
        .unwrap();

    let orchestrator = ProductionOrchestrator::new(db.conn.clone());
    let order = orchestrator
        .complete_order(
            &ctx,
            CompleteOrderInput {
                order_id: ProductionOrderId::from_uuid(details.order.id),
                completion_date: common::date(2026, 5, 3),
                good_quantity: dec!(100),
                defective_quantity: dec!(0),
            },
        )
        .await
        .unwrap();
    assert_eq!(order.total_material_cost, dec!(200));

    let voucher = journal_vouchers::Entity::find()
        .filter(journal_vouchers::Column::ReferenceId.eq(order.id))
        .filter(journal_vouchers::Column::Source.eq(db_enums::VoucherSource::ProductionOrder))
        .one(&db.conn)
        .await
        .unwrap()
        .expect("completion posts a voucher");
    let lines = journal_voucher_lines::Entity::find()
        .filter(journal_voucher_lines::Column::VoucherId.eq(voucher.id))
        .all(&db.conn)
        .await
        .unwrap();

    let raw_account = directory
        .resolve_role(SystemRole::RawMaterialInventory)
        .unwrap()
        .id;
    let finished_account = directory
        .resolve_role(SystemRole::FinishedGoodsInventory)
        .unwrap()
        .id;
    assert!(
        lines
            .iter()
            .all(|l| l.account_id != uuid::Uuid::from(raw_account)),
        "raw material inventory must stay untouched"
    );
    let finished_credits: rust_decimal::Decimal = lines
        .iter()
        .filter(|l| l.account_id == uuid::Uuid::from(finished_account))
        .map(|l| l.credit)
        .sum();
    assert_eq!(finished_credits, dec!(200));
}

#[tokio::test]
async fn test_double_completion_is_rejected() {
    let db = common::start().await;
    let ctx = common::seed_company(&db.conn).await;
    common::seed_chart(&db.conn, &ctx).await;
    let fixture = seed_bom(&db.conn, &ctx, ProductionStage::Blowing, dec!(1)).await;
    common::receive_stock(&db.conn, &ctx, fixture.raw, common::date(2026, 3, 1), dec!(500), dec!(2))
        .await;

    let production = ProductionRepository::new(db.conn.clone());
    let details = production
        .create_order(
            &ctx,
            CreateOrderInput {
                bom_id: fixture.bom_id,
                order_number: "PO-2026-004".to_string(),
                order_date: common::date(2026, 3, 2),
                planned_quantity: dec!(50),
                operations: vec![],
            },
        )
        .await
        .unwrap();
    let order_id = ProductionOrderId::from_uuid(details.order.id);

    let orchestrator = ProductionOrchestrator::new(db.conn.clone());
    let input = CompleteOrderInput {
        order_id,
        completion_date: common::date(2026, 3, 5),
        good_quantity: dec!(50),
        defective_quantity: dec!(0),
    };
    orchestrator.complete_order(&ctx, input.clone()).await.unwrap();

    let err = orchestrator.complete_order(&ctx, input).await.unwrap_err();
    assert!(matches!(
        err,
        OrchestratorError::Costing(CostingError::AlreadyCompleted)
    ));

    // The second attempt must not consume stock again.
    let stock = StockRepository::new(db.conn.clone());
    let raw = stock.valuate_item(&ctx, fixture.raw).await.unwrap();
    assert_eq!(raw.quantity_on_hand, dec!(450));
}

#[tokio::test]
async fn test_unpriced_component_completes_with_zero_cost() {
    let db = common::start().await;
    let ctx = common::seed_company(&db.conn).await;
    common::seed_chart(&db.conn, &ctx).await;
    let fixture = seed_bom(&db.conn, &ctx, ProductionStage::Blowing, dec!(1)).await;
    // No receipts: the component has no history and no cost.

    let production = ProductionRepository::new(db.conn.clone());
    let details = production
        .create_order(
            &ctx,
            CreateOrderInput {
                bom_id: fixture.bom_id,
                order_number: "PO-2026-005".to_string(),
                order_date: common::date(2026, 4, 1),
                planned_quantity: dec!(10),
                operations: vec![],
            },
        )
        .await
        .unwrap();

    let orchestrator = ProductionOrchestrator::new(db.conn.clone());
    let order = orchestrator
        .complete_order(
            &ctx,
            CompleteOrderInput {
                order_id: ProductionOrderId::from_uuid(details.order.id),
                completion_date: common::date(2026, 4, 2),
                good_quantity: dec!(10),
                defective_quantity: dec!(0),
            },
        )
        .await
        .unwrap();

    assert_eq!(order.status, db_enums::OrderStatus::Completed);
    assert_eq!(order.total_material_cost, dec!(0));
    assert_eq!(order.cost_per_unit, dec!(0));

    // Zero-value runs post no voucher.
    let vouchers = journal_vouchers::Entity::find()
        .filter(journal_vouchers::Column::ReferenceId.eq(order.id))
        .all(&db.conn)
        .await
        .unwrap();
    assert!(vouchers.is_empty());
}
