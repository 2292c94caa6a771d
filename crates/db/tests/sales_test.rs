//! Integration tests for the sales invoice orchestrator.

mod common;

use ledgermill_core::valuation::MovementSource;
use ledgermill_db::entities::sea_orm_active_enums as db_enums;
use ledgermill_db::entities::{journal_vouchers, sales_invoices, stock_movements};
use ledgermill_db::orchestrators::{
    InvoiceLineInput, IssueInvoiceInput, OrchestratorError, SalesOrchestrator,
};
use ledgermill_db::repositories::StockRepository;
use ledgermill_shared::types::SalesInvoiceId;
use rust_decimal_macros::dec;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use uuid::Uuid;

async fn issue_input(
    db: &common::TestDb,
    ctx: &ledgermill_shared::RequestContext,
) -> (IssueInvoiceInput, ledgermill_shared::types::ItemId) {
    let customer = common::seed_customer(&db.conn, ctx).await;
    let item = common::seed_item(&db.conn, ctx, "FG-100", db_enums::ItemKind::Product).await;
    common::receive_stock(&db.conn, ctx, item, common::date(2026, 1, 2), dec!(100), dec!(20))
        .await;

    let input = IssueInvoiceInput {
        customer_id: customer,
        invoice_number: "INV-2026-001".to_string(),
        invoice_date: common::date(2026, 1, 15),
        due_date: Some(common::date(2026, 2, 14)),
        lines: vec![InvoiceLineInput {
            item_id: item,
            quantity: dec!(10),
            unit_price: dec!(50),
        }],
        discount: dec!(0),
        vat_rate: dec!(10),
    };
    (input, item)
}

#[tokio::test]
async fn test_issue_invoice_posts_voucher_and_movement() {
    let db = common::start().await;
    let ctx = common::seed_company(&db.conn).await;
    common::seed_chart(&db.conn, &ctx).await;
    let sales = SalesOrchestrator::new(db.conn.clone());

    let (input, item) = issue_input(&db, &ctx).await;
    let invoice = sales.issue_invoice(&ctx, input).await.unwrap();

    assert_eq!(invoice.subtotal, dec!(500));
    assert_eq!(invoice.vat_amount, dec!(50));
    assert_eq!(invoice.total, dec!(550));
    assert_eq!(invoice.total_cogs, dec!(200));
    assert_eq!(invoice.status, db_enums::InvoiceStatus::Issued);

    let voucher = journal_vouchers::Entity::find()
        .filter(journal_vouchers::Column::ReferenceId.eq(invoice.id))
        .filter(journal_vouchers::Column::Source.eq(db_enums::VoucherSource::SalesInvoice))
        .one(&db.conn)
        .await
        .unwrap()
        .expect("issue posts exactly one voucher");
    // Dr A/R 550 + Dr -- / Cr revenue 500, VAT 50, plus the 200 cost pair.
    assert_eq!(voucher.total_debits, dec!(750));
    assert_eq!(voucher.total_credits, dec!(750));
    assert!(voucher.voucher_number.starts_with("SI-2026-"));

    let stock = StockRepository::new(db.conn.clone());
    let valuation = stock.valuate_item(&ctx, item).await.unwrap();
    assert_eq!(valuation.quantity_on_hand, dec!(90));
    assert_eq!(valuation.average_unit_cost, dec!(20));
}

#[tokio::test]
async fn test_insufficient_stock_rolls_back_everything() {
    let db = common::start().await;
    let ctx = common::seed_company(&db.conn).await;
    common::seed_chart(&db.conn, &ctx).await;
    let sales = SalesOrchestrator::new(db.conn.clone());

    let (mut input, item) = issue_input(&db, &ctx).await;
    input.lines[0].quantity = dec!(150);

    let err = sales.issue_invoice(&ctx, input).await.unwrap_err();
    match err {
        OrchestratorError::InsufficientStock {
            item_id,
            requested,
            available,
        } => {
            assert_eq!(item_id, Uuid::from(item));
            assert_eq!(requested, dec!(150));
            assert_eq!(available, dec!(100));
        }
        other => panic!("expected InsufficientStock, got {other}"),
    }

    let invoices = sales_invoices::Entity::find()
        .filter(sales_invoices::Column::CompanyId.eq(Uuid::from(ctx.company_id)))
        .count(&db.conn)
        .await
        .unwrap();
    assert_eq!(invoices, 0);

    let vouchers = journal_vouchers::Entity::find()
        .filter(journal_vouchers::Column::CompanyId.eq(Uuid::from(ctx.company_id)))
        .count(&db.conn)
        .await
        .unwrap();
    assert_eq!(vouchers, 0);

    let sale_movements = stock_movements::Entity::find()
        .filter(stock_movements::Column::CompanyId.eq(Uuid::from(ctx.company_id)))
        .filter(stock_movements::Column::Source.eq(db_enums::MovementSource::Sale))
        .count(&db.conn)
        .await
        .unwrap();
    assert_eq!(sale_movements, 0);
}

#[tokio::test]
async fn test_lines_for_one_item_are_summed_against_stock() {
    let db = common::start().await;
    let ctx = common::seed_company(&db.conn).await;
    common::seed_chart(&db.conn, &ctx).await;
    let sales = SalesOrchestrator::new(db.conn.clone());

    // 100 on hand; each line alone fits, together they do not.
    let (mut input, item) = issue_input(&db, &ctx).await;
    input.lines = vec![
        InvoiceLineInput {
            item_id: item,
            quantity: dec!(60),
            unit_price: dec!(50),
        },
        InvoiceLineInput {
            item_id: item,
            quantity: dec!(60),
            unit_price: dec!(50),
        },
    ];

    let err = sales.issue_invoice(&ctx, input).await.unwrap_err();
    match err {
        OrchestratorError::InsufficientStock {
            item_id,
            requested,
            available,
        } => {
            assert_eq!(item_id, Uuid::from(item));
            assert_eq!(requested, dec!(120));
            assert_eq!(available, dec!(100));
        }
        other => panic!("expected InsufficientStock, got {other}"),
    }

    let stock = StockRepository::new(db.conn.clone());
    let valuation = stock.valuate_item(&ctx, item).await.unwrap();
    assert_eq!(valuation.quantity_on_hand, dec!(100));
}

#[tokio::test]
async fn test_discount_reduces_vat_base() {
    let db = common::start().await;
    let ctx = common::seed_company(&db.conn).await;
    common::seed_chart(&db.conn, &ctx).await;
    let sales = SalesOrchestrator::new(db.conn.clone());

    let (mut input, _) = issue_input(&db, &ctx).await;
    input.discount = dec!(100);

    let invoice = sales.issue_invoice(&ctx, input).await.unwrap();
    assert_eq!(invoice.subtotal, dec!(500));
    assert_eq!(invoice.discount, dec!(100));
    // VAT on 400, not 500.
    assert_eq!(invoice.vat_amount, dec!(40.00));
    assert_eq!(invoice.total, dec!(440.00));
}

#[tokio::test]
async fn test_cancel_returns_stock_at_recorded_cost() {
    let db = common::start().await;
    let ctx = common::seed_company(&db.conn).await;
    common::seed_chart(&db.conn, &ctx).await;
    let sales = SalesOrchestrator::new(db.conn.clone());

    let (input, item) = issue_input(&db, &ctx).await;
    let invoice = sales.issue_invoice(&ctx, input).await.unwrap();

    let outcome = sales
        .cancel_invoice(&ctx, SalesInvoiceId::from_uuid(invoice.id))
        .await
        .unwrap();
    assert_eq!(outcome.invoice.status, db_enums::InvoiceStatus::Cancelled);
    assert_eq!(outcome.reversal.source, db_enums::VoucherSource::Reversal);
    assert_eq!(outcome.reversal.total_debits, dec!(750));

    let stock = StockRepository::new(db.conn.clone());
    let valuation = stock.valuate_item(&ctx, item).await.unwrap();
    assert_eq!(valuation.quantity_on_hand, dec!(100));
    assert_eq!(valuation.average_unit_cost, dec!(20));

    let returns = stock_movements::Entity::find()
        .filter(stock_movements::Column::ItemId.eq(Uuid::from(item)))
        .filter(stock_movements::Column::Source.eq(db_enums::MovementSource::SalesReturn))
        .count(&db.conn)
        .await
        .unwrap();
    assert_eq!(returns, 1);
}

#[tokio::test]
async fn test_cancel_twice_is_rejected() {
    let db = common::start().await;
    let ctx = common::seed_company(&db.conn).await;
    common::seed_chart(&db.conn, &ctx).await;
    let sales = SalesOrchestrator::new(db.conn.clone());

    let (input, _) = issue_input(&db, &ctx).await;
    let invoice = sales.issue_invoice(&ctx, input).await.unwrap();
    let invoice_id = SalesInvoiceId::from_uuid(invoice.id);

    sales.cancel_invoice(&ctx, invoice_id).await.unwrap();
    let err = sales.cancel_invoice(&ctx, invoice_id).await.unwrap_err();
    assert!(matches!(err, OrchestratorError::InvalidState(_)));
}

#[tokio::test]
async fn test_empty_invoice_rejected() {
    let db = common::start().await;
    let ctx = common::seed_company(&db.conn).await;
    common::seed_chart(&db.conn, &ctx).await;
    let sales = SalesOrchestrator::new(db.conn.clone());

    let (mut input, _) = issue_input(&db, &ctx).await;
    input.lines.clear();

    let err = sales.issue_invoice(&ctx, input).await.unwrap_err();
    assert!(matches!(err, OrchestratorError::Validation(_)));
}
