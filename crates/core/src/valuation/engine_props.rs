//! Property-based tests for the valuation fold.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::engine::{valuate, Valuation};
use super::event::{MovementSource, StockEvent};

fn quantity() -> impl Strategy<Value = Decimal> {
    (1i64..=10_000).prop_map(Decimal::from)
}

fn price() -> impl Strategy<Value = Decimal> {
    (1i64..=1_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn day(offset: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1).unwrap() + chrono::Days::new(offset.unsigned_abs())
}

proptest! {
    /// An issue never moves the average unit cost.
    #[test]
    fn prop_issue_preserves_average(
        in_qty in quantity(),
        in_price in price(),
        out_qty in quantity(),
    ) {
        let events = vec![
            StockEvent::receipt(day(0), 1, in_qty, in_price, MovementSource::GoodsReceipt),
            StockEvent::issue(day(1), 2, -out_qty, MovementSource::Sale),
        ];

        let result = valuate(&events);
        prop_assert_eq!(result.average_unit_cost, in_price);
        prop_assert_eq!(result.quantity_on_hand, in_qty - out_qty);
    }

    /// After a receipt, the average lands between the old average and the
    /// receipt price (inclusive).
    #[test]
    fn prop_receipt_average_is_bounded(
        first_qty in quantity(),
        first_price in price(),
        second_qty in quantity(),
        second_price in price(),
    ) {
        let events = vec![
            StockEvent::receipt(day(0), 1, first_qty, first_price, MovementSource::GoodsReceipt),
            StockEvent::receipt(day(1), 2, second_qty, second_price, MovementSource::GoodsReceipt),
        ];

        let result = valuate(&events);
        let low = first_price.min(second_price);
        let high = first_price.max(second_price);
        prop_assert!(result.average_unit_cost >= low);
        prop_assert!(result.average_unit_cost <= high);
    }

    /// Quantity on hand is always the plain sum of the deltas.
    #[test]
    fn prop_quantity_is_sum_of_deltas(
        receipts in prop::collection::vec((quantity(), price()), 1..8),
        issues in prop::collection::vec(quantity(), 0..8),
    ) {
        let mut events = Vec::new();
        let mut seq = 0i64;
        let mut expected = Decimal::ZERO;
        for (qty, unit_price) in &receipts {
            events.push(StockEvent::receipt(day(seq), seq, *qty, *unit_price, MovementSource::GoodsReceipt));
            expected += *qty;
            seq += 1;
        }
        for qty in &issues {
            events.push(StockEvent::issue(day(seq), seq, -*qty, MovementSource::Sale));
            expected -= *qty;
            seq += 1;
        }

        prop_assert_eq!(valuate(&events).quantity_on_hand, expected);
    }

    /// The fold is insensitive to input order; only (date, seq) matters.
    #[test]
    fn prop_input_order_irrelevant(
        pairs in prop::collection::vec((quantity(), price()), 2..6),
        rotate_by in 0usize..6,
    ) {
        let events: Vec<StockEvent> = pairs
            .iter()
            .enumerate()
            .map(|(i, (qty, unit_price))| {
                StockEvent::receipt(day(i as i64), i as i64, *qty, *unit_price, MovementSource::GoodsReceipt)
            })
            .collect();

        let mut shuffled = events.clone();
        let len = shuffled.len();
        shuffled.rotate_left(rotate_by % len);

        prop_assert_eq!(valuate(&events), valuate(&shuffled));
    }

    /// Incremental application matches replaying from scratch.
    #[test]
    fn prop_fold_is_incremental(
        pairs in prop::collection::vec((quantity(), price()), 1..6),
    ) {
        let events: Vec<StockEvent> = pairs
            .iter()
            .enumerate()
            .map(|(i, (qty, unit_price))| {
                StockEvent::receipt(day(i as i64), i as i64, *qty, *unit_price, MovementSource::GoodsReceipt)
            })
            .collect();

        let mut incremental = Valuation::default();
        for event in &events {
            incremental = incremental.apply(event);
        }

        prop_assert_eq!(incremental, valuate(&events));
    }
}
