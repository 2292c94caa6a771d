//! Stock movement events.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The business document a stock movement originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementSource {
    /// Opening stock entry.
    OpeningStock,
    /// Goods received from a supplier.
    GoodsReceipt,
    /// Finished goods received from a production run.
    ProductionOutput,
    /// Raw material consumed by a production run.
    Consumption,
    /// Manual stock issue.
    Issue,
    /// Goods shipped against a sales invoice.
    Sale,
    /// Stock returned by a cancelled sale.
    SalesReturn,
}

/// A single inventory movement for one item.
///
/// `quantity` is signed: positive for receipts, negative for issues.
/// `unit_price` is the acquisition cost per unit and is only meaningful
/// on receipts; issues carry zero and are costed at the running average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockEvent {
    /// Date the movement took effect.
    pub movement_date: NaiveDate,
    /// Tie-breaker for movements on the same date; assigned at insert
    /// time from a monotonic counter.
    pub seq: i64,
    /// Signed quantity delta.
    pub quantity: Decimal,
    /// Cost per unit for receipts; zero for issues.
    pub unit_price: Decimal,
    /// Originating document kind.
    pub source: MovementSource,
}

impl StockEvent {
    /// Creates a receipt event (positive quantity at a unit cost).
    #[must_use]
    pub const fn receipt(
        movement_date: NaiveDate,
        seq: i64,
        quantity: Decimal,
        unit_price: Decimal,
        source: MovementSource,
    ) -> Self {
        Self {
            movement_date,
            seq,
            quantity,
            unit_price,
            source,
        }
    }

    /// Creates an issue event (negative quantity, costed at average).
    #[must_use]
    pub const fn issue(
        movement_date: NaiveDate,
        seq: i64,
        quantity: Decimal,
        source: MovementSource,
    ) -> Self {
        Self {
            movement_date,
            seq,
            quantity,
            unit_price: Decimal::ZERO,
            source,
        }
    }

    /// Returns true if this event adds stock.
    #[must_use]
    pub fn is_receipt(&self) -> bool {
        self.quantity > Decimal::ZERO
    }
}
