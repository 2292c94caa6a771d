//! The weighted-average valuation fold.

use rust_decimal::Decimal;

use super::event::StockEvent;

/// Valuation state for one inventory item at a point in its history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Valuation {
    /// Units currently on hand.
    pub quantity_on_hand: Decimal,
    /// Weighted-average cost per unit.
    pub average_unit_cost: Decimal,
}

impl Valuation {
    /// Total value of stock on hand.
    #[must_use]
    pub fn total_value(&self) -> Decimal {
        self.quantity_on_hand * self.average_unit_cost
    }

    /// Applies one movement to the running state.
    ///
    /// Receipts blend into the average:
    /// `avg' = (qty * avg + in_qty * price) / (qty + in_qty)`.
    /// Issues reduce quantity and leave the average untouched. If a
    /// receipt lands on zero or negative resulting quantity the average
    /// resets to zero rather than dividing by it.
    #[must_use]
    pub fn apply(self, event: &StockEvent) -> Self {
        let new_quantity = self.quantity_on_hand + event.quantity;

        if event.quantity > Decimal::ZERO {
            let average_unit_cost = if new_quantity > Decimal::ZERO {
                (self.quantity_on_hand * self.average_unit_cost
                    + event.quantity * event.unit_price)
                    / new_quantity
            } else {
                Decimal::ZERO
            };
            Self {
                quantity_on_hand: new_quantity,
                average_unit_cost,
            }
        } else {
            Self {
                quantity_on_hand: new_quantity,
                average_unit_cost: self.average_unit_cost,
            }
        }
    }
}

/// Replays an item's movement history into its current valuation.
///
/// Events are ordered by (date, seq) before folding, so callers may pass
/// them in any order.
#[must_use]
pub fn valuate(events: &[StockEvent]) -> Valuation {
    let mut ordered: Vec<&StockEvent> = events.iter().collect();
    ordered.sort_by_key(|e| (e.movement_date, e.seq));

    ordered
        .into_iter()
        .fold(Valuation::default(), |state, event| state.apply(event))
}

/// Like [`valuate`], but returns the state after every event.
///
/// Used by the movement ledger views to show the running average
/// alongside each row.
#[must_use]
pub fn valuate_trace(events: &[StockEvent]) -> Vec<(StockEvent, Valuation)> {
    let mut ordered: Vec<StockEvent> = events.to_vec();
    ordered.sort_by_key(|e| (e.movement_date, e.seq));

    let mut state = Valuation::default();
    ordered
        .into_iter()
        .map(|event| {
            state = state.apply(&event);
            (event, state)
        })
        .collect()
}
