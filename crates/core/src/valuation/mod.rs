//! Weighted-average inventory valuation.
//!
//! Quantity on hand and average unit cost are never stored; they are
//! derived by replaying an item's stock movement history in a pure fold.

pub mod engine;
pub mod event;

#[cfg(test)]
mod engine_props;

pub use engine::{valuate, valuate_trace, Valuation};
pub use event::{MovementSource, StockEvent};
