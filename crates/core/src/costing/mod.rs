//! Production run quantity expansion and material costing.
//!
//! Two pure stages: `expand_run` turns machine parameters into gross/good/
//! defective quantities, and `price_run` prices a bill of materials against
//! current inventory valuations. The db orchestrator composes both inside
//! the completion transaction.

pub mod error;
pub mod order;
pub mod pricing;
pub mod run;

#[cfg(test)]
mod pricing_props;

pub use error::CostingError;
pub use order::OrderStatus;
pub use pricing::{price_run, ComponentCost, ComponentRequirement, RunCosting};
pub use run::{expand_run, OperationParams, ProductionStage, RunQuantities};
