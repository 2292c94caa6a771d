//! Transaction orchestrators.
//!
//! Each orchestrator drives one business document end to end: document
//! rows, the balanced journal voucher, and the stock movements it
//! implies, all inside a single database transaction. A failure at any
//! step rolls the whole document back.

pub mod error;
pub mod opening;
pub mod payment;
pub mod production;
pub mod sales;
pub mod supplier;

pub use error::OrchestratorError;
pub use opening::{AccountOpening, OpeningBalanceInput, OpeningOrchestrator, StockOpening};
pub use payment::{AllocationInput, PaymentInput, PaymentOrchestrator};
pub use production::{CompleteOrderInput, ProductionOrchestrator};
pub use sales::{CancelOutcome, InvoiceLineInput, IssueInvoiceInput, SalesOrchestrator};
pub use supplier::{PayBillInput, SupplierOrchestrator};
