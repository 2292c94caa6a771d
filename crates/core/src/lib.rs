//! Core business logic for Ledgermill.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, validation rules, and calculations live
//! here; persistence is the `ledgermill-db` crate's concern.
//!
//! # Modules
//!
//! - `directory` - Chart-of-accounts role resolution
//! - `ledger` - Double-entry journal voucher logic
//! - `valuation` - Weighted-average inventory valuation
//! - `costing` - BOM expansion and production run costing

pub mod costing;
pub mod directory;
pub mod ledger;
pub mod valuation;
