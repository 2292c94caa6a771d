//! Chart-of-accounts directory.
//!
//! Resolves logical account roles (e.g. "accounts receivable", "input VAT")
//! or account codes to concrete account references and their types. Pure
//! lookup over configuration data owned by the company; the core never
//! mutates accounts.

pub mod chart;
pub mod error;
pub mod types;

pub use chart::ChartDirectory;
pub use error::DirectoryError;
pub use types::{AccountRef, AccountType, SystemRole};
