//! Shared types, errors, and configuration for Ledgermill.
//!
//! This crate holds the pieces every other crate depends on: typed IDs,
//! the request-scoped tenant context, the application error type, and
//! configuration loading. No web or database dependencies.

pub mod config;
pub mod context;
pub mod error;
pub mod types;

pub use context::RequestContext;
pub use error::{AppError, AppResult};
