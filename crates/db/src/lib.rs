//! Database layer with `SeaORM` entities, repositories, and orchestrators.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repository abstractions for data access
//! - Database migrations
//! - Transaction orchestrators composing the core engines into atomic
//!   business operations

pub mod entities;
pub mod migration;
pub mod orchestrators;
pub mod repositories;

pub use repositories::{AccountRepository, StockRepository, VoucherRepository};

use sea_orm::{Database, DatabaseConnection, DbErr};

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}
